//! The playlist and its bound player instance.
//!
//! The controller owns the ordered track list, the current selection and a
//! mirror of the player's transport state. At most one player instance is
//! alive at a time; it always belongs to the current track.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::player::{PlayerEvent, PlayerHandle, PlayerSpawner, RepeatMode, SpawnSettings};

use super::track::{extract_video_id, validate_url, PlaylistError, Track, VideoId};

const VOLUME_STEP: u8 = 5;
const UNMUTE_VOLUME: u8 = 50;
/// Fresh player instances may not accept commands yet; volume changes are
/// re-applied once after this delay.
const VOLUME_RETRY: Duration = Duration::from_millis(300);

/// What the UI knows about playback. Refreshed by polling and by the
/// player's own notifications, so it can lag the real player by a beat.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub volume: u8,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub position_secs: f64,
    pub duration_secs: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            volume: 80,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            position_secs: 0.0,
            duration_secs: 0.0,
        }
    }
}

/// Lifecycle of the player binding. The backend probe runs at most once per
/// process; after that the controller moves between `Ready` and `Bound` as
/// tracks come and go.
enum Binding {
    Uninitialized,
    Ready,
    Bound {
        id: VideoId,
        handle: Box<dyn PlayerHandle>,
    },
    Unavailable,
    Destroyed,
}

pub struct MusicController {
    tracks: Vec<Track>,
    current: Option<usize>,
    binding: Binding,
    playback: PlaybackState,
    video_hidden: bool,
    /// Video id of an add whose title fetch has not come back yet. While
    /// set, further adds are ignored and progress updates are not applied.
    add_in_flight: Option<VideoId>,
    volume_retry_at: Option<Instant>,
    liked: HashSet<String>,
    spawner: Box<dyn PlayerSpawner>,
}

impl MusicController {
    pub fn new(spawner: Box<dyn PlayerSpawner>) -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            binding: Binding::Uninitialized,
            playback: PlaybackState::default(),
            video_hidden: false,
            add_in_flight: None,
            volume_retry_at: None,
            liked: HashSet::new(),
            spawner,
        }
    }

    /// Re-applies persisted session state. Called once before the first
    /// track exists, so nothing is pushed to a player here.
    pub fn restore(
        &mut self,
        volume: u8,
        muted: bool,
        shuffle: bool,
        repeat: RepeatMode,
        video_hidden: bool,
        liked: Vec<String>,
    ) {
        self.playback.volume = volume.min(100);
        self.playback.muted = muted || volume == 0;
        self.playback.shuffle = shuffle;
        self.playback.repeat = repeat;
        self.video_hidden = video_hidden;
        self.liked = liked.into_iter().collect();
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn video_hidden(&self) -> bool {
        self.video_hidden
    }

    pub fn is_add_in_flight(&self) -> bool {
        self.add_in_flight.is_some()
    }

    pub fn player_unavailable(&self) -> bool {
        matches!(self.binding, Binding::Unavailable)
    }

    pub fn bound_id(&self) -> Option<&str> {
        match &self.binding {
            Binding::Bound { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn liked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.liked.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Validates the URL, extracts the video id and appends a placeholder
    /// entry. If nothing was selected, the new entry is selected and bound
    /// immediately. The caller is expected to kick off the title fetch for
    /// the returned id and report back through [`Self::resolve_title`].
    pub fn add_track(&mut self, url: &str) -> Result<VideoId, PlaylistError> {
        if self.add_in_flight.is_some() {
            return Err(PlaylistError::AddInFlight);
        }
        validate_url(url)?;
        let id = extract_video_id(url).ok_or(PlaylistError::IdExtractionFailed)?;
        if self.tracks.iter().any(|t| t.id == id) {
            return Err(PlaylistError::DuplicateTrack);
        }

        let liked = self.liked.contains(id.as_str());
        self.tracks.push(Track::pending(url, id.clone(), liked));
        tracing::info!(id = %id, "track added");

        if self.current.is_none() {
            self.current = Some(self.tracks.len() - 1);
            self.bind_current();
        }
        self.add_in_flight = Some(id.clone());
        Ok(id)
    }

    /// Applies a fetched title, or the synthesized fallback when the fetch
    /// came back empty. A resolution for a track that was removed in the
    /// meantime is a no-op apart from clearing the in-flight guard.
    pub fn resolve_title(&mut self, id: &str, title: Option<String>) {
        if self.add_in_flight.as_ref().is_some_and(|f| f.as_str() == id) {
            self.add_in_flight = None;
        }
        let Some(track) = self.tracks.iter_mut().find(|t| t.id.as_str() == id) else {
            tracing::debug!(id, "title resolved for a track that is gone");
            return;
        };
        track.title = match title {
            Some(t) => t,
            None => Track::fallback_title(&track.id),
        };
        track.is_loading = false;
    }

    /// Removes the entry at `index`. Removing the current track hands the
    /// selection to the track that now occupies the same index, wrapping to
    /// the start; removing the last remaining track tears the player down.
    pub fn remove_track(&mut self, index: usize) {
        debug_assert!(index < self.tracks.len(), "remove_track index out of bounds");
        if index >= self.tracks.len() {
            return;
        }
        let removed = self.tracks.remove(index);
        tracing::info!(id = %removed.id, "track removed");

        match self.current {
            Some(cur) if cur == index => {
                if self.tracks.is_empty() {
                    self.current = None;
                    self.unbind();
                } else {
                    let next = if index >= self.tracks.len() { 0 } else { index };
                    self.current = Some(next);
                    self.bind_current();
                }
            }
            Some(cur) if index < cur => {
                // The current track shifted down one slot; playback is
                // untouched.
                self.current = Some(cur - 1);
            }
            _ => {}
        }
    }

    pub fn select(&mut self, index: usize) {
        debug_assert!(index < self.tracks.len(), "select index out of bounds");
        if index >= self.tracks.len() {
            return;
        }
        self.current = Some(index);
        self.bind_current();
    }

    /// Advance according to repeat and shuffle. With repeat off the playlist
    /// simply stops after the last track.
    pub fn next(&mut self) {
        let Some(cur) = self.current else { return };
        let len = self.tracks.len();
        if len == 0 {
            return;
        }

        if self.playback.repeat == RepeatMode::One {
            self.restart_bound();
            return;
        }

        let target = if self.playback.shuffle {
            if len == 1 {
                self.restart_bound();
                return;
            }
            let mut pick = rand::thread_rng().gen_range(0..len - 1);
            if pick >= cur {
                pick += 1;
            }
            pick
        } else if cur + 1 < len {
            cur + 1
        } else if self.playback.repeat == RepeatMode::All {
            0
        } else {
            return;
        };

        self.current = Some(target);
        self.bind_current();
    }

    /// Step backwards, wrapping from the first track to the last. Shuffle
    /// and repeat do not apply here.
    pub fn previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let target = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.current = Some(target);
        self.bind_current();
    }

    pub fn toggle_play_pause(&mut self) -> bool {
        match &mut self.binding {
            Binding::Bound { handle, .. } => {
                if self.playback.is_playing {
                    let _ = handle.pause();
                    self.playback.is_playing = false;
                } else {
                    if self.playback.duration_secs > 0.0
                        && self.playback.position_secs >= self.playback.duration_secs
                    {
                        let _ = handle.seek(0.0);
                        self.playback.position_secs = 0.0;
                    }
                    let _ = handle.play();
                    self.playback.is_playing = true;
                }
            }
            // Nothing bound yet (first play, or an earlier spawn failed):
            // binding the current selection starts playback.
            _ => {
                if self.current.is_some() {
                    self.bind_current();
                }
            }
        }
        self.playback.is_playing
    }

    /// Jump to a fraction of the known duration. Does nothing until a
    /// duration has been observed.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if self.playback.duration_secs <= 0.0 {
            return;
        }
        let target = fraction.clamp(0.0, 1.0) * self.playback.duration_secs;
        if let Binding::Bound { handle, .. } = &mut self.binding {
            let _ = handle.seek(target);
            self.playback.position_secs = target;
        }
    }

    /// Volume and mute move together: 0 always means muted, and raising the
    /// volume from 0 unmutes.
    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        self.playback.volume = volume;
        if volume == 0 {
            self.playback.muted = true;
        } else if self.playback.muted {
            self.playback.muted = false;
        }
        self.apply_volume();
    }

    pub fn volume_up(&mut self) -> u8 {
        let v = self.playback.volume.saturating_add(VOLUME_STEP).min(100);
        self.set_volume(v);
        v
    }

    pub fn volume_down(&mut self) -> u8 {
        let v = self.playback.volume.saturating_sub(VOLUME_STEP);
        self.set_volume(v);
        v
    }

    pub fn toggle_mute(&mut self) -> bool {
        if self.playback.muted {
            self.playback.muted = false;
            if self.playback.volume == 0 {
                self.playback.volume = UNMUTE_VOLUME;
            }
        } else {
            self.playback.muted = true;
        }
        self.apply_volume();
        self.playback.muted
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.playback.shuffle = !self.playback.shuffle;
        self.playback.shuffle
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.playback.repeat = self.playback.repeat.cycle();
        self.playback.repeat
    }

    /// Hide or show the video surface. Playback keeps running either way.
    pub fn toggle_video(&mut self) -> bool {
        self.video_hidden = !self.video_hidden;
        if let Binding::Bound { handle, .. } = &mut self.binding {
            let _ = handle.set_video_visible(!self.video_hidden);
        }
        self.video_hidden
    }

    pub fn toggle_liked(&mut self, index: usize) -> Option<bool> {
        let track = self.tracks.get_mut(index)?;
        track.liked = !track.liked;
        if track.liked {
            self.liked.insert(track.id.as_str().to_string());
        } else {
            self.liked.remove(track.id.as_str());
        }
        Some(track.liked)
    }

    /// Fast-cadence housekeeping: the delayed volume re-apply.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(at) = self.volume_retry_at {
            if now >= at {
                self.volume_retry_at = None;
                self.apply_volume_now();
            }
        }
    }

    /// Once-a-second poll: drain player notifications into the mirror and
    /// advance when the bound track ended. Progress is only accepted while
    /// playing and no add is resolving.
    pub fn on_poll(&mut self) {
        let accept_progress = self.playback.is_playing && self.add_in_flight.is_none();
        let mut ended = false;
        if let Binding::Bound { handle, .. } = &mut self.binding {
            for event in handle.drain_events() {
                match event {
                    PlayerEvent::Position(p) if accept_progress && p > 0.0 => {
                        self.playback.position_secs = p;
                    }
                    PlayerEvent::Duration(d) if accept_progress && d > 0.0 => {
                        self.playback.duration_secs = d;
                    }
                    PlayerEvent::Playing => self.playback.is_playing = true,
                    PlayerEvent::Paused => self.playback.is_playing = false,
                    PlayerEvent::Ended => ended = true,
                    _ => {}
                }
            }
        }
        if ended {
            self.playback.is_playing = false;
            self.next();
        }
    }

    pub fn teardown(&mut self) {
        self.unbind();
        self.binding = Binding::Destroyed;
    }

    /// Restart the bound instance from the top without rebinding.
    fn restart_bound(&mut self) {
        if let Binding::Bound { handle, .. } = &mut self.binding {
            let _ = handle.seek(0.0);
            let _ = handle.play();
            self.playback.position_secs = 0.0;
            self.playback.is_playing = true;
        }
    }

    /// Bind the player to the current track. Re-binding to the id that is
    /// already bound never creates a new instance; it only resumes (and
    /// rewinds first when the track had played to its end).
    fn bind_current(&mut self) {
        let Some(index) = self.current else { return };
        let Some(track) = self.tracks.get(index) else { return };
        let id = track.id.clone();

        if let Binding::Bound {
            id: bound, handle, ..
        } = &mut self.binding
        {
            if *bound == id {
                if self.playback.duration_secs > 0.0
                    && self.playback.position_secs >= self.playback.duration_secs
                {
                    let _ = handle.seek(0.0);
                    self.playback.position_secs = 0.0;
                }
                if !self.playback.is_playing {
                    let _ = handle.play();
                    self.playback.is_playing = true;
                }
                return;
            }
        }

        if matches!(self.binding, Binding::Uninitialized) {
            self.binding = if self.spawner.available() {
                Binding::Ready
            } else {
                Binding::Unavailable
            };
        }
        if matches!(self.binding, Binding::Unavailable | Binding::Destroyed) {
            return;
        }

        // Tear the previous instance down before creating the new one.
        self.unbind();

        let settings = SpawnSettings {
            volume: self.playback.volume,
            muted: self.playback.muted,
            video_visible: !self.video_hidden,
        };
        match self.spawner.spawn(id.as_str(), &settings) {
            Ok(handle) => {
                self.binding = Binding::Bound { id, handle };
                self.playback.is_playing = true;
                self.volume_retry_at = Some(Instant::now() + VOLUME_RETRY);
            }
            Err(e) => {
                tracing::warn!(id = %id, "player spawn failed: {e:#}");
                self.playback.is_playing = false;
            }
        }
    }

    fn unbind(&mut self) {
        if matches!(self.binding, Binding::Bound { .. }) {
            if let Binding::Bound { mut handle, .. } =
                std::mem::replace(&mut self.binding, Binding::Ready)
            {
                handle.shutdown();
            }
        }
        self.playback.is_playing = false;
        self.playback.position_secs = 0.0;
        self.playback.duration_secs = 0.0;
    }

    fn apply_volume(&mut self) {
        self.apply_volume_now();
        self.volume_retry_at = Some(Instant::now() + VOLUME_RETRY);
    }

    fn apply_volume_now(&mut self) {
        if let Binding::Bound { handle, .. } = &mut self.binding {
            let _ = handle.set_volume(self.playback.volume);
            let _ = handle.set_muted(self.playback.muted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Script {
        commands: Vec<String>,
        events: Vec<PlayerEvent>,
    }

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Script>>);

    impl Shared {
        fn push_event(&self, event: PlayerEvent) {
            self.0.lock().unwrap().events.push(event);
        }

        fn commands(&self) -> Vec<String> {
            self.0.lock().unwrap().commands.clone()
        }

        fn count(&self, cmd: &str) -> usize {
            self.commands().iter().filter(|c| c.as_str() == cmd).count()
        }
    }

    struct FakeHandle {
        shared: Shared,
    }

    impl FakeHandle {
        fn log(&mut self, cmd: String) -> Result<()> {
            self.shared.0.lock().unwrap().commands.push(cmd);
            Ok(())
        }
    }

    impl PlayerHandle for FakeHandle {
        fn play(&mut self) -> Result<()> {
            self.log("play".into())
        }
        fn pause(&mut self) -> Result<()> {
            self.log("pause".into())
        }
        fn seek(&mut self, secs: f64) -> Result<()> {
            self.log(format!("seek {secs}"))
        }
        fn set_volume(&mut self, volume: u8) -> Result<()> {
            self.log(format!("volume {volume}"))
        }
        fn set_muted(&mut self, muted: bool) -> Result<()> {
            self.log(format!("mute {muted}"))
        }
        fn set_video_visible(&mut self, visible: bool) -> Result<()> {
            self.log(format!("vid {visible}"))
        }
        fn drain_events(&mut self) -> Vec<PlayerEvent> {
            std::mem::take(&mut self.shared.0.lock().unwrap().events)
        }
        fn shutdown(&mut self) {
            let _ = self.log("shutdown".into());
        }
    }

    struct FakeSpawner {
        spawned: Arc<AtomicUsize>,
        available: bool,
        shared: Shared,
    }

    impl PlayerSpawner for FakeSpawner {
        fn available(&mut self) -> bool {
            self.available
        }
        fn spawn(
            &mut self,
            _video_id: &str,
            _settings: &SpawnSettings,
        ) -> Result<Box<dyn PlayerHandle>> {
            self.spawned.fetch_add(1, Ordering::SeqCst);
            *self.shared.0.lock().unwrap() = Script::default();
            Ok(Box::new(FakeHandle {
                shared: self.shared.clone(),
            }))
        }
    }

    fn controller() -> (MusicController, Arc<AtomicUsize>, Shared) {
        let spawned = Arc::new(AtomicUsize::new(0));
        let shared = Shared::default();
        let spawner = FakeSpawner {
            spawned: spawned.clone(),
            available: true,
            shared: shared.clone(),
        };
        (MusicController::new(Box::new(spawner)), spawned, shared)
    }

    fn add_resolved(music: &mut MusicController, id: &str) {
        let got = music.add_track(id).unwrap();
        assert_eq!(got.as_str(), id);
        music.resolve_title(id, Some(format!("Track {id}")));
    }

    #[test]
    fn add_appends_placeholder_and_autoselects() {
        let (mut music, spawned, _) = controller();
        let id = music
            .add_track("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(music.tracks().len(), 1);
        assert!(music.tracks()[0].is_loading);
        assert_eq!(music.tracks()[0].title, "Loading…");
        assert_eq!(music.current_index(), Some(0));
        assert_eq!(music.bound_id(), Some("dQw4w9WgXcQ"));
        assert_eq!(spawned.load(Ordering::SeqCst), 1);
        assert!(music.playback().is_playing);
    }

    #[test]
    fn add_rejects_bad_input_and_duplicates() {
        let (mut music, _, _) = controller();
        assert_eq!(
            music.add_track("https://example.com/nope"),
            Err(PlaylistError::InvalidUrl)
        );
        assert_eq!(
            music.add_track("https://www.youtube.com/watch?v=short"),
            Err(PlaylistError::IdExtractionFailed)
        );
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert_eq!(
            music.add_track("https://youtu.be/dQw4w9WgXcQ"),
            Err(PlaylistError::DuplicateTrack)
        );
        assert_eq!(music.tracks().len(), 1);
    }

    #[test]
    fn second_add_is_ignored_while_title_resolves() {
        let (mut music, _, _) = controller();
        music.add_track("dQw4w9WgXcQ").unwrap();
        assert_eq!(
            music.add_track("aaaaaaaaaaa"),
            Err(PlaylistError::AddInFlight)
        );
        assert_eq!(music.tracks().len(), 1);

        music.resolve_title("dQw4w9WgXcQ", Some("Title".into()));
        assert!(music.add_track("aaaaaaaaaaa").is_ok());
        assert_eq!(music.tracks().len(), 2);
    }

    #[test]
    fn failed_fetch_falls_back_to_synthesized_title() {
        let (mut music, _, _) = controller();
        music.add_track("dQw4w9WgXcQ").unwrap();
        music.resolve_title("dQw4w9WgXcQ", None);
        assert_eq!(music.tracks()[0].title, "YouTube Video: dQw4w9WgXcQ");
        assert!(!music.tracks()[0].is_loading);
        assert!(!music.is_add_in_flight());
    }

    #[test]
    fn late_title_for_removed_track_is_a_noop() {
        let (mut music, _, _) = controller();
        music.add_track("dQw4w9WgXcQ").unwrap();
        music.remove_track(0);
        music.resolve_title("dQw4w9WgXcQ", Some("Too late".into()));
        assert!(music.tracks().is_empty());
        assert!(!music.is_add_in_flight());
    }

    #[test]
    fn removing_current_track_selects_same_slot() {
        let (mut music, spawned, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        add_resolved(&mut music, "ccccccccccc");
        music.select(1);
        let before = spawned.load(Ordering::SeqCst);

        music.remove_track(1);
        assert_eq!(music.current_index(), Some(1));
        assert_eq!(music.tracks()[1].id.as_str(), "ccccccccccc");
        assert_eq!(music.bound_id(), Some("ccccccccccc"));
        assert_eq!(spawned.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn removing_last_current_track_wraps_to_start() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        music.select(1);
        music.remove_track(1);
        assert_eq!(music.current_index(), Some(0));
        assert_eq!(music.bound_id(), Some("aaaaaaaaaaa"));
    }

    #[test]
    fn removing_before_current_shifts_selection_without_rebinding() {
        let (mut music, spawned, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        add_resolved(&mut music, "ccccccccccc");
        music.select(2);
        let before = spawned.load(Ordering::SeqCst);

        music.remove_track(0);
        assert_eq!(music.current_index(), Some(1));
        assert_eq!(music.bound_id(), Some("ccccccccccc"));
        assert_eq!(spawned.load(Ordering::SeqCst), before);
    }

    #[test]
    fn removing_only_track_tears_the_player_down() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert!(music.bound_id().is_some());
        music.remove_track(0);
        assert_eq!(music.current_index(), None);
        assert_eq!(music.bound_id(), None);
        assert!(!music.playback().is_playing);
        assert_eq!(music.playback().position_secs, 0.0);
    }

    #[test]
    fn next_stops_at_end_without_repeat() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        music.select(1);
        music.next();
        assert_eq!(music.current_index(), Some(1));
    }

    #[test]
    fn next_wraps_with_repeat_all() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        music.select(1);
        music.cycle_repeat(); // All
        music.next();
        assert_eq!(music.current_index(), Some(0));
        assert_eq!(music.bound_id(), Some("aaaaaaaaaaa"));
    }

    #[test]
    fn next_with_repeat_one_restarts_in_place() {
        let (mut music, spawned, shared) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        music.cycle_repeat();
        music.cycle_repeat(); // One
        let before = spawned.load(Ordering::SeqCst);

        music.next();
        assert_eq!(music.current_index(), Some(0));
        assert_eq!(spawned.load(Ordering::SeqCst), before);
        assert_eq!(shared.count("seek 0"), 1);
    }

    #[test]
    fn shuffle_with_one_track_restarts_in_place() {
        let (mut music, spawned, shared) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        music.toggle_shuffle();
        let before = spawned.load(Ordering::SeqCst);
        music.next();
        assert_eq!(music.current_index(), Some(0));
        assert_eq!(spawned.load(Ordering::SeqCst), before);
        assert_eq!(shared.count("seek 0"), 1);
    }

    #[test]
    fn previous_wraps_to_last() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        add_resolved(&mut music, "ccccccccccc");
        music.previous();
        assert_eq!(music.current_index(), Some(2));
        music.previous();
        assert_eq!(music.current_index(), Some(1));
    }

    #[test]
    fn shuffle_never_repicks_the_current_track() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        add_resolved(&mut music, "ccccccccccc");
        music.toggle_shuffle();
        for _ in 0..20 {
            let before = music.current_index();
            music.next();
            assert_ne!(music.current_index(), before);
        }
    }

    #[test]
    fn reselecting_the_bound_track_does_not_respawn() {
        let (mut music, spawned, shared) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert_eq!(spawned.load(Ordering::SeqCst), 1);

        // Simulate a user pause, then reselect the same entry.
        shared.push_event(PlayerEvent::Paused);
        music.on_poll();
        assert!(!music.playback().is_playing);

        music.select(0);
        assert_eq!(spawned.load(Ordering::SeqCst), 1);
        assert!(music.playback().is_playing);
        assert!(shared.count("play") >= 1);
    }

    #[test]
    fn ended_track_advances_and_respawns() {
        let (mut music, spawned, shared) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        add_resolved(&mut music, "bbbbbbbbbbb");
        shared.push_event(PlayerEvent::Ended);
        music.on_poll();
        assert_eq!(music.current_index(), Some(1));
        assert_eq!(music.bound_id(), Some("bbbbbbbbbbb"));
        assert_eq!(spawned.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn ended_last_track_without_repeat_just_stops() {
        let (mut music, _, shared) = controller();
        add_resolved(&mut music, "aaaaaaaaaaa");
        shared.push_event(PlayerEvent::Ended);
        music.on_poll();
        assert_eq!(music.current_index(), Some(0));
        assert!(!music.playback().is_playing);
    }

    #[test]
    fn volume_zero_couples_to_mute() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        music.set_volume(0);
        assert!(music.playback().muted);
        music.volume_up();
        assert_eq!(music.playback().volume, VOLUME_STEP);
        assert!(!music.playback().muted);
    }

    #[test]
    fn unmuting_at_zero_restores_an_audible_volume() {
        let (mut music, _, _) = controller();
        music.set_volume(0);
        assert!(music.playback().muted);
        music.toggle_mute();
        assert!(!music.playback().muted);
        assert_eq!(music.playback().volume, UNMUTE_VOLUME);
    }

    #[test]
    fn volume_is_applied_again_after_the_retry_delay() {
        let (mut music, _, shared) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        music.set_volume(70);
        assert_eq!(shared.count("volume 70"), 1);
        music.on_tick(Instant::now() + Duration::from_millis(400));
        assert_eq!(shared.count("volume 70"), 2);
    }

    #[test]
    fn hiding_video_never_touches_playback() {
        let (mut music, _, shared) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        music.toggle_video();
        music.toggle_video();
        assert_eq!(shared.count("vid false"), 1);
        assert_eq!(shared.count("vid true"), 1);
        assert_eq!(shared.count("pause"), 0);
        assert!(music.playback().is_playing);
    }

    #[test]
    fn progress_updates_are_held_back_while_an_add_resolves() {
        let (mut music, _, shared) = controller();
        music.add_track("dQw4w9WgXcQ").unwrap();
        shared.push_event(PlayerEvent::Position(12.0));
        shared.push_event(PlayerEvent::Duration(200.0));
        music.on_poll();
        assert_eq!(music.playback().position_secs, 0.0);
        assert_eq!(music.playback().duration_secs, 0.0);

        music.resolve_title("dQw4w9WgXcQ", Some("Title".into()));
        shared.push_event(PlayerEvent::Position(13.0));
        shared.push_event(PlayerEvent::Duration(200.0));
        music.on_poll();
        assert_eq!(music.playback().position_secs, 13.0);
        assert_eq!(music.playback().duration_secs, 200.0);
    }

    #[test]
    fn missing_backend_keeps_playlist_usable() {
        let spawned = Arc::new(AtomicUsize::new(0));
        let spawner = FakeSpawner {
            spawned: spawned.clone(),
            available: false,
            shared: Shared::default(),
        };
        let mut music = MusicController::new(Box::new(spawner));
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert_eq!(music.current_index(), Some(0));
        assert!(music.player_unavailable());
        assert_eq!(music.bound_id(), None);
        assert_eq!(spawned.load(Ordering::SeqCst), 0);
        // Transport stays inert but the list itself keeps working.
        music.toggle_play_pause();
        assert!(!music.playback().is_playing);
    }

    #[test]
    fn liked_tracks_survive_readding() {
        let (mut music, _, _) = controller();
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert_eq!(music.toggle_liked(0), Some(true));
        assert_eq!(music.liked_ids(), vec!["dQw4w9WgXcQ".to_string()]);

        // Likes are keyed by id, so they stick across remove and re-add.
        music.remove_track(0);
        add_resolved(&mut music, "dQw4w9WgXcQ");
        assert!(music.tracks()[0].liked);
    }
}
