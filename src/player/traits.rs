use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Repeat behavior once the bound track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepeatMode::Off => "Off",
            RepeatMode::All => "All",
            RepeatMode::One => "One",
        }
    }
}

/// Settings a freshly spawned player instance starts with. The playlist
/// controller remembers these across rebinds so every new instance comes up
/// with the volume, mute and video state the user last chose.
#[derive(Debug, Clone, Copy)]
pub struct SpawnSettings {
    pub volume: u8,
    pub muted: bool,
    pub video_visible: bool,
}

/// Notifications drained from a running player instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    Playing,
    Paused,
    /// The bound track played to its natural end.
    Ended,
    /// Playback position in seconds.
    Position(f64),
    /// Track duration in seconds.
    Duration(f64),
}

/// One bound player instance. Exactly one exists per bound track; rebinding
/// to a different track tears the old instance down and spawns a new one.
pub trait PlayerHandle: Send {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Absolute seek, in seconds.
    fn seek(&mut self, secs: f64) -> Result<()>;
    fn set_volume(&mut self, volume: u8) -> Result<()>;
    fn set_muted(&mut self, muted: bool) -> Result<()>;
    /// Show or hide the video surface without touching playback.
    fn set_video_visible(&mut self, visible: bool) -> Result<()>;
    /// Drain whatever state-change notifications arrived since the last
    /// call. Never blocks.
    fn drain_events(&mut self) -> Vec<PlayerEvent>;
    fn shutdown(&mut self);
}

/// Creates player instances. The playlist controller only ever talks to this
/// trait, so tests can count and script instance creation.
pub trait PlayerSpawner: Send {
    /// Whether a playback backend is present at all. Probed once per
    /// process; cheap to call repeatedly.
    fn available(&mut self) -> bool;
    fn spawn(&mut self, video_id: &str, settings: &SpawnSettings) -> Result<Box<dyn PlayerHandle>>;
}
