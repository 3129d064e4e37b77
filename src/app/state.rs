use std::time::{Duration, Instant};

use super::config::{PersistentState, UserConfig};
use super::keys::KeyConfig;
use crate::player::PlayerSpawner;
use crate::playlist::MusicController;
use crate::tasks::TaskStore;
use crate::timer::FocusTimer;
use crate::ui::theme::Theme;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Which panel keyboard navigation currently applies to 🎛️
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelFocus {
    #[default]
    Music,
    Tasks,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            PanelFocus::Music => PanelFocus::Tasks,
            PanelFocus::Tasks => PanelFocus::Music,
        }
    }
}

/// Generic Input Popup Mode 📝
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    AddTrack,
    AddTask,
    EditTask(usize), // Carries the task index
}

/// Generic Input Popup State 📝
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub title: String,
    pub value: String,
}

impl InputState {
    pub fn new(mode: InputMode, title: &str, initial_value: &str) -> Self {
        Self {
            mode,
            title: title.to_string(),
            value: initial_value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,

    pub is_running: bool,
    pub focus: PanelFocus,

    /// Playlist plus the bound player 🎵
    pub music: MusicController,
    pub music_selected: usize,

    /// Task list with undoable deletes 📋
    pub tasks: TaskStore,
    pub task_selected: usize,

    pub timer: FocusTimer,

    /// UI State
    pub show_keyhints: bool,
    /// Highlighted row while the theme picker popup is open.
    pub theme_picker: Option<usize>,
    pub input_state: Option<InputState>,
    pub toast: Option<Toast>,
    /// The missing-player toast fires only once per session.
    pub warned_no_player: bool,
}

impl App {
    pub fn new(
        user: UserConfig,
        state: PersistentState,
        tasks: TaskStore,
        spawner: Box<dyn PlayerSpawner>,
    ) -> Self {
        let mut music = MusicController::new(spawner);
        music.restore(
            state.volume,
            state.muted,
            state.shuffle,
            state.repeat,
            state.video_hidden,
            state.liked.clone(),
        );

        Self {
            theme: Theme::by_name(&state.theme),
            keys: user.keys,
            is_running: true,
            focus: PanelFocus::default(),
            music,
            music_selected: 0,
            tasks,
            task_selected: 0,
            timer: FocusTimer::new(user.focus_minutes),
            show_keyhints: false,
            theme_picker: None,
            input_state: None,
            toast: None,
            warned_no_player: false,
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + TOAST_DURATION;

        if let Some(ref mut current) = self.toast {
            // Intelligent Update: replace the message and extend the
            // deadline but keep start_time, so rapid toasts don't replay
            // the entrance animation.
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called on the fast tick: expiry checks and the delayed volume
    /// re-apply.
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
        self.tasks.on_tick();
        self.music.on_tick(Instant::now());
    }

    /// Called once a second: the focus timer and the player poll.
    pub fn on_poll(&mut self) {
        if self.timer.tick() {
            self.show_toast("Focus session complete!");
        }
        self.music.on_poll();
    }

    /// Write the current session back to `state.toml`.
    pub fn save_state(&self) {
        let playback = self.music.playback();
        let state = PersistentState {
            theme: self.theme.name.clone(),
            volume: playback.volume,
            muted: playback.muted,
            shuffle: playback.shuffle,
            repeat: playback.repeat,
            video_hidden: self.music.video_hidden(),
            liked: self.music.liked_ids(),
        };
        state.save();
    }
}
