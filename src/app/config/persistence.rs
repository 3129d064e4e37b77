use serde::{Deserialize, Serialize};
use std::fs;

use crate::player::RepeatMode;

/// Automatically saved session state,
/// stored in `state.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_volume")]
    pub volume: u8,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub repeat: RepeatMode,
    #[serde(default)]
    pub video_hidden: bool,
    /// Video ids the user has liked, remembered across sessions.
    #[serde(default)]
    pub liked: Vec<String>,
}

fn default_theme() -> String {
    "Green".to_string()
}

fn default_volume() -> u8 {
    80
}

impl Default for PersistentState {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            volume: default_volume(),
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            video_hidden: false,
            liked: Vec::new(),
        }
    }
}

impl PersistentState {
    pub fn save(&self) {
        let path = super::AppConfig::get_state_path();
        if let Ok(content) = toml::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }
}
