use serde::{Deserialize, Serialize};

/// User-editable configuration (read-only for the app after load),
/// stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
    /// Player binary spawned for playback.
    #[serde(default = "default_mpv_binary")]
    pub mpv_binary: String,
    /// Focus session length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
}

fn default_mpv_binary() -> String {
    "mpv".to_string()
}

fn default_focus_minutes() -> u32 {
    25
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            keys: crate::app::keys::KeyConfig::default(),
            mpv_binary: default_mpv_binary(),
            focus_minutes: default_focus_minutes(),
        }
    }
}
