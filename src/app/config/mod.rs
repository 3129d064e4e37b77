use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::UserConfig;

/// Parse a TOML file into `T`, falling back to `T::default()` when the file
/// is missing, unreadable or malformed. Configuration problems must never
/// stop the app from starting.
fn read_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let dir = base.join("lockin");

        // Ensure it exists
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }

        dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn get_tasks_path() -> PathBuf {
        Self::get_config_dir().join("tasks.json")
    }

    pub fn get_log_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("lockin").join("logs")
    }

    /// Load both halves of the configuration: the user-edited `config.toml`
    /// and the app-managed `state.toml`. A missing config file is written out
    /// with defaults so there is something to edit.
    pub fn load() -> (UserConfig, PersistentState) {
        let config_path = Self::get_config_path();
        if !config_path.exists() {
            let defaults = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&defaults) {
                let _ = fs::write(&config_path, content);
            }
        }

        let user = read_toml_or_default(&config_path);
        let state = read_toml_or_default(&Self::get_state_path());
        (user, state)
    }
}
