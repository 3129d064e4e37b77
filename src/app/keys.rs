use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub toggle_keyhints: String,
    pub theme_picker: String,
    pub focus_next: String,

    // Focus timer
    pub timer_toggle: String,
    pub timer_reset: String,

    // Transport (active from either panel)
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub volume_up: String,
    pub volume_down: String,
    pub mute: String,
    pub shuffle: String,
    pub repeat: String,
    pub toggle_video: String,
    pub seek_forward: String,
    pub seek_backward: String,

    // Panel-local (meaning depends on the focused panel)
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub select: String,
    pub add: String,
    pub delete_item: String,
    pub edit_task: String,
    pub like: String,
    pub undo: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_keyhints: "?".to_string(),
            theme_picker: "t".to_string(),
            focus_next: "Tab".to_string(),

            timer_toggle: "f".to_string(),
            timer_reset: "F".to_string(),

            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            mute: "m".to_string(),
            shuffle: "z".to_string(),
            repeat: "x".to_string(),
            toggle_video: "v".to_string(),
            seek_forward: "l".to_string(),
            seek_backward: "h".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            select: "Enter".to_string(),
            add: "a".to_string(),
            delete_item: "d".to_string(),
            edit_task: "e".to_string(),
            like: "L".to_string(),
            undo: "u".to_string(),
        }
    }
}

/// Key names accepted in config files besides plain single characters.
fn named_key(key_str: &str) -> Option<KeyCode> {
    Some(match key_str {
        "Space" => KeyCode::Char(' '),
        "Enter" => KeyCode::Enter,
        "Backspace" => KeyCode::Backspace,
        "Esc" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        _ => return None,
    })
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        if let Some(code) = named_key(key_str) {
            return event.code == code;
        }

        let mut chars = key_str.chars();
        match (chars.next(), chars.next()) {
            // Uppercase bindings also accept shift+lowercase.
            (Some(ch), None) if ch.is_uppercase() => {
                event.code == KeyCode::Char(ch)
                    || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                        && event.modifiers.contains(KeyModifiers::SHIFT))
            }
            (Some(ch), None) => event.code == KeyCode::Char(ch),
            _ => false,
        }
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Space" => "Space",
            "Up" => "↑",
            "Down" => "↓",
            "Left" => "←",
            "Right" => "→",
            "BackTab" => "S-Tab",
            "Backspace" => "Bksp",
            other => other,
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn named_keys_match_their_codes() {
        let keys = KeyConfig::default();
        assert!(keys.matches(press(KeyCode::Tab, KeyModifiers::NONE), &keys.focus_next));
        assert!(keys.matches(press(KeyCode::Char(' '), KeyModifiers::NONE), &keys.play_pause));
        assert!(!keys.matches(press(KeyCode::Enter, KeyModifiers::NONE), &keys.play_pause));
    }

    #[test]
    fn uppercase_binding_accepts_shifted_lowercase() {
        let keys = KeyConfig::default();
        assert!(keys.matches(press(KeyCode::Char('L'), KeyModifiers::NONE), &keys.like));
        assert!(keys.matches(press(KeyCode::Char('l'), KeyModifiers::SHIFT), &keys.like));
        // Plain lowercase is its own binding (seek), not the liked toggle.
        assert!(!keys.matches(press(KeyCode::Char('l'), KeyModifiers::NONE), &keys.like));
    }
}
