use ratatui::style::Color;

/// The selectable accent colors. The rest of the chrome never changes;
/// picking a theme swaps the accent everywhere at once.
pub const ACCENTS: [(&str, Color); 7] = [
    ("Green", Color::Rgb(74, 222, 128)),
    ("Red", Color::Rgb(248, 113, 113)),
    ("Blue", Color::Rgb(96, 165, 250)),
    ("Yellow", Color::Rgb(250, 204, 21)),
    ("Cyan", Color::Rgb(34, 211, 238)),
    ("Magenta", Color::Rgb(232, 121, 249)),
    ("White", Color::Rgb(255, 255, 255)),
];

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
}

impl Theme {
    /// Look a theme up by its display name, case-insensitively. Unknown
    /// names fall back to the default green.
    pub fn by_name(name: &str) -> Self {
        let (name, accent) = ACCENTS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .copied()
            .unwrap_or(ACCENTS[0]);
        Self {
            name: name.to_string(),
            accent,
            text: Color::Rgb(229, 231, 235),
            dim: Color::Rgb(107, 114, 128),
            border: Color::Rgb(55, 65, 81),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::by_name("Green")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_green() {
        let theme = Theme::by_name("Vantablack");
        assert_eq!(theme.name, "Green");
        assert_eq!(theme.accent, ACCENTS[0].1);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Theme::by_name("cyan").name, "Cyan");
    }
}
