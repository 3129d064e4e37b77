use crate::app::{App, PanelFocus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    if !app.show_keyhints {
        return;
    }
    let theme = &app.theme;

    // 🎹 WhichKey-style floating popup (Helix-inspired)

    // Context-specific keybindings with icons.
    // Use String for key display to support dynamic config
    let (title, keys): (&str, Vec<(String, &str, &str)>) = match app.focus {
        PanelFocus::Music => (
            "Music",
            vec![
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "▶️", "Play track"),
                (app.keys.display(&app.keys.add), "➕", "Add YouTube link"),
                (app.keys.display(&app.keys.delete_item), "🗑️", "Remove track"),
                (app.keys.display(&app.keys.like), "♥", "Like/Unlike"),
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.seek_backward),
                        app.keys.display(&app.keys.seek_forward)
                    ),
                    "⏩",
                    "Seek ±5s",
                ),
            ],
        ),
        PanelFocus::Tasks => (
            "Tasks",
            vec![
                (
                    format!(
                        "{}/{}",
                        app.keys.display(&app.keys.nav_down),
                        app.keys.display(&app.keys.nav_up)
                    ),
                    "📋",
                    "Navigate",
                ),
                (app.keys.display(&app.keys.select), "✅", "Toggle done"),
                (app.keys.display(&app.keys.add), "➕", "Add task"),
                (app.keys.display(&app.keys.edit_task), "✏️", "Edit task"),
                (app.keys.display(&app.keys.delete_item), "🗑️", "Delete task"),
                (app.keys.display(&app.keys.undo), "↩", "Undo delete"),
            ],
        ),
    };

    let global_keys: Vec<(String, &str, &str)> = vec![
        (app.keys.display(&app.keys.play_pause), "▶️", "Play/Pause"),
        (app.keys.display(&app.keys.next_track), "⏭️", "Next track"),
        (
            app.keys.display(&app.keys.prev_track),
            "⏮️",
            "Previous track",
        ),
        (
            format!(
                "{}/{}",
                app.keys.display(&app.keys.volume_up),
                app.keys.display(&app.keys.volume_down)
            ),
            "🔊",
            "Volume",
        ),
        (app.keys.display(&app.keys.mute), "🔇", "Mute"),
        (app.keys.display(&app.keys.shuffle), "🔀", "Shuffle"),
        (app.keys.display(&app.keys.repeat), "🔁", "Repeat mode"),
        (app.keys.display(&app.keys.toggle_video), "📺", "Show/Hide video"),
        (
            format!(
                "{}/{}",
                app.keys.display(&app.keys.timer_toggle),
                app.keys.display(&app.keys.timer_reset)
            ),
            "⏱️",
            "Timer start/reset",
        ),
        (app.keys.display(&app.keys.focus_next), "🔄", "Switch panel"),
        (app.keys.display(&app.keys.theme_picker), "🎨", "Theme"),
        (app.keys.display(&app.keys.quit), "🚪", "Quit"),
    ];

    // Build popup content first to calculate exact height
    let key_row = |(key, icon, desc): &(String, &'static str, &'static str)| {
        Line::from(vec![
            Span::styled(
                format!(" {:<7} ", key),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.dim)),
            Span::raw(format!("{} ", icon)),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ])
    };

    let mut lines: Vec<Line> = keys.iter().map(key_row).collect();

    if !keys.is_empty() {
        lines.push(Line::from(""));
    }

    // Global section - left aligned with divider
    lines.push(Line::from(Span::styled(
        "────── Global ──────",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.extend(global_keys.iter().map(key_row));

    // Fit the popup to its content 📏
    let content_width = keys
        .iter()
        .chain(global_keys.iter())
        .map(|(k, _i, d)| {
            // padding(1) + key(min 7) + padding(1) + spacer(3) + icon/space(3) + desc
            2 + k.len().max(7) + 3 + 3 + d.len()
        })
        .max()
        .unwrap_or(20)
        .max(22); // "────── Global ──────" length

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height); // +2 for borders
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    // Position at bottom-right
    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, popup_area);
}
