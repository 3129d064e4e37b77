use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Entrance and exit slide take this long each; the hold in between comes
/// from the toast deadline.
const SLIDE_MS: u128 = 300;

pub fn render(f: &mut Frame, app: &App) {
    // Auto-dismiss handled in App::on_tick()
    let Some(toast) = &app.toast else { return };
    let theme = &app.theme;
    let now = std::time::Instant::now();

    // Display width, not byte length: toast messages are full of emoji.
    let text_cols = UnicodeWidthStr::width(toast.message.as_str()) as u16;
    let width = (text_cols + 6).min(f.area().width.saturating_sub(4));
    let target_x = f.area().width.saturating_sub(width + 1); // Top-right fixed

    // Animation: Slide In/Out 🌊
    let entrance_elapsed = now.duration_since(toast.start_time).as_millis();
    let time_remaining = toast.deadline.saturating_duration_since(now).as_millis();
    let offset = if entrance_elapsed < SLIDE_MS {
        // Sliding in from the right edge, Cubic Out
        let t = entrance_elapsed as f32 / SLIDE_MS as f32;
        let ease = 1.0 - (1.0 - t).powi(3);
        (width as f32 * (1.0 - ease)) as u16
    } else if time_remaining < SLIDE_MS {
        // Sliding back out, Cubic In
        let t = (SLIDE_MS - time_remaining) as f32 / SLIDE_MS as f32;
        (width as f32 * t.powi(3)) as u16
    } else {
        0 // Hold position
    };

    let x = target_x + offset;
    if x >= f.area().width {
        return;
    }

    // Clip to the screen so a partially slid-out toast still renders.
    let area = Rect::new(x, 1, width, 3).intersection(f.area());
    if area.is_empty() {
        return;
    }
    f.render_widget(Clear, area);

    let body = Paragraph::new(Line::from(Span::styled(
        toast.message.as_str(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(body, area);
}
