use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// The wall clock banner: big time, long date underneath.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (time_str, date_str) = crate::timer::wall_clock_strings();

    let lines = vec![
        Line::from(Span::styled(
            time_str,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(date_str, Style::default().fg(theme.dim))),
    ];

    let clock = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(clock, area);
}
