use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// The pomodoro countdown card.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let timer = &app.timer;
    let keys = &app.keys;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " ⏱ Focus ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let time_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let status = if timer.remaining_secs == 0 {
        Span::styled("✔ session complete", Style::default().fg(theme.accent))
    } else if timer.running {
        Span::styled("▶ focusing", Style::default().fg(theme.accent))
    } else {
        Span::styled("⏸ paused", Style::default().fg(theme.dim))
    };

    // Single-row fallback for cramped terminals.
    if inner.height <= 1 {
        let line = Line::from(vec![
            Span::styled(timer.display(), time_style),
            Span::raw("  "),
            status,
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
        return;
    }

    let hint = Line::from(vec![
        Span::styled(keys.display(&keys.timer_toggle), Style::default().fg(theme.text)),
        Span::styled(" start/pause · ", Style::default().fg(theme.dim)),
        Span::styled(keys.display(&keys.timer_reset), Style::default().fg(theme.text)),
        Span::styled(" reset", Style::default().fg(theme.dim)),
    ]);

    let mut lines = vec![
        Line::from(Span::styled(timer.display(), time_style)),
        Line::from(status),
    ];
    if inner.height >= 4 {
        lines.push(Line::from(""));
        lines.push(hint);
    } else if inner.height >= 3 {
        lines.push(hint);
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
