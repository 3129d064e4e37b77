use crate::app::App;
use crate::ui::theme::ACCENTS;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let Some(picker_index) = app.theme_picker else {
        return;
    };
    let theme = &app.theme;

    let width = 26.min(f.area().width.saturating_sub(4));
    let height = (ACCENTS.len() as u16 + 4).min(f.area().height.saturating_sub(2));
    let x = (f.area().width.saturating_sub(width)) / 2;
    let y = (f.area().height.saturating_sub(height)) / 2;
    let area = Rect::new(x, y, width, height);

    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, (name, color)) in ACCENTS.iter().enumerate() {
        let selected = i == picker_index;
        let active = name.eq_ignore_ascii_case(&app.theme.name);

        let cursor = if selected {
            Span::styled(
                " ❯ ",
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("   ")
        };
        let swatch = Span::styled(if active { "◉ " } else { "○ " }, Style::default().fg(*color));
        let label_style = if selected {
            Style::default().fg(*color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        lines.push(Line::from(vec![
            cursor,
            swatch,
            Span::styled(*name, label_style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .title(" 🎨 Theme ")
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
