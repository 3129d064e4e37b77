use crate::app::App;
use crate::ui::utils::fit_tail;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const POPUP_WIDTH: u16 = 60;
const POPUP_HEIGHT: u16 = 5;

pub fn render(f: &mut Frame, app: &App) {
    let Some(input) = &app.input_state else { return };
    let theme = &app.theme;
    let screen = f.area();

    let width = POPUP_WIDTH.min(screen.width.saturating_sub(4));
    let x = screen.width.saturating_sub(width) / 2;
    let y = screen.height.saturating_sub(POPUP_HEIGHT) / 2;
    let area = Rect::new(x, y, width, POPUP_HEIGHT);

    f.render_widget(Clear, area);

    // Keep the tail visible when a pasted URL outgrows the popup.
    let shown = fit_tail(&input.value, width.saturating_sub(6) as usize);

    let accent = Style::default().fg(theme.accent);
    let prompt = Line::from(vec![
        Span::styled(" > ", accent.add_modifier(Modifier::BOLD)),
        Span::styled(shown, Style::default().fg(theme.text)),
        Span::styled("▌", accent.add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(accent)
        .title(format!(" {} ", input.title))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));

    f.render_widget(
        Paragraph::new(vec![Line::from(""), prompt]).block(block),
        area,
    );
}
