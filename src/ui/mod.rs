pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);

    // 2. Header + clock + timer
    render_header(f, main_layout.header_area, app);
    if let Some(clock_area) = main_layout.clock_area {
        widgets::clock::render(f, clock_area, app);
    }
    widgets::focus::render(f, main_layout.timer_area, app);

    // 3. Body panels
    let body = layout::get_body_layout(main_layout.body_area);
    widgets::music::render(f, body.music_area, app);
    widgets::tasks::render(f, body.tasks_area, app);

    // 4. Footer: branding on the left, key hint on the right
    let theme = &app.theme;
    let footer_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(main_layout.footer_area);
    let branding = Paragraph::new(Span::styled(
        " Coded for Peak Productivity",
        Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
    ));
    f.render_widget(branding, footer_chunks[0]);
    if !app.show_keyhints {
        let hint = Line::from(vec![
            Span::styled(
                " ? ",
                Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys", Style::default().fg(theme.dim)),
        ]);
        let footer = Paragraph::new(hint).alignment(Alignment::Right);
        f.render_widget(footer, footer_chunks[1]);
    }

    // 5. Popups (overlays)
    // Note: widgets::popups::render handles active states internally
    widgets::popups::render(f, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let mut left = vec![Line::from(vec![
        Span::raw(" 🔒 "),
        Span::styled(
            "LOCK-IN",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    if area.height >= 2 {
        left.push(Line::from(Span::styled(
            "    FOCUS · ACHIEVE · REPEAT",
            Style::default().fg(theme.dim),
        )));
    }
    f.render_widget(Paragraph::new(left), chunks[0]);

    let badge = Line::from(vec![
        Span::styled("◉ ", Style::default().fg(theme.accent)),
        Span::styled(theme.name.as_str(), Style::default().fg(theme.dim)),
        Span::raw(" "),
    ]);
    f.render_widget(
        Paragraph::new(badge).alignment(Alignment::Right),
        chunks[1],
    );
}
