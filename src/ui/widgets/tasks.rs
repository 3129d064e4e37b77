use crate::app::{App, PanelFocus};
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// The task list panel with checkbox rows and the undo countdown.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == PanelFocus::Tasks;

    let border_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            " 📋 Tasks ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    if app.tasks.tasks.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No tasks yet.",
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("Press {} to add one.", app.keys.display(&app.keys.add)),
                Style::default().fg(theme.dim),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(hint, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    render_task_list(f, chunks[0], app, focused);
    render_footer_row(f, chunks[1], app);
}

fn render_task_list(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let theme = &app.theme;

    let visible = area.height as usize;
    if visible == 0 {
        return;
    }
    let start = app
        .task_selected
        .saturating_sub(visible.saturating_sub(1));

    let max_text = (area.width as usize).saturating_sub(8).max(8);
    let mut lines = Vec::with_capacity(visible);
    for (i, task) in app.tasks.tasks.iter().enumerate().skip(start).take(visible) {
        let is_selected = focused && i == app.task_selected;

        let cursor = if is_selected {
            Span::styled(
                "❯ ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("  ")
        };

        let checkbox = if task.completed {
            Span::styled("[x] ", Style::default().fg(theme.accent))
        } else {
            Span::styled("[ ] ", Style::default().fg(theme.dim))
        };

        let text_style = if task.completed {
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text)
        };

        lines.push(Line::from(vec![
            cursor,
            checkbox,
            Span::styled(truncate(&task.text, max_text), text_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer_row(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = if let Some(secs) = app.tasks.undo_secs_left() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("↩ ", Style::default().fg(theme.accent)),
            Span::styled(
                format!("{} to undo ({}s)", app.keys.display(&app.keys.undo), secs),
                Style::default().fg(theme.dim),
            ),
        ])
    } else {
        let done = app.tasks.tasks.iter().filter(|t| t.completed).count();
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{}/{} done", done, app.tasks.tasks.len()),
                Style::default().fg(theme.dim),
            ),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}
