use crate::app::{App, PanelFocus};
use crate::player::RepeatMode;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// The playlist panel: track list, progress bar and playback status row.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == PanelFocus::Music;

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
            " 🎵 Music ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    if app.music.tracks().is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No tracks yet.",
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("Press {} to add a YouTube link.", app.keys.display(&app.keys.add)),
                Style::default().fg(theme.dim),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(hint, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    render_track_list(f, chunks[0], app, focused);
    render_progress_bar(f, chunks[1], app);
    render_status_row(f, chunks[2], app);
}

fn render_track_list(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let theme = &app.theme;
    let tracks = app.music.tracks();
    let current = app.music.current_index();

    // Keep the selection inside the visible window.
    let visible = area.height as usize;
    if visible == 0 {
        return;
    }
    let start = app
        .music_selected
        .saturating_sub(visible.saturating_sub(1));

    let max_title = (area.width as usize).saturating_sub(8).max(8);
    let mut lines = Vec::with_capacity(visible);
    for (i, track) in tracks.iter().enumerate().skip(start).take(visible) {
        let is_selected = focused && i == app.music_selected;
        let is_current = current == Some(i);

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

        let marker = if is_current {
            Span::styled("▶ ", Style::default().fg(theme.accent))
        } else {
            Span::raw("  ")
        };

        let title_style = if track.is_loading {
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC)
        } else if is_current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![
            cursor,
            marker,
            Span::styled(truncate(&track.title, max_title), title_style),
        ];
        if track.liked {
            spans.push(Span::styled(" ♥", Style::default().fg(theme.accent)));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_progress_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let playback = app.music.playback();

    let ratio = if playback.duration_secs > 0.0 {
        (playback.position_secs / playback.duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let bar_width = area.width.saturating_sub(2) as usize;
    if bar_width == 0 {
        return;
    }
    let occupied = (bar_width as f64 * ratio).round() as usize;

    let mut spans = vec![Span::raw(" ")];
    for i in 0..bar_width {
        if i < occupied {
            if i == occupied.saturating_sub(1) {
                spans.push(Span::styled("●", Style::default().fg(theme.accent)));
            } else {
                spans.push(Span::styled("━", Style::default().fg(theme.accent)));
            }
        } else {
            spans.push(Span::styled("─", Style::default().fg(theme.border)));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_row(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let playback = app.music.playback();

    let pos = playback.position_secs.max(0.0) as u64;
    let dur = playback.duration_secs.max(0.0) as u64;
    let time = format!(
        "{:02}:{:02} / {:02}:{:02}",
        pos / 60,
        pos % 60,
        dur / 60,
        dur % 60
    );

    let on = Style::default().fg(theme.accent);
    let off = Style::default().fg(theme.dim);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(time, Style::default().fg(theme.dim)),
        Span::raw("  "),
        Span::styled("🔀", if playback.shuffle { on } else { off }),
        Span::raw(" "),
    ];
    match playback.repeat {
        RepeatMode::One => {
            spans.push(Span::styled("🔂", on));
            spans.push(Span::styled("1", on));
        }
        RepeatMode::All => spans.push(Span::styled("🔁", on)),
        RepeatMode::Off => spans.push(Span::styled("🔁", off)),
    }
    spans.push(Span::raw(" "));
    if playback.muted {
        spans.push(Span::styled("🔇", off));
    } else {
        spans.push(Span::styled(format!("🔊 {}%", playback.volume), on));
    }
    if app.music.video_hidden() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("🙈", off));
    }
    if app.music.is_add_in_flight() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("⏳ fetching title…", off));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
