use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub header_area: Rect,
    pub clock_area: Option<Rect>,
    pub timer_area: Rect,
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Responsive Logic 🧠
    // On short terminals the clock banner is the first thing to go, then
    // the timer shrinks to a single bordered row.
    if area.height >= 22 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Clock banner
                Constraint::Length(6), // Focus timer
                Constraint::Min(8),    // Music + tasks
                Constraint::Length(1), // Footer
            ])
            .split(area);
        MainLayout {
            header_area: chunks[0],
            clock_area: Some(chunks[1]),
            timer_area: chunks[2],
            body_area: chunks[3],
            footer_area: chunks[4],
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header (single line)
                Constraint::Length(3), // Focus timer (compressed)
                Constraint::Min(6),    // Music + tasks
                Constraint::Length(1), // Footer
            ])
            .split(area);
        MainLayout {
            header_area: chunks[0],
            clock_area: None,
            timer_area: chunks[1],
            body_area: chunks[2],
            footer_area: chunks[3],
        }
    }
}

pub struct BodyLayout {
    pub music_area: Rect,
    pub tasks_area: Rect,
    pub is_horizontal: bool,
}

pub fn get_body_layout(area: Rect) -> BodyLayout {
    if area.width >= 80 {
        // Side by side
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        BodyLayout {
            music_area: chunks[0],
            tasks_area: chunks[1],
            is_horizontal: true,
        }
    } else {
        // Stack Mode
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        BodyLayout {
            music_area: chunks[0],
            tasks_area: chunks[1],
            is_horizontal: false,
        }
    }
}
