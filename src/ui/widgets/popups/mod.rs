pub mod help;
pub mod input;
pub mod theme_picker;
pub mod toast;

use crate::app::App;
use ratatui::Frame;

/// Draw every overlay that is currently active. Each popup checks its own
/// state and returns early when closed, so the order here is purely z-order:
/// the help popup paints over everything else.
pub fn render(f: &mut Frame, app: &mut App) {
    toast::render(f, app);
    input::render(f, app);
    theme_picker::render(f, app);
    help::render(f, app);
}
