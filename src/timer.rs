//! Wall clock and focus timer, both driven by the once-a-second poll tick.

/// Current local time and date, formatted for the clock banner.
pub fn wall_clock_strings() -> (String, String) {
    let now = chrono::Local::now();
    (
        now.format("%H:%M:%S").to_string(),
        now.format("%A, %-d %B %Y").to_string(),
    )
}

pub fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// A countdown that ticks while running and stops by itself at zero.
/// Restarting after completion requires an explicit reset.
pub struct FocusTimer {
    pub remaining_secs: u32,
    pub initial_secs: u32,
    pub running: bool,
}

impl FocusTimer {
    pub fn new(minutes: u32) -> Self {
        let initial_secs = minutes.max(1) * 60;
        Self {
            remaining_secs: initial_secs,
            initial_secs,
            running: false,
        }
    }

    /// Start or pause. Toggling an expired timer does nothing.
    pub fn toggle(&mut self) {
        if self.remaining_secs == 0 {
            return;
        }
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.initial_secs;
        self.running = false;
    }

    /// One second elapsed. Returns true on the tick that completes the
    /// countdown.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }
}
