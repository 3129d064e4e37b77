use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    /// Title fetch finished for a video id; `None` means all attempts
    /// failed and the fallback title applies.
    TitleUpdate(String, Option<String>),
    /// Fast cadence: animations and expiry checks.
    Tick,
    /// Once a second: clock, focus timer, player poll.
    Poll,
}
