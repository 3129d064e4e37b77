pub mod clock;
pub mod focus;
pub mod music;
pub mod popups;
pub mod tasks;
