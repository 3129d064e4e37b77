pub mod app;
pub mod player;
pub mod playlist;
pub mod tasks;
pub mod timer;
pub mod ui;
