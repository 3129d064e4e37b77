pub mod mpv;
pub mod traits;

pub use mpv::{MpvPlayer, MpvSpawner};
pub use traits::{PlayerEvent, PlayerHandle, PlayerSpawner, RepeatMode, SpawnSettings};
