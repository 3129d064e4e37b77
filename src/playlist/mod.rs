pub mod controller;
pub mod fetch;
pub mod track;

pub use controller::{MusicController, PlaybackState};
pub use fetch::TitleFetcher;
pub use track::{extract_video_id, validate_url, PlaylistError, Track, VideoId};
