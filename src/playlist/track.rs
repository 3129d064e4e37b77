use thiserror::Error;

/// Ways adding a URL to the playlist can fail. Every variant is user-facing
/// except [`PlaylistError::AddInFlight`], which callers swallow silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("not a recognized YouTube link")]
    InvalidUrl,
    #[error("could not find a video id in that link")]
    IdExtractionFailed,
    #[error("that track is already in the playlist")]
    DuplicateTrack,
    #[error("still fetching the previous track")]
    AddInFlight,
}

/// An 11-character YouTube video id. The id is the playlist's identity key:
/// two URLs that extract to the same id are the same track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playlist entry.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: VideoId,
    pub url: String,
    pub title: String,
    /// True from append until the title fetch resolves.
    pub is_loading: bool,
    pub liked: bool,
}

impl Track {
    pub fn pending(url: &str, id: VideoId, liked: bool) -> Self {
        Self {
            id,
            url: url.trim().to_string(),
            title: "Loading…".to_string(),
            is_loading: true,
            liked,
        }
    }

    /// Title used when the metadata fetch fails or returns nothing.
    pub fn fallback_title(id: &VideoId) -> String {
        format!("YouTube Video: {id}")
    }
}

const URL_MARKERS: [&str; 4] = [
    "youtube.com/watch?v=",
    "youtu.be/",
    "youtube.com/embed/",
    "youtube.com/v/",
];

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_bare_id(s: &str) -> bool {
    s.len() == 11 && s.chars().all(is_id_char)
}

/// Cheap shape check, separate from extraction: does the input look like a
/// YouTube link (or bare id) at all?
pub fn validate_url(input: &str) -> Result<(), PlaylistError> {
    let s = input.trim();
    if is_bare_id(s) || URL_MARKERS.iter().any(|m| s.contains(m)) {
        Ok(())
    } else {
        Err(PlaylistError::InvalidUrl)
    }
}

/// Pulls the 11-character video id out of any of the supported URL shapes:
/// `watch?v=`, `youtu.be/`, `embed/`, `/v/`, or a bare id.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let s = input.trim();
    if is_bare_id(s) {
        return Some(VideoId(s.to_string()));
    }
    for marker in URL_MARKERS {
        if let Some(pos) = s.find(marker) {
            let rest = &s[pos + marker.len()..];
            let id: String = rest.chars().take_while(|c| is_id_char(*c)).take(11).collect();
            if id.len() == 11 {
                return Some(VideoId(id));
            }
        }
    }
    None
}
