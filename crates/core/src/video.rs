//! Video references attached to varieties.
//!
//! A variety's video is either a file in object storage (`local`) or a
//! YouTube link. Only the URL is persisted; the kind is recovered from the
//! URL on load.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Base of every embeddable YouTube URL.
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Matches the watch/share/embed URL shapes YouTube has used over time and
/// captures the 11-character video id.
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtu\.be/|youtube\.com(?:/embed/|/v/|/watch\?v=|/user/\S+|/ytscreeningroom\?v=|/sandalsResorts#\w/\w/.*/))([^/&?]{11})",
    )
    .expect("YouTube id pattern is valid")
});

/// Where a variety video lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VideoSource {
    /// Uploaded file, `url` is its public storage URL.
    Local { url: String },
    /// YouTube watch or share URL as entered by the editor.
    Youtube { url: String },
}

impl VideoSource {
    /// Classify a persisted `video_url`. Empty means no video.
    pub fn from_stored_url(url: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        if is_youtube_url(url) {
            Some(Self::Youtube { url: url.to_string() })
        } else {
            Some(Self::Local { url: url.to_string() })
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Local { url } | Self::Youtube { url } => url,
        }
    }

    /// URL to put in an `<iframe>` / `<video>`: the embed form for YouTube,
    /// the storage URL otherwise. Empty when a YouTube link is unparseable.
    pub fn playback_url(&self) -> String {
        match self {
            Self::Local { url } => url.clone(),
            Self::Youtube { url } => youtube_embed_url(url),
        }
    }
}

/// True when the URL points at youtube.com or youtu.be.
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extract the video id from a YouTube URL.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Turn a YouTube watch/share URL into its embeddable form.
///
/// Returns an empty string when no video id can be found; callers treat
/// that as "invalid link".
pub fn youtube_embed_url(url: &str) -> String {
    youtube_video_id(url)
        .map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
        .unwrap_or_default()
}
