//! YouTube URL parsing helpers.

use thiserror::Error;
use url::Url;

/// Errors from YouTube video-ID extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YoutubeIdError {
    #[error("not a YouTube URL")]
    NotYoutube,

    #[error("no video ID found in URL")]
    MissingVideoId,

    #[error("'{0}' is not a valid YouTube video ID")]
    MalformedVideoId(String),
}

/// Extract the 11-character video ID from a YouTube URL.
///
/// Supported forms:
/// - `https://www.youtube.com/watch?v=VIDEO_ID`
/// - `https://youtu.be/VIDEO_ID`
/// - `https://youtube.com/embed/VIDEO_ID`
/// - `https://youtube.com/v/VIDEO_ID`
/// - `https://youtube.com/shorts/VIDEO_ID`
///
/// Query parameters and fragments beyond the ID are ignored.
pub fn extract_youtube_id(raw: &str) -> Result<String, YoutubeIdError> {
    let parsed = Url::parse(raw.trim()).map_err(|_| YoutubeIdError::NotYoutube)?;
    let host = parsed
        .host_str()
        .ok_or(YoutubeIdError::NotYoutube)?
        .to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    let candidate = if host == "youtu.be" {
        first_path_segment(&parsed)
    } else if host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtube-nocookie.com"
    {
        if parsed.path() == "/watch" {
            watch_query_id(&parsed)
        } else {
            segment_after(&parsed, &["embed", "v", "shorts", "live"])
        }
    } else {
        return Err(YoutubeIdError::NotYoutube);
    };

    let id = candidate.ok_or(YoutubeIdError::MissingVideoId)?;
    validate_id(id)
}

/// Check the 11-character `[A-Za-z0-9_-]` video-ID format.
fn validate_id(id: String) -> Result<String, YoutubeIdError> {
    if id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(id)
    } else {
        Err(YoutubeIdError::MalformedVideoId(id))
    }
}

fn watch_query_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find_map(|(key, value)| (key == "v").then(|| value.into_owned()))
}

fn first_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Find the path segment following any of the given markers.
fn segment_after(url: &Url, markers: &[&str]) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    segments
        .iter()
        .position(|s| markers.contains(s))
        .and_then(|i| segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
