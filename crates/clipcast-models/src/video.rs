//! Source video metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::{parse_timecode, TimecodeError};

/// Metadata describing the source video a clip batch was derived from.
///
/// Immutable once fetched; the controller holds at most one active instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// Platform video identifier (e.g. an 11-character YouTube ID)
    pub id: String,

    /// Video title
    pub title: String,

    /// Thumbnail reference (URL)
    pub thumbnail: String,

    /// Channel the video belongs to
    pub channel_title: String,

    /// Total duration as a timecode (`H:MM:SS` or `M:SS`)
    pub duration: String,
}

impl VideoMetadata {
    /// Create new video metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: impl Into<String>,
        channel_title: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: thumbnail.into(),
            channel_title: channel_title.into(),
            duration: duration.into(),
        }
    }

    /// Total duration in seconds, parsed from the timecode.
    pub fn duration_seconds(&self) -> Result<f64, TimecodeError> {
        parse_timecode(&self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parses() {
        let meta = VideoMetadata::new(
            "dQw4w9WgXcQ",
            "Mastering AI in 2025",
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            "FutureTech Daily",
            "18:42",
        );
        assert_eq!(meta.duration_seconds().unwrap(), 1122.0);
    }
}
