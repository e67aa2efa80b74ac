//! Collaborator boundary for the clip lifecycle.
//!
//! The controller treats its external dependencies as opaque async
//! operations behind these traits: fetching source-video metadata,
//! generating clip candidates, publishing/scheduling, and localization.
//! Two families of implementations ship here: a Gemini-backed generator and
//! localizer ([`GeminiClient`]) and fixed-delay simulations of the whole
//! surface ([`SimulatedTube`], [`SimulatedAnalyst`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use clipcast_models::{Clip, ClipId, LocalizedVersion, VideoMetadata};

mod error;
mod gemini;
mod simulated;

pub use error::{CollabError, CollabResult};
pub use gemini::{
    parse_clip_candidates, parse_localized_versions, promote_candidates, ClipCandidate,
    GeminiClient,
};
pub use simulated::{SimulatedAnalyst, SimulatedTube, DEFAULT_VIDEO_ID};

/// Outcome of a publish call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub success: bool,
    /// URL of the published short
    pub url: String,
}

/// Outcome of a schedule call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReceipt {
    pub success: bool,
}

/// Resolves a video URL to its metadata.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> CollabResult<VideoMetadata>;
}

/// Proposes clip candidates for a source video. Returned clips are `Ready`.
#[async_trait]
pub trait ClipGenerator: Send + Sync {
    async fn generate_clips(&self, video: &VideoMetadata) -> CollabResult<Vec<Clip>>;
}

/// Publishes or schedules a clip on the target platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, clip_id: &ClipId) -> CollabResult<PublishReceipt>;

    async fn schedule(
        &self,
        clip_id: &ClipId,
        scheduled_time: &str,
    ) -> CollabResult<ScheduleReceipt>;
}

/// Produces localized renditions of a clip's text content.
#[async_trait]
pub trait Localizer: Send + Sync {
    async fn localize(
        &self,
        clip: &Clip,
        languages: &[String],
    ) -> CollabResult<Vec<LocalizedVersion>>;
}
