//! Candidate clip models and lifecycle status.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a candidate clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    /// Generate a new random clip ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClipId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClipId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle status of a clip.
///
/// `Pending` and `Processing` are representable but the generator hands out
/// clips already `Ready`. `Publishing` is signalled through the controller's
/// in-flight marker rather than stored on the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClipStatus {
    /// Candidate exists but has not been prepared
    #[default]
    Pending,
    /// Candidate is being prepared
    Processing,
    /// Ready to publish or schedule
    Ready,
    /// Publish call in flight
    Publishing,
    /// Live on the target platform
    Published,
    /// Queued for a future publish time
    Scheduled,
}

impl ClipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipStatus::Pending => "pending",
            ClipStatus::Processing => "processing",
            ClipStatus::Ready => "ready",
            ClipStatus::Publishing => "publishing",
            ClipStatus::Published => "published",
            ClipStatus::Scheduled => "scheduled",
        }
    }

    /// Whether a publish may be attempted from this status.
    /// A scheduled clip can still be published immediately ("publish now").
    pub fn can_publish(&self) -> bool {
        matches!(self, ClipStatus::Ready | ClipStatus::Scheduled)
    }

    /// Whether a schedule may be attempted from this status.
    /// Re-scheduling an already scheduled clip is allowed.
    pub fn can_schedule(&self) -> bool {
        matches!(self, ClipStatus::Ready | ClipStatus::Scheduled)
    }

    /// Published clips never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClipStatus::Published)
    }
}

impl fmt::Display for ClipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering style of a caption overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionStyle {
    #[default]
    Impact,
    Question,
    Highlight,
}

/// A text overlay shown to the viewer at a point in the clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CaptionOverlay {
    /// Display text
    pub text: String,
    /// Timing marker within the clip (timecode or free-form like "0-3s")
    pub timing: String,
    /// Rendering style
    #[serde(default)]
    pub style: CaptionStyle,
}

/// Category of a visual-edit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    #[default]
    Zoom,
    Cut,
    Overlay,
    Transition,
}

/// An editing instruction anchored to a timestamp within the clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisualHook {
    /// Timestamp within the clip
    pub timestamp: String,
    /// Instruction text for the editor
    pub action: String,
    /// Category of edit
    #[serde(default, rename = "type")]
    pub kind: HookKind,
}

/// Target platform classification for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Model output is tolerated in its capitalized form
    #[serde(alias = "Shorts")]
    Shorts,
    #[serde(alias = "TikTok", alias = "tiktok")]
    TikTok,
    #[serde(alias = "Reels")]
    Reels,
    #[default]
    #[serde(alias = "Universal")]
    Universal,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shorts => "shorts",
            Platform::TikTok => "tik_tok",
            Platform::Reels => "reels",
            Platform::Universal => "universal",
        }
    }
}

/// A localized rendition of a clip's text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocalizedVersion {
    /// Target language name (e.g. "Spanish")
    pub language: String,
    /// Localized title
    pub title: String,
    /// Localized description
    pub description: String,
    /// Localized caption overlays
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<CaptionOverlay>,
}

/// A candidate short-form segment of a source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Stable opaque identifier
    pub id: ClipId,

    /// Start timecode (`H:MM:SS` or `M:SS`)
    pub start_time: String,

    /// End timecode (`H:MM:SS` or `M:SS`)
    pub end_time: String,

    /// Span length in whole seconds, derived from the timecodes
    pub duration_seconds: u32,

    /// Suggested title
    pub title: String,

    /// Suggested description
    #[serde(default)]
    pub description: String,

    /// Ranked virality score, higher is more promising
    pub viral_score: f64,

    /// Free-text retention reasoning from the analysis
    #[serde(default)]
    pub reasoning: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: ClipStatus,

    /// Suggested tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Ordered caption overlays
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<CaptionOverlay>,

    /// Ordered visual-edit hooks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visual_hooks: Vec<VisualHook>,

    /// Target platform classification
    #[serde(default)]
    pub platform_target: Platform,

    /// URL of the published short, present iff status is `Published`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,

    /// Caller-supplied publish time, present iff status is `Scheduled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,

    /// Localized renditions produced in the studio
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub localized_versions: Vec<LocalizedVersion>,

    /// Narration-preview voice chosen in the studio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_voice: Option<String>,
}

impl Clip {
    /// Create a ready-to-publish clip with the minimum required fields.
    pub fn ready(
        id: impl Into<ClipId>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        duration_seconds: u32,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            duration_seconds,
            title: title.into(),
            description: String::new(),
            viral_score: 0.0,
            reasoning: String::new(),
            status: ClipStatus::Ready,
            tags: Vec::new(),
            captions: Vec::new(),
            visual_hooks: Vec::new(),
            platform_target: Platform::default(),
            published_url: None,
            scheduled_time: None,
            localized_versions: Vec::new(),
            selected_voice: None,
        }
    }

    /// Set the virality score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.viral_score = score;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the target platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform_target = platform;
        self
    }

    /// Transition to `Published` with the returned URL.
    ///
    /// A previously set `scheduled_time` is cleared so that at most one of
    /// the post-publication fields is ever populated.
    pub fn mark_published(mut self, url: impl Into<String>) -> Self {
        self.status = ClipStatus::Published;
        self.published_url = Some(url.into());
        self.scheduled_time = None;
        self
    }

    /// Transition to `Scheduled` with the caller-supplied time, stored verbatim.
    pub fn mark_scheduled(mut self, scheduled_time: impl Into<String>) -> Self {
        self.status = ClipStatus::Scheduled;
        self.scheduled_time = Some(scheduled_time.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_clip() -> Clip {
        Clip::ready("a", "1:30", "1:45", 15, "Hook")
    }

    #[test]
    fn publish_clears_scheduled_time() {
        let clip = ready_clip().mark_scheduled("2026-09-01T10:00:00Z");
        assert_eq!(clip.status, ClipStatus::Scheduled);

        let clip = clip.mark_published("https://youtube.com/shorts/abc1234");
        assert_eq!(clip.status, ClipStatus::Published);
        assert_eq!(clip.published_url.as_deref(), Some("https://youtube.com/shorts/abc1234"));
        assert_eq!(clip.scheduled_time, None);
    }

    #[test]
    fn status_guards() {
        assert!(ClipStatus::Ready.can_publish());
        assert!(ClipStatus::Scheduled.can_publish());
        assert!(ClipStatus::Scheduled.can_schedule());
        assert!(!ClipStatus::Published.can_publish());
        assert!(!ClipStatus::Pending.can_publish());
        assert!(!ClipStatus::Processing.can_schedule());
        assert!(ClipStatus::Published.is_terminal());
        assert!(!ClipStatus::Scheduled.is_terminal());
    }

    #[test]
    fn serde_skips_unset_post_publication_fields() {
        let json = serde_json::to_value(ready_clip()).unwrap();
        assert!(json.get("published_url").is_none());
        assert!(json.get("scheduled_time").is_none());
        assert!(json.get("localized_versions").is_none());
        assert_eq!(json["status"], "ready");
    }

    #[test]
    fn hook_kind_uses_type_key() {
        let hook = VisualHook {
            timestamp: "0:05".to_string(),
            action: "Zoom on the reaction".to_string(),
            kind: HookKind::Zoom,
        };
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(json["type"], "zoom");
    }
}
