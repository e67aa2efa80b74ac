//! User-visible notifications emitted by the controller.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use clipcast_models::{ClipId, ClipStatus};

/// Receiving end of the controller's signal channel.
pub type SignalReceiver = mpsc::UnboundedReceiver<Signal>;

/// Severity of a signal, for toast-style presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    Info,
    Success,
    Error,
}

/// Stage of a processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStep {
    /// Resolving the pasted URL to video metadata
    FetchingMetadata,
    /// The generator is proposing clip candidates
    AnalyzingVirality,
}

/// A notification for the presentation layer.
///
/// Every operation failure becomes exactly one of these; none of them carry
/// enough authority to change controller state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// A processing cycle advanced to the given stage
    CycleStep { step: CycleStep },

    /// A processing cycle produced a fresh batch
    CycleCompleted { clip_count: usize },

    /// Metadata fetch or candidate generation failed
    CycleFailed { message: String },

    /// A publish/schedule was refused because no account is connected
    ConnectRequired,

    /// An account was linked and persisted
    AccountLinked { channel: String },

    /// The account was disconnected and its record cleared
    AccountDisconnected,

    /// Auto-publish timers were armed for a fresh batch
    AutoPublishStarted { clip_count: usize },

    /// Interactive publish succeeded
    ClipPublished { clip_id: ClipId, url: String },

    /// Publish collaborator rejected
    PublishFailed { clip_id: ClipId, message: String },

    /// Schedule succeeded
    ClipScheduled { clip_id: ClipId, scheduled_time: String },

    /// Schedule collaborator rejected
    ScheduleFailed { clip_id: ClipId, message: String },

    /// Studio edits were merged into the collection
    StudioSaved { clip_id: ClipId },

    /// Studio edits were rejected (invalid span or unknown clip)
    StudioRejected { clip_id: ClipId, message: String },

    /// Localization collaborator rejected
    LocalizeFailed { clip_id: ClipId, message: String },

    /// A publish/schedule was attempted from a status that forbids it
    TransitionRefused { clip_id: ClipId, status: ClipStatus },

    /// An operation referenced an id not present in the collection
    UnknownClip { clip_id: ClipId },
}

impl Signal {
    /// Severity for toast-style display.
    pub fn level(&self) -> SignalLevel {
        match self {
            Signal::ClipPublished { .. }
            | Signal::ClipScheduled { .. }
            | Signal::StudioSaved { .. }
            | Signal::AccountLinked { .. } => SignalLevel::Success,

            Signal::CycleFailed { .. }
            | Signal::PublishFailed { .. }
            | Signal::ScheduleFailed { .. }
            | Signal::StudioRejected { .. }
            | Signal::LocalizeFailed { .. }
            | Signal::TransitionRefused { .. }
            | Signal::UnknownClip { .. } => SignalLevel::Error,

            Signal::CycleStep { .. }
            | Signal::CycleCompleted { .. }
            | Signal::ConnectRequired
            | Signal::AccountDisconnected
            | Signal::AutoPublishStarted { .. } => SignalLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_a_type_tag() {
        let signal = Signal::ClipPublished {
            clip_id: ClipId::from("a"),
            url: "https://youtube.com/shorts/x1y2z3w".to_string(),
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "clip_published");
        assert_eq!(json["clip_id"], "a");
    }

    #[test]
    fn levels_follow_the_toast_taxonomy() {
        assert_eq!(Signal::ConnectRequired.level(), SignalLevel::Info);
        assert_eq!(
            Signal::CycleFailed { message: "x".into() }.level(),
            SignalLevel::Error
        );
        assert_eq!(
            Signal::StudioSaved { clip_id: ClipId::from("a") }.level(),
            SignalLevel::Success
        );
    }
}
