//! Shared data models for ClipCast.
//!
//! This crate provides Serde-serializable types for:
//! - Candidate clips and their lifecycle status
//! - Source video metadata
//! - The publishing account
//! - Timecode parsing and span validation
//! - YouTube URL/ID extraction

pub mod account;
pub mod clip;
pub mod timestamp;
pub mod utils;
pub mod video;

// Re-export common types
pub use account::UserAccount;
pub use clip::{
    CaptionOverlay, CaptionStyle, Clip, ClipId, ClipStatus, HookKind, LocalizedVersion, Platform,
    VisualHook,
};
pub use timestamp::{parse_timecode, validate_span, TimecodeError, ValidatedSpan};
pub use utils::{extract_youtube_id, YoutubeIdError};
pub use video::VideoMetadata;
