//! Clip lifecycle controller.
//!
//! Owns the candidate clip collection for the active video, drives each clip
//! through its status transitions in response to user intents and timed
//! auto-publish events, and reconciles studio edits back into the canonical
//! collection. Collaborators (metadata fetch, candidate generation,
//! publish/schedule, localization) are injected as trait objects; everything
//! observable by a presentation layer flows out through [`Signal`]s and
//! snapshot reads.

mod controller;
mod error;
mod session;
mod signal;

pub use controller::{ClipController, Collaborators, ControllerConfig};
pub use error::{CoreError, CoreResult};
pub use session::SessionState;
pub use signal::{CycleStep, Signal, SignalLevel, SignalReceiver};
