//! In-memory session state.

use clipcast_models::{Clip, ClipId, UserAccount, VideoMetadata};

/// Everything the controller owns for the current session.
///
/// The clip collection is mutated only by whole-vector replacement, so a
/// snapshot handed to the presentation layer never reflects a half-applied
/// update.
#[derive(Debug, Default)]
pub struct SessionState {
    /// The publishing identity
    pub account: UserAccount,
    /// Metadata of the video the current batch was derived from
    pub active_video: Option<VideoMetadata>,
    /// Candidate clips for the active video
    pub clips: Vec<Clip>,
    /// Clip with a publish/schedule call in flight, if any
    pub publishing_id: Option<ClipId>,
    /// Whether fresh batches are auto-published
    pub auto_publish: bool,
}

impl SessionState {
    pub fn new(account: UserAccount) -> Self {
        Self {
            account,
            ..Self::default()
        }
    }

    /// Replace the clip matching `updated.id`, producing a new collection.
    ///
    /// Returns false (and leaves the collection untouched) when no clip
    /// carries that id.
    pub fn replace_clip(&mut self, updated: Clip) -> bool {
        if !self.clips.iter().any(|c| c.id == updated.id) {
            return false;
        }
        self.clips = self
            .clips
            .iter()
            .map(|c| {
                if c.id == updated.id {
                    updated.clone()
                } else {
                    c.clone()
                }
            })
            .collect();
        true
    }

    /// Drop the batch and its source video ahead of a new processing cycle.
    pub fn clear_batch(&mut self) {
        self.clips = Vec::new();
        self.active_video = None;
    }

    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }
}
