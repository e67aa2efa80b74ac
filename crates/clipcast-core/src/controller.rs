//! The clip lifecycle controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use clipcast_collab::{ClipGenerator, Localizer, MetadataFetcher, Publisher};
use clipcast_models::{
    timestamp::validate_span, Clip, ClipId, UserAccount, VideoMetadata,
};
use clipcast_store::AccountStore;

use crate::error::CoreResult;
use crate::session::SessionState;
use crate::signal::{CycleStep, Signal, SignalReceiver};

/// The controller's external dependencies.
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn MetadataFetcher>,
    pub generator: Arc<dyn ClipGenerator>,
    pub publisher: Arc<dyn Publisher>,
    pub localizer: Arc<dyn Localizer>,
}

/// Controller tuning knobs.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay between consecutive auto-publishes of a fresh batch.
    /// The k-th clip (1-indexed) fires after `k x stagger`.
    pub auto_publish_stagger: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            auto_publish_stagger: Duration::from_millis(6000),
        }
    }
}

impl ControllerConfig {
    /// Read config from the environment (`CLIPCAST_STAGGER_MS`).
    pub fn from_env() -> Self {
        Self {
            auto_publish_stagger: std::env::var("CLIPCAST_STAGGER_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or_else(|| Self::default().auto_publish_stagger),
        }
    }
}

/// Whether a publish was user-initiated or fired by the auto-publish
/// sequencer. The auto variant runs the same transition but suppresses the
/// per-clip success/failure signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishMode {
    Interactive,
    Auto,
}

struct Inner {
    collab: Collaborators,
    store: Arc<dyn AccountStore>,
    config: ControllerConfig,
    state: RwLock<SessionState>,
    /// Batch generation; bumped by every new processing cycle so stale
    /// auto-publish timers can tell they have been superseded.
    generation: AtomicU64,
    signals: mpsc::UnboundedSender<Signal>,
}

/// Owns the active clip batch and drives clips through their lifecycle.
///
/// Cheap to clone; all clones share the same session.
#[derive(Clone)]
pub struct ClipController {
    inner: Arc<Inner>,
}

impl ClipController {
    /// Build a controller, loading any persisted account.
    ///
    /// Returns the controller and the receiving end of its signal channel.
    pub async fn new(
        collab: Collaborators,
        store: Arc<dyn AccountStore>,
        config: ControllerConfig,
    ) -> CoreResult<(Self, SignalReceiver)> {
        let account = store.load().await?.unwrap_or_else(UserAccount::disconnected);
        let (tx, rx) = mpsc::unbounded_channel();

        let controller = Self {
            inner: Arc::new(Inner {
                collab,
                store,
                config,
                state: RwLock::new(SessionState::new(account)),
                generation: AtomicU64::new(0),
                signals: tx,
            }),
        };
        Ok((controller, rx))
    }

    // =========================================================================
    // Snapshot reads
    // =========================================================================

    /// Snapshot of the current clip collection.
    pub fn clips(&self) -> Vec<Clip> {
        self.read(|s| s.clips.clone())
    }

    /// Snapshot of a single clip.
    pub fn clip(&self, id: &ClipId) -> Option<Clip> {
        self.read(|s| s.clip(id).cloned())
    }

    /// Metadata of the active video, if a cycle has completed.
    pub fn active_video(&self) -> Option<VideoMetadata> {
        self.read(|s| s.active_video.clone())
    }

    /// The current publishing identity.
    pub fn account(&self) -> UserAccount {
        self.read(|s| s.account.clone())
    }

    /// Clip with a publish/schedule call in flight, if any.
    pub fn publishing_id(&self) -> Option<ClipId> {
        self.read(|s| s.publishing_id.clone())
    }

    pub fn auto_publish(&self) -> bool {
        self.read(|s| s.auto_publish)
    }

    pub fn set_auto_publish(&self, enabled: bool) {
        self.write(|s| s.auto_publish = enabled);
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Swap in a new account, mirroring it to the store.
    ///
    /// A connected account is persisted; swapping in a disconnected one
    /// clears the record instead.
    pub async fn connect(&self, account: UserAccount) -> CoreResult<()> {
        if account.is_connected {
            self.inner.store.save(&account).await?;
        } else {
            self.inner.store.clear().await?;
        }

        let linked = account.is_connected;
        let channel = account
            .channel_name
            .clone()
            .unwrap_or_else(|| account.name.clone());
        self.write(|s| s.account = account);

        if linked {
            info!(channel = %channel, "Account linked");
            self.signal(Signal::AccountLinked { channel });
        }
        Ok(())
    }

    /// Drop the account and remove its persisted record.
    pub async fn disconnect(&self) -> CoreResult<()> {
        self.inner.store.clear().await?;
        self.write(|s| s.account = UserAccount::disconnected());
        self.signal(Signal::AccountDisconnected);
        Ok(())
    }

    // =========================================================================
    // Processing cycle
    // =========================================================================

    /// Run a full processing cycle for a pasted video URL.
    ///
    /// The previous batch is dropped before the fetch starts, so readers see
    /// an empty collection for the whole fetch+generate sequence. Collaborator
    /// failures leave the collection empty and raise one `CycleFailed`.
    pub async fn process_video(&self, url: &str) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.write(|s| s.clear_batch());

        self.signal(Signal::CycleStep {
            step: CycleStep::FetchingMetadata,
        });
        let video = match self.inner.collab.fetcher.fetch_metadata(url).await {
            Ok(video) => video,
            Err(e) => {
                warn!(url, error = %e, "Metadata fetch failed");
                self.signal(Signal::CycleFailed {
                    message: "Could not access video".to_string(),
                });
                return;
            }
        };
        self.write(|s| s.active_video = Some(video.clone()));

        self.signal(Signal::CycleStep {
            step: CycleStep::AnalyzingVirality,
        });
        let clips = match self.inner.collab.generator.generate_clips(&video).await {
            Ok(clips) => clips,
            Err(e) => {
                warn!(video_id = %video.id, error = %e, "Candidate generation failed");
                self.signal(Signal::CycleFailed {
                    message: "Analysis failed".to_string(),
                });
                return;
            }
        };

        let batch: Vec<ClipId> = clips.iter().map(|c| c.id.clone()).collect();
        info!(video_id = %video.id, clip_count = batch.len(), "Batch ready");
        self.write(|s| s.clips = clips);
        self.signal(Signal::CycleCompleted {
            clip_count: batch.len(),
        });

        let (auto, connected) = self.read(|s| (s.auto_publish, s.account.is_connected));
        if auto && connected && !batch.is_empty() {
            self.arm_auto_publish(batch, generation);
        }
    }

    /// Arm one deferred publish per clip at `k x stagger` from now.
    ///
    /// Timers never get cancelled; each one re-checks the batch generation
    /// when it fires and stands down if a newer cycle has run since.
    fn arm_auto_publish(&self, batch: Vec<ClipId>, generation: u64) {
        self.signal(Signal::AutoPublishStarted {
            clip_count: batch.len(),
        });

        for (index, clip_id) in batch.into_iter().enumerate() {
            let controller = self.clone();
            let delay = self.inner.config.auto_publish_stagger * (index as u32 + 1);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if controller.inner.generation.load(Ordering::SeqCst) != generation {
                    debug!(clip_id = %clip_id, "Auto-publish superseded by a newer batch");
                    return;
                }
                controller.publish_inner(&clip_id, PublishMode::Auto).await;
            });
        }
    }

    // =========================================================================
    // Publish / schedule
    // =========================================================================

    /// Publish a clip now. Requires a connected account.
    pub async fn publish_clip(&self, clip_id: &ClipId) {
        self.publish_inner(clip_id, PublishMode::Interactive).await;
    }

    async fn publish_inner(&self, clip_id: &ClipId, mode: PublishMode) {
        let Some(status) = self.guard_action(clip_id) else {
            return;
        };
        if !status.can_publish() {
            self.signal(Signal::TransitionRefused {
                clip_id: clip_id.clone(),
                status,
            });
            return;
        }

        self.write(|s| s.publishing_id = Some(clip_id.clone()));
        let inner = Arc::clone(&self.inner);
        // Cleared no matter how the collaborator call ends
        let _marker = scopeguard::guard((), move |_| {
            inner.state.write().expect("state lock poisoned").publishing_id = None;
        });

        match self.inner.collab.publisher.publish(clip_id).await {
            Ok(receipt) if receipt.success => {
                let updated = self.read(|s| s.clip(clip_id).cloned());
                if let Some(clip) = updated {
                    let url = receipt.url.clone();
                    self.write(|s| s.replace_clip(clip.mark_published(&url)));
                    info!(clip_id = %clip_id, url = %receipt.url, "Clip published");
                    if mode == PublishMode::Interactive {
                        self.signal(Signal::ClipPublished {
                            clip_id: clip_id.clone(),
                            url: receipt.url,
                        });
                    }
                }
            }
            Ok(receipt) => {
                // Soft refusal: no transition, no notification
                debug!(clip_id = %clip_id, ?receipt, "Publish reported no success");
            }
            Err(e) => {
                warn!(clip_id = %clip_id, error = %e, "Publish failed");
                if mode == PublishMode::Interactive {
                    self.signal(Signal::PublishFailed {
                        clip_id: clip_id.clone(),
                        message: "Publishing failed".to_string(),
                    });
                }
            }
        }
    }

    /// Schedule a clip for a caller-supplied time. Requires a connected
    /// account. Re-scheduling an already scheduled clip just replaces the
    /// time; scheduling twice with the same time is a no-op the second time.
    pub async fn schedule_clip(&self, clip_id: &ClipId, scheduled_time: &str) {
        let Some(status) = self.guard_action(clip_id) else {
            return;
        };
        if !status.can_schedule() {
            self.signal(Signal::TransitionRefused {
                clip_id: clip_id.clone(),
                status,
            });
            return;
        }

        self.write(|s| s.publishing_id = Some(clip_id.clone()));
        let inner = Arc::clone(&self.inner);
        let _marker = scopeguard::guard((), move |_| {
            inner.state.write().expect("state lock poisoned").publishing_id = None;
        });

        match self
            .inner
            .collab
            .publisher
            .schedule(clip_id, scheduled_time)
            .await
        {
            Ok(receipt) if receipt.success => {
                let updated = self.read(|s| s.clip(clip_id).cloned());
                if let Some(clip) = updated {
                    self.write(|s| s.replace_clip(clip.mark_scheduled(scheduled_time)));
                    info!(clip_id = %clip_id, scheduled_time, "Clip scheduled");
                    self.signal(Signal::ClipScheduled {
                        clip_id: clip_id.clone(),
                        scheduled_time: scheduled_time.to_string(),
                    });
                }
            }
            Ok(receipt) => {
                debug!(clip_id = %clip_id, ?receipt, "Schedule reported no success");
            }
            Err(e) => {
                warn!(clip_id = %clip_id, error = %e, "Schedule failed");
                self.signal(Signal::ScheduleFailed {
                    clip_id: clip_id.clone(),
                    message: "Scheduling failed".to_string(),
                });
            }
        }
    }

    /// Common preconditions for publish/schedule: a connected account and a
    /// known clip. Returns the clip's current status when both hold.
    fn guard_action(&self, clip_id: &ClipId) -> Option<clipcast_models::ClipStatus> {
        if !self.read(|s| s.account.is_connected) {
            self.signal(Signal::ConnectRequired);
            return None;
        }
        match self.read(|s| s.clip(clip_id).map(|c| c.status)) {
            Some(status) => Some(status),
            None => {
                warn!(clip_id = %clip_id, "Action on unknown clip");
                self.signal(Signal::UnknownClip {
                    clip_id: clip_id.clone(),
                });
                None
            }
        }
    }

    // =========================================================================
    // Studio
    // =========================================================================

    /// Merge studio edits back into the collection, replacing the clip whole.
    ///
    /// The edited span is re-validated against the active video before the
    /// merge and `duration_seconds` recomputed from it; an invalid span or an
    /// unknown id rejects the save untouched.
    pub fn save_studio(&self, edited: Clip) {
        let video_duration = self.read(|s| {
            s.active_video
                .as_ref()
                .and_then(|v| v.duration_seconds().ok())
        });

        let span = match validate_span(&edited.start_time, &edited.end_time, video_duration) {
            Ok(span) => span,
            Err(e) => {
                self.signal(Signal::StudioRejected {
                    clip_id: edited.id.clone(),
                    message: e.to_string(),
                });
                return;
            }
        };

        let mut edited = edited;
        edited.duration_seconds = span.duration_seconds;
        let clip_id = edited.id.clone();

        if self.write(|s| s.replace_clip(edited)) {
            info!(clip_id = %clip_id, "Studio changes saved");
            self.signal(Signal::StudioSaved { clip_id });
        } else {
            self.signal(Signal::UnknownClip { clip_id });
        }
    }

    /// Produce a copy of `clip` with freshly localized versions.
    ///
    /// Controller state is untouched; the copy lives in the studio until a
    /// `save_studio`. On failure the copy comes back unchanged alongside one
    /// `LocalizeFailed` signal.
    pub async fn globalize_clip(&self, clip: &Clip, languages: &[String]) -> Clip {
        match self.inner.collab.localizer.localize(clip, languages).await {
            Ok(versions) => {
                let mut localized = clip.clone();
                localized.localized_versions = versions;
                localized
            }
            Err(e) => {
                warn!(clip_id = %clip.id, error = %e, "Localization failed");
                self.signal(Signal::LocalizeFailed {
                    clip_id: clip.id.clone(),
                    message: "Localization failed".to_string(),
                });
                clip.clone()
            }
        }
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        f(&self.inner.state.read().expect("state lock poisoned"))
    }

    fn write<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> T {
        f(&mut self.inner.state.write().expect("state lock poisoned"))
    }

    fn signal(&self, signal: Signal) {
        // A dropped receiver only mutes notifications
        let _ = self.inner.signals.send(signal);
    }
}
