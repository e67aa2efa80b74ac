//! Fixed-delay simulations of the collaborator surface.
//!
//! Nothing here touches the network: the "YouTube" side resolves metadata
//! from the URL alone and fabricates publish results, the "analyst" side
//! returns canned candidates. Delays default to the latency the real calls
//! would have so the demo feels honest; tests shrink them to zero.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use clipcast_models::{
    extract_youtube_id, CaptionOverlay, CaptionStyle, Clip, ClipId, HookKind, LocalizedVersion,
    Platform, VideoMetadata, VisualHook,
};

use crate::error::CollabResult;
use crate::{
    ClipGenerator, Localizer, MetadataFetcher, PublishReceipt, Publisher, ScheduleReceipt,
};

/// Fallback video ID when the pasted link is not a recognizable YouTube URL.
pub const DEFAULT_VIDEO_ID: &str = "dQw4w9WgXcQ";

/// Simulated YouTube surface: metadata fetch, publish and schedule.
pub struct SimulatedTube {
    fetch_delay: Duration,
    publish_delay: Duration,
    schedule_delay: Duration,
}

impl Default for SimulatedTube {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(1500),
            publish_delay: Duration::from_millis(3000),
            schedule_delay: Duration::from_millis(1500),
        }
    }
}

impl SimulatedTube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-delay variant for tests.
    pub fn instant() -> Self {
        Self {
            fetch_delay: Duration::ZERO,
            publish_delay: Duration::ZERO,
            schedule_delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl MetadataFetcher for SimulatedTube {
    async fn fetch_metadata(&self, url: &str) -> CollabResult<VideoMetadata> {
        tokio::time::sleep(self.fetch_delay).await;

        let video_id = extract_youtube_id(url).unwrap_or_else(|e| {
            debug!(url, error = %e, "Falling back to the default video ID");
            DEFAULT_VIDEO_ID.to_string()
        });

        Ok(VideoMetadata::new(
            video_id.clone(),
            "Mastering AI in 2025: From Zero to Hero",
            format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg"),
            "FutureTech Daily",
            "18:42",
        ))
    }
}

#[async_trait]
impl Publisher for SimulatedTube {
    async fn publish(&self, clip_id: &ClipId) -> CollabResult<PublishReceipt> {
        tokio::time::sleep(self.publish_delay).await;
        let short_id: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();
        debug!(clip_id = %clip_id, short_id, "Simulated publish");
        Ok(PublishReceipt {
            success: true,
            url: format!("https://youtube.com/shorts/{short_id}"),
        })
    }

    async fn schedule(
        &self,
        clip_id: &ClipId,
        scheduled_time: &str,
    ) -> CollabResult<ScheduleReceipt> {
        tokio::time::sleep(self.schedule_delay).await;
        debug!(clip_id = %clip_id, scheduled_time, "Simulated schedule");
        Ok(ScheduleReceipt { success: true })
    }
}

/// Simulated analyst: canned clip candidates and localizations.
pub struct SimulatedAnalyst {
    delay: Duration,
}

impl Default for SimulatedAnalyst {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
        }
    }
}

impl SimulatedAnalyst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-delay variant for tests.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl ClipGenerator for SimulatedAnalyst {
    async fn generate_clips(&self, video: &VideoMetadata) -> CollabResult<Vec<Clip>> {
        tokio::time::sleep(self.delay).await;

        let spans = [
            ("0:42", "1:12", 30, "The claim nobody saw coming", 94.0),
            ("3:05", "3:48", 43, "Live demo goes off the rails", 91.0),
            ("7:30", "7:58", 28, "The one-sentence explanation", 88.0),
            ("11:14", "11:59", 45, "Why everyone gets this wrong", 86.0),
            ("15:20", "15:50", 30, "The ending that rewires your brain", 83.0),
        ];

        let clips = spans
            .iter()
            .enumerate()
            .map(|(i, (start, end, secs, title, score))| {
                let mut clip = Clip::ready(format!("clip-{}", i + 1), *start, *end, *secs, *title)
                    .with_score(*score)
                    .with_description(format!("From \"{}\"", video.title))
                    .with_platform(Platform::Shorts);
                clip.reasoning =
                    "Opens a curiosity gap in the first two seconds and pays it off late enough \
                     to trigger the swipe-back."
                        .to_string();
                clip.tags = vec!["ai".to_string(), "shorts".to_string(), "viral".to_string()];
                clip.captions = vec![
                    CaptionOverlay {
                        text: "WAIT FOR IT".to_string(),
                        timing: "0-2s".to_string(),
                        style: CaptionStyle::Impact,
                    },
                    CaptionOverlay {
                        text: "Did you catch that?".to_string(),
                        timing: "mid".to_string(),
                        style: CaptionStyle::Question,
                    },
                    CaptionOverlay {
                        text: "Watch it again.".to_string(),
                        timing: "end".to_string(),
                        style: CaptionStyle::Highlight,
                    },
                ];
                clip.visual_hooks = vec![
                    VisualHook {
                        timestamp: "0:02".to_string(),
                        action: "Punch-in zoom on the speaker".to_string(),
                        kind: HookKind::Zoom,
                    },
                    VisualHook {
                        timestamp: "0:10".to_string(),
                        action: "Hard cut to the reaction".to_string(),
                        kind: HookKind::Cut,
                    },
                    VisualHook {
                        timestamp: "0:20".to_string(),
                        action: "Overlay the key phrase verbatim".to_string(),
                        kind: HookKind::Overlay,
                    },
                ];
                clip
            })
            .collect();

        Ok(clips)
    }
}

#[async_trait]
impl Localizer for SimulatedAnalyst {
    async fn localize(
        &self,
        clip: &Clip,
        languages: &[String],
    ) -> CollabResult<Vec<LocalizedVersion>> {
        tokio::time::sleep(self.delay).await;

        Ok(languages
            .iter()
            .map(|language| LocalizedVersion {
                language: language.clone(),
                title: format!("[{language}] {}", clip.title),
                description: format!("[{language}] {}", clip.description),
                captions: clip.captions.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcast_models::ClipStatus;

    #[tokio::test]
    async fn fetch_extracts_the_video_id() {
        let tube = SimulatedTube::instant();
        let meta = tube
            .fetch_metadata("https://youtu.be/abc123DEF45")
            .await
            .unwrap();
        assert_eq!(meta.id, "abc123DEF45");
        assert!(meta.thumbnail.contains("abc123DEF45"));
    }

    #[tokio::test]
    async fn fetch_falls_back_on_unrecognized_input() {
        let tube = SimulatedTube::instant();
        let meta = tube.fetch_metadata("not a url at all").await.unwrap();
        assert_eq!(meta.id, DEFAULT_VIDEO_ID);
    }

    #[tokio::test]
    async fn publish_fabricates_a_shorts_url() {
        let tube = SimulatedTube::instant();
        let receipt = tube.publish(&ClipId::from("clip-1")).await.unwrap();
        assert!(receipt.success);
        assert!(receipt.url.starts_with("https://youtube.com/shorts/"));
    }

    #[tokio::test]
    async fn analyst_yields_ready_clips_inside_the_video() {
        let analyst = SimulatedAnalyst::instant();
        let video = VideoMetadata::new("id12345678x", "Demo", "thumb", "Chan", "18:42");
        let clips = analyst.generate_clips(&video).await.unwrap();

        assert_eq!(clips.len(), 5);
        let video_secs = video.duration_seconds().unwrap();
        for clip in &clips {
            assert_eq!(clip.status, ClipStatus::Ready);
            let span =
                clipcast_models::validate_span(&clip.start_time, &clip.end_time, Some(video_secs))
                    .unwrap();
            assert_eq!(span.duration_seconds, clip.duration_seconds);
        }
    }

    #[tokio::test]
    async fn localize_covers_every_requested_language() {
        let analyst = SimulatedAnalyst::instant();
        let clip = Clip::ready("a", "1:30", "1:45", 15, "Hook");
        let languages = vec!["Spanish".to_string(), "Hindi".to_string()];

        let versions = analyst.localize(&clip, &languages).await.unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].language, "Spanish");
        assert!(versions[1].title.contains("[Hindi]"));
    }
}
