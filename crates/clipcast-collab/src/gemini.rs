//! Gemini client for clip candidate generation and localization.
//!
//! The model is asked for JSON and its output crosses a typed
//! parse-and-validate boundary: candidates are deserialized into
//! [`ClipCandidate`], each span is re-validated against the source video, and
//! only surviving candidates are promoted to [`Clip`]s.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use async_trait::async_trait;
use clipcast_models::{
    timestamp::validate_span, CaptionOverlay, Clip, ClipId, ClipStatus, LocalizedVersion,
    Platform, VideoMetadata, VisualHook,
};

use crate::error::{CollabError, CollabResult};
use crate::{ClipGenerator, Localizer};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Models tried in order until one answers.
const MODEL_FALLBACKS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"];

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// A clip candidate as the model emits it, before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipCandidate {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub duration_seconds: f64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub viral_score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub platform_target: Platform,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub suggested_captions: Vec<CaptionOverlay>,
    #[serde(default)]
    pub visual_hooks: Vec<VisualHook>,
}

impl ClipCandidate {
    /// Validate the candidate's span and promote it to a `Ready` clip.
    ///
    /// `duration_seconds` is recomputed from the parsed span; the value the
    /// model claimed is discarded.
    pub fn into_clip(self, video_duration: Option<f64>) -> CollabResult<Clip> {
        let span = validate_span(&self.start_time, &self.end_time, video_duration)
            .map_err(|e| CollabError::InvalidCandidate(format!("'{}': {e}", self.id)))?;

        Ok(Clip {
            id: ClipId::from(self.id),
            start_time: self.start_time,
            end_time: self.end_time,
            duration_seconds: span.duration_seconds,
            title: self.title,
            description: self.description,
            viral_score: self.viral_score,
            reasoning: self.reasoning,
            status: ClipStatus::Ready,
            tags: self.tags,
            captions: self.suggested_captions,
            visual_hooks: self.visual_hooks,
            platform_target: self.platform_target,
            published_url: None,
            scheduled_time: None,
            localized_versions: Vec::new(),
            selected_voice: None,
        })
    }
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> CollabResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            CollabError::Unreachable("GEMINI_API_KEY not configured".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Call one model and return the raw response text.
    async fn call_model(&self, model: &str, prompt: &str) -> CollabResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CollabError::Api { status, body });
        }

        let parsed: GeminiResponse = response.json().await?;
        parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or(CollabError::EmptyResponse)
    }

    /// Run a prompt through the fallback model list, parsing each answer
    /// with `parse` until one attempt fully succeeds.
    async fn generate<T>(
        &self,
        prompt: &str,
        parse: impl Fn(&str) -> CollabResult<T>,
    ) -> CollabResult<T> {
        let mut last_error = None;

        for model in MODEL_FALLBACKS {
            match self.call_model(model, prompt).await.and_then(|text| parse(&text)) {
                Ok(value) => {
                    info!(model = %model, "Gemini call succeeded");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Gemini attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CollabError::EmptyResponse))
    }
}

#[async_trait]
impl ClipGenerator for GeminiClient {
    async fn generate_clips(&self, video: &VideoMetadata) -> CollabResult<Vec<Clip>> {
        let prompt = build_analysis_prompt(video);
        let video_duration = video.duration_seconds().ok();
        self.generate(&prompt, |text| {
            let candidates = parse_clip_candidates(text)?;
            promote_candidates(candidates, video_duration)
        })
        .await
    }
}

#[async_trait]
impl Localizer for GeminiClient {
    async fn localize(
        &self,
        clip: &Clip,
        languages: &[String],
    ) -> CollabResult<Vec<LocalizedVersion>> {
        let prompt = build_localize_prompt(clip, languages);
        self.generate(&prompt, parse_localized_versions).await
    }
}

/// Parse raw model output into clip candidates.
///
/// Tolerates a markdown ```json fence around the payload.
pub fn parse_clip_candidates(text: &str) -> CollabResult<Vec<ClipCandidate>> {
    serde_json::from_str(strip_code_fence(text)).map_err(CollabError::Parse)
}

/// Parse raw model output into localized versions.
pub fn parse_localized_versions(text: &str) -> CollabResult<Vec<LocalizedVersion>> {
    serde_json::from_str(strip_code_fence(text)).map_err(CollabError::Parse)
}

/// Validate candidates against the source video and promote survivors.
///
/// Candidates with invalid spans are dropped with a warning; an entirely
/// invalid non-empty batch is an error.
pub fn promote_candidates(
    candidates: Vec<ClipCandidate>,
    video_duration: Option<f64>,
) -> CollabResult<Vec<Clip>> {
    let total = candidates.len();
    let clips: Vec<Clip> = candidates
        .into_iter()
        .filter_map(|candidate| match candidate.into_clip(video_duration) {
            Ok(clip) => Some(clip),
            Err(e) => {
                warn!(error = %e, "Dropping candidate with invalid span");
                None
            }
        })
        .collect();

    if clips.is_empty() && total > 0 {
        return Err(CollabError::NoValidCandidates);
    }
    Ok(clips)
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Build the clip-analysis prompt for a source video.
pub fn build_analysis_prompt(video: &VideoMetadata) -> String {
    format!(
        r#"Act as a world-class social media growth strategist and video editor.
Analyze this YouTube video:
Title: {title}
Channel: {channel}
Duration: {duration}

Task: identify 5 segments optimized for high retention on vertical platforms.

For each segment include:
1. Precise timestamps (start/end, within the video duration).
2. A retention strategy: the psychology behind why the segment works.
3. 3-4 suggested captions (text overlays for the viewer).
4. 3 visual hooks (instructions for the edit, e.g. "Zoom at 5s").

IMPORTANT: you must strictly follow this output format.
Return ONLY a JSON array with this element schema:
[
  {{
    "id": "unique-id",
    "startTime": "M:SS",
    "endTime": "M:SS",
    "durationSeconds": 0,
    "title": "Hook title",
    "description": "Engaging description",
    "viralScore": 0,
    "reasoning": "Why this retains viewers",
    "platformTarget": "shorts",
    "tags": ["tag"],
    "suggestedCaptions": [{{"text": "...", "timing": "0-3s", "style": "impact"}}],
    "visualHooks": [{{"timestamp": "0:05", "action": "...", "type": "zoom"}}]
  }}
]

Allowed caption styles: impact, question, highlight.
Allowed hook types: zoom, cut, overlay, transition.
Allowed platform targets: shorts, tik_tok, reels, universal."#,
        title = video.title,
        channel = video.channel_title,
        duration = video.duration,
    )
}

/// Build the localization prompt for a clip.
pub fn build_localize_prompt(clip: &Clip, languages: &[String]) -> String {
    format!(
        r#"Localize this viral video clip for: {languages}.
Title: {title}
Description: {description}

Return ONLY a JSON array, one element per language, with this element schema:
[
  {{
    "language": "Spanish",
    "title": "Localized title",
    "description": "Localized description",
    "captions": [{{"text": "...", "timing": "0-3s", "style": "impact"}}]
  }}
]"#,
        languages = languages.join(", "),
        title = clip.title,
        description = clip.description,
    )
}
