//! Collaborator error types.

use thiserror::Error;

pub type CollabResult<T> = Result<T, CollabError>;

/// Failure of an external collaborator call.
#[derive(Debug, Error)]
pub enum CollabError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model response contained no content")]
    EmptyResponse,

    #[error("failed to parse model output: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("candidate rejected: {0}")]
    InvalidCandidate(String),

    #[error("no candidate in the model output survived validation")]
    NoValidCandidates,

    #[error("video is unreachable: {0}")]
    Unreachable(String),
}
