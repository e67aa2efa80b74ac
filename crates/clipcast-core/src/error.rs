//! Controller error types.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Infrastructure failure surfaced to the embedding shell.
///
/// User-facing operation failures never appear here; they are converted into
/// [`crate::Signal`]s at the controller boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("collaborator error: {0}")]
    Collab(#[from] clipcast_collab::CollabError),

    #[error("store error: {0}")]
    Store(#[from] clipcast_store::StoreError),
}
