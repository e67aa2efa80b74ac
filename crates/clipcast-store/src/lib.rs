//! Account persistence for ClipCast.
//!
//! The publishing account is the only durable state in the system: saved on
//! connect, cleared on disconnect, loaded once at startup. Everything else
//! (clips, video metadata) is session-only.
//!
//! The store is an injected interface rather than a process-wide singleton so
//! the controller can be exercised against [`MemoryStore`] in tests.

use async_trait::async_trait;
use thiserror::Error;

use clipcast_models::UserAccount;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Fixed key the account record is stored under.
pub const ACCOUNT_KEY: &str = "account";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored account record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable storage for the publishing account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load the persisted account, if any.
    async fn load(&self) -> StoreResult<Option<UserAccount>>;

    /// Persist the account, replacing any previous record.
    async fn save(&self, account: &UserAccount) -> StoreResult<()>;

    /// Remove the persisted account. Idempotent.
    async fn clear(&self) -> StoreResult<()>;
}
