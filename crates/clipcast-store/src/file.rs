//! JSON-file backed account store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use clipcast_models::UserAccount;

use crate::{AccountStore, StoreResult, ACCOUNT_KEY};

/// Persists the account as a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{ACCOUNT_KEY}.json")),
        }
    }

    /// Create a store from the `CLIPCAST_DATA_DIR` environment variable,
    /// defaulting to `./data`.
    pub fn from_env() -> Self {
        let dir = std::env::var("CLIPCAST_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        Self::new(dir)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AccountStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Option<UserAccount>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, account: &UserAccount) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(account)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "Saved account record");
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared account record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load().await.unwrap().is_none());

        let account = UserAccount::linked("Test Channel", Some("@test"), "5K");
        store.save(&account).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(account));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing again is a no-op
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        tokio::fs::write(store.path(), b"{not json").await.unwrap();

        assert!(matches!(store.load().await, Err(crate::StoreError::Corrupt(_))));
    }
}
