//! In-memory account store for tests and ephemeral sessions.

use std::sync::RwLock;

use async_trait::async_trait;

use clipcast_models::UserAccount;

use crate::{AccountStore, StoreResult};

/// Keeps the account record in process memory only.
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<UserAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted account.
    pub fn with_account(account: UserAccount) -> Self {
        Self {
            record: RwLock::new(Some(account)),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn load(&self) -> StoreResult<Option<UserAccount>> {
        Ok(self.record.read().expect("store lock poisoned").clone())
    }

    async fn save(&self, account: &UserAccount) -> StoreResult<()> {
        *self.record.write().expect("store lock poisoned") = Some(account.clone());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.record.write().expect("store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_clear() {
        let store = MemoryStore::new();
        let account = UserAccount::linked("Memory Channel", None, "1K");

        store.save(&account).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(account));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }
}
