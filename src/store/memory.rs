//! In-memory backend for testing and development

use super::AccountStore;
use crate::account::{Account, AccountPayload};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Accounts keyed by id; ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    data: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    accounts: BTreeMap<i64, Account>,
    last_id: i64,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        let mut state = self.data.write().await;
        state.last_id += 1;
        let stored = Account {
            id: state.last_id,
            ..account.clone()
        };
        state.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: i64) -> Result<Option<Account>, AppError> {
        Ok(self.data.read().await.accounts.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.data.read().await.accounts.values().cloned().collect())
    }

    async fn update(&self, id: i64, payload: &AccountPayload) -> Result<Account, AppError> {
        let mut state = self.data.write().await;
        let slot = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::account_not_found(id))?;
        slot.apply(payload.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.data.write().await.accounts.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}
