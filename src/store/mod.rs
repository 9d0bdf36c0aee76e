//! Persistence adapter for accounts: the store trait and its Postgres and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::{ensure_accounts_table, ensure_database_exists, PgAccountStore, ACCOUNTS_TABLE};

use crate::account::{Account, AccountPayload};
use crate::error::AppError;
use async_trait::async_trait;

/// Account persistence. Each call is one auto-committed unit: it fully applies or leaves the store unchanged.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. The input id is ignored and a fresh one assigned.
    async fn create(&self, account: &Account) -> Result<Account, AppError>;

    /// Fetch by id. A missing id is `Ok(None)`, never an error.
    async fn find(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Every account, ordered by id.
    async fn all(&self) -> Result<Vec<Account>, AppError>;

    /// Replace all mutable fields of account `id` in one write. `date_joined` keeps its stored
    /// value when the payload omits it. Fails with `NotFound` when absent.
    async fn update(&self, id: i64, payload: &AccountPayload) -> Result<Account, AppError>;

    /// Remove account `id` if present. Deleting a missing id succeeds.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Readiness probe against the backing store.
    async fn ping(&self) -> Result<(), AppError>;

    /// Release backing resources on service stop.
    async fn close(&self);
}
