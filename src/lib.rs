//! Account service: REST CRUD over a single persisted Account entity.

pub mod account;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use account::{Account, AccountPayload};
pub use config::{ServiceConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use routes::{account_routes, app, common_routes};
pub use state::AppState;
pub use store::{
    ensure_accounts_table, ensure_database_exists, AccountStore, MemoryAccountStore, PgAccountStore,
};
