//! Shared application state for all routes.

use crate::store::AccountStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Opened at startup and closed on shutdown; handlers only borrow it per request.
    pub store: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new<S: AccountStore + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
