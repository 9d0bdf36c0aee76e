//! Route assembly: common and account routes plus HTTP middleware.

pub mod account;
pub mod common;

pub use account::account_routes;
pub use common::{common_routes, SERVICE_NAME, SERVICE_VERSION};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router. Bodies larger than `max_body_bytes` are rejected with 413.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(account_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
