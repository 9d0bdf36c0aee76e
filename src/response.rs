//! Response helpers for account handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Path of the read endpoint for one account; used as the `Location` of created resources.
pub fn account_location(id: i64) -> String {
    format!("/accounts/{}", id)
}

pub fn created<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
