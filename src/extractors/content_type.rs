//! Reject requests whose body is not declared as JSON.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::CONTENT_TYPE, request::Parts},
};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Guard for POST/PUT handlers: the `Content-Type` essence must be `application/json`.
/// Parameters such as `charset` are allowed. Runs on request parts, before the body is read.
#[derive(Clone, Copy, Debug)]
pub struct RequireJson;

#[async_trait]
impl<S> FromRequestParts<S> for RequireJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if content_type.map(is_json).unwrap_or(false) {
            return Ok(RequireJson);
        }
        tracing::error!(content_type = ?content_type, "Invalid Content-Type");
        Err(AppError::UnsupportedMediaType(format!(
            "Content-Type must be {}",
            JSON_MEDIA_TYPE
        )))
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}
