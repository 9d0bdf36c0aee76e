//! Account CRUD handlers: create, list, read, update, delete.

use crate::account::{Account, AccountPayload};
use crate::error::AppError;
use crate::extractors::RequireJson;
use crate::response::{account_location, created, no_content, ok};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use serde_json::Value;

/// Path ids are integers; anything else cannot name an account.
fn parse_id(id_str: &str) -> Option<i64> {
    id_str.trim().parse().ok()
}

fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Deserialization(format!("Invalid JSON: {}", e)))
}

pub async fn create(
    State(state): State<AppState>,
    _json: RequireJson,
    body: Bytes,
) -> Result<Response, AppError> {
    tracing::info!("Request to create an Account");
    let account = Account::deserialize(&parse_body(&body)?)?;
    let account = state.store.create(&account).await?;
    tracing::info!(account_id = account.id, "Account created");
    Ok(created(account_location(account.id), account.serialize()))
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    tracing::info!("Request to list Accounts");
    let accounts: Vec<Value> = state
        .store
        .all()
        .await?
        .iter()
        .map(Account::serialize)
        .collect();
    Ok(ok(accounts))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(account_id = %id_str, "Request to read an Account");
    let id = parse_id(&id_str).ok_or_else(|| AppError::account_not_found(&id_str))?;
    let account = state
        .store
        .find(id)
        .await?
        .ok_or_else(|| AppError::account_not_found(id))?;
    Ok(ok(account.serialize()))
}

/// Order: content type, existence, body shape. A missing account wins over a bad body.
/// The write itself is a single store call; the lookup only runs to rank a bad body.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    _json: RequireJson,
    body: Bytes,
) -> Result<Response, AppError> {
    tracing::info!(account_id = %id_str, "Request to update an Account");
    let id = parse_id(&id_str).ok_or_else(|| AppError::account_not_found(&id_str))?;
    let payload = match parse_body(&body).and_then(|v| AccountPayload::from_value(&v)) {
        Ok(payload) => payload,
        Err(e) => {
            if state.store.find(id).await?.is_none() {
                return Err(AppError::account_not_found(id));
            }
            return Err(e);
        }
    };
    let account = state.store.update(id, &payload).await?;
    tracing::info!(account_id = account.id, "Account updated");
    Ok(ok(account.serialize()))
}

/// 204 for any integer id: deleting an account that does not exist is a no-op.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    tracing::info!(account_id = %id_str, "Request to delete an Account");
    let id = parse_id(&id_str).ok_or_else(|| AppError::account_not_found(&id_str))?;
    state.store.delete(id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids_only() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-1"), Some(-1));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let err = parse_body(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, AppError::Deserialization(_)));
    }
}
