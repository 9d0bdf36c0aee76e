//! Account entity and its JSON wire format.

use crate::error::AppError;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Id carried by an account that has not been stored yet.
pub const UNASSIGNED_ID: i64 = 0;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub date_joined: NaiveDate,
}

/// Request body for create and update. Unknown keys (including `id`) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountPayload {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub date_joined: Option<NaiveDate>,
}

impl AccountPayload {
    /// Parse a JSON value into the payload schema. Fails closed on missing or mistyped fields.
    pub fn from_value(payload: &Value) -> Result<Self, AppError> {
        if !payload.is_object() {
            return Err(AppError::Deserialization(
                "Invalid Account: body must be a JSON object".into(),
            ));
        }
        AccountPayload::deserialize(payload)
            .map_err(|e| AppError::Deserialization(format!("Invalid Account: {}", e)))
    }
}

impl Account {
    /// Build an account from a JSON payload. `id` is kept when it is an integer so that
    /// serialized accounts read back unchanged; otherwise the account is unassigned.
    pub fn deserialize(payload: &Value) -> Result<Self, AppError> {
        let fields = AccountPayload::from_value(payload)?;
        let id = payload
            .get("id")
            .and_then(Value::as_i64)
            .unwrap_or(UNASSIGNED_ID);
        Ok(Account {
            id,
            name: fields.name,
            email: fields.email,
            address: fields.address,
            phone_number: fields.phone_number,
            date_joined: fields.date_joined.unwrap_or_else(today),
        })
    }

    /// Replace every mutable field from `payload`. A missing `date_joined` keeps the stored one.
    pub fn apply(&mut self, payload: AccountPayload) {
        self.name = payload.name;
        self.email = payload.email;
        self.address = payload.address;
        self.phone_number = payload.phone_number;
        if let Some(date_joined) = payload.date_joined {
            self.date_joined = date_joined;
        }
    }

    pub fn serialize(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "address": self.address,
            "phone_number": self.phone_number,
            "date_joined": self.date_joined.format("%Y-%m-%d").to_string(),
        })
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Account {
        Account {
            id: 12,
            name: "Joe".into(),
            email: "joe@x.com".into(),
            address: "1 Main St".into(),
            phone_number: "555-0100".into(),
            date_joined: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }
    }

    #[test]
    fn serialize_renders_iso_date() {
        let v = sample().serialize();
        assert_eq!(v["id"], 12);
        assert_eq!(v["date_joined"], "2023-04-01");
        assert_eq!(v["phone_number"], "555-0100");
    }

    #[test]
    fn deserialize_reads_back_serialized_account() {
        let a = sample();
        assert_eq!(Account::deserialize(&a.serialize()).unwrap(), a);
    }

    #[test]
    fn deserialize_defaults_id_and_date_joined() {
        let a = Account::deserialize(&json!({
            "name": "Joe",
            "email": "joe@x.com",
            "address": "1 Main St",
            "phone_number": "555-0100"
        }))
        .unwrap();
        assert_eq!(a.id, UNASSIGNED_ID);
        assert_eq!(a.date_joined, Utc::now().date_naive());
    }

    #[test]
    fn deserialize_treats_null_date_as_absent() {
        let a = Account::deserialize(&json!({
            "name": "Joe",
            "email": "joe@x.com",
            "address": "1 Main St",
            "phone_number": "555-0100",
            "date_joined": null
        }))
        .unwrap();
        assert_eq!(a.date_joined, Utc::now().date_naive());
    }

    #[test]
    fn deserialize_rejects_missing_field() {
        let err = Account::deserialize(&json!({
            "name": "Joe",
            "email": "joe@x.com",
            "address": "1 Main St"
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::Deserialization(ref m) if m.contains("phone_number")));
    }

    #[test]
    fn deserialize_rejects_wrong_type() {
        let err = Account::deserialize(&json!({
            "name": 5,
            "email": "joe@x.com",
            "address": "1 Main St",
            "phone_number": "555-0100"
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::Deserialization(_)));
    }

    #[test]
    fn deserialize_rejects_bad_date_and_non_objects() {
        let bad_date = json!({
            "name": "Joe",
            "email": "joe@x.com",
            "address": "1 Main St",
            "phone_number": "555-0100",
            "date_joined": "yesterday"
        });
        assert!(matches!(Account::deserialize(&bad_date), Err(AppError::Deserialization(_))));
        assert!(matches!(Account::deserialize(&json!([1, 2])), Err(AppError::Deserialization(_))));
    }

    #[test]
    fn apply_keeps_id_and_stored_date_when_omitted() {
        let mut a = sample();
        let payload = AccountPayload::from_value(&json!({
            "id": 99,
            "name": "Jane",
            "email": "jane@x.com",
            "address": "2 Main St",
            "phone_number": "555-0199"
        }))
        .unwrap();
        a.apply(payload);
        assert_eq!(a.id, 12);
        assert_eq!(a.name, "Jane");
        assert_eq!(a.date_joined, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
    }
}
