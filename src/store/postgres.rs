//! PostgreSQL backend: accounts table DDL and parameterized CRUD statements.

use super::AccountStore;
use crate::account::{Account, AccountPayload};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub const ACCOUNTS_TABLE: &str = "accounts";

const COLUMNS: &str = "id, name, email, address, phone_number, date_joined";

/// Create the accounts table if it does not exist. Startup bootstrap, not a migration.
pub async fn ensure_accounts_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            date_joined DATE NOT NULL DEFAULT CURRENT_DATE
        )
        "#,
        ACCOUNTS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| {
            AppError::Config(crate::error::ConfigError::Invalid {
                key: "DATABASE_URL",
                reason: "no database path".into(),
            })
        })?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    };
    let db_name = path.trim();
    let base = url.get(..path_start).unwrap_or(url);
    // Connection parameters (host socket, sslmode) apply to the maintenance database too.
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Account store over a shared connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PgAccountStore { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email, address, phone_number, date_joined) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ACCOUNTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.address)
            .bind(&account.phone_number)
            .bind(account.date_joined)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find(&self, id: i64) -> Result<Option<Account>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, ACCOUNTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn all(&self) -> Result<Vec<Account>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, ACCOUNTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Account>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, payload: &AccountPayload) -> Result<Account, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, email = $3, address = $4, phone_number = $5, date_joined = COALESCE($6, date_joined) WHERE id = $1 RETURNING {}",
            ACCOUNTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(&payload.address)
            .bind(&payload.phone_number)
            .bind(payload.date_joined)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::account_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", ACCOUNTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id, "delete of missing account ignored");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, db) =
            parse_db_name_from_url("postgres://u:p@localhost:5432/accounts?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres?sslmode=disable");
        assert_eq!(db, "accounts");
    }

    #[test]
    fn admin_url_keeps_socket_host() {
        let (admin, db) =
            parse_db_name_from_url("postgres:///accounts?host=/var/run/postgresql").unwrap();
        assert_eq!(admin, "postgres:///postgres?host=/var/run/postgresql");
        assert_eq!(db, "accounts");
    }

    #[test]
    fn admin_url_without_query() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost/accounts").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres");
        assert_eq!(db, "accounts");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("acc\"ounts"), "\"acc\"\"ounts\"");
    }
}
