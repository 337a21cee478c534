//! # Database Schema
//!
//! The `products` table, created on demand.
//!
//! ## How Schema Setup Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema On Acquire                                  │
//! │                                                                         │
//! │  Database::products()                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pool.acquire() ──► one connection                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ensure_schema(conn)                                                   │
//! │       ├── CREATE TABLE IF NOT EXISTS products ...                      │
//! │       └── CREATE INDEX IF NOT EXISTS idx_products_name ...             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository owns the connection                                 │
//! │                                                                         │
//! │  Both statements are no-ops once the table exists, so running them on  │
//! │  every acquire is cheap. If the file is wiped or the table dropped     │
//! │  behind our back, the next acquire puts it back.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Table Shape
//! ```text
//! column       type      constraints
//! ───────────  ────────  ───────────────────────────────────────────
//! id           INTEGER   PRIMARY KEY AUTOINCREMENT
//! code         TEXT      NOT NULL UNIQUE, at most 50 characters
//! name         TEXT      NOT NULL
//! category     TEXT      NULL
//! price_cents  INTEGER   NOT NULL DEFAULT 0, ≥ 0 (hundredths: 0.00)
//! stock        INTEGER   NOT NULL DEFAULT 0, ≥ 0
//! active       INTEGER   NOT NULL DEFAULT 1, 0 or 1
//! ```
//! `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Name of the product table.
pub const PRODUCTS_TABLE: &str = "products";

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    code        TEXT    NOT NULL UNIQUE CHECK (length(code) <= 50),
    name        TEXT    NOT NULL,
    category    TEXT    NULL,
    price_cents INTEGER NOT NULL DEFAULT 0 CHECK (price_cents >= 0),
    stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
    active      INTEGER NOT NULL DEFAULT 1 CHECK (active IN (0, 1))
)
"#;

const CREATE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products (name)";

/// Creates the products table and its index if they are missing.
///
/// ## Safety
/// - Idempotent: safe to run on every connection acquire
/// - Never alters or drops an existing table
pub async fn ensure_schema(conn: &mut SqliteConnection) -> DbResult<()> {
    debug!(table = PRODUCTS_TABLE, "Ensuring schema");

    sqlx::query(CREATE_PRODUCTS)
        .execute(&mut *conn)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    sqlx::query(CREATE_NAME_INDEX)
        .execute(&mut *conn)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    Ok(())
}

/// Checks whether the products table exists.
///
/// ## Usage
/// For diagnostics and tests.
pub async fn products_table_exists(conn: &mut SqliteConnection) -> DbResult<bool> {
    let found: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )
    .bind(PRODUCTS_TABLE)
    .fetch_one(&mut *conn)
    .await?;

    Ok(found > 0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;

    async fn memory_connection() -> SqliteConnection {
        SqliteConnection::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let mut conn = memory_connection().await;
        assert!(!products_table_exists(&mut conn).await.unwrap());

        ensure_schema(&mut conn).await.unwrap();
        ensure_schema(&mut conn).await.unwrap();

        assert!(products_table_exists(&mut conn).await.unwrap());
    }

    #[tokio::test]
    async fn test_schema_defaults() {
        let mut conn = memory_connection().await;
        ensure_schema(&mut conn).await.unwrap();

        sqlx::query("INSERT INTO products (code, name) VALUES ('DEF001', 'Defaulted')")
            .execute(&mut conn)
            .await
            .unwrap();

        let (price_cents, stock, active, category): (i64, i64, bool, Option<String>) =
            sqlx::query_as(
                "SELECT price_cents, stock, active, category FROM products WHERE code = 'DEF001'",
            )
            .fetch_one(&mut conn)
            .await
            .unwrap();

        assert_eq!(price_cents, 0);
        assert_eq!(stock, 0);
        assert!(active);
        assert_eq!(category, None);
    }

    #[tokio::test]
    async fn test_schema_rejects_duplicate_code() {
        let mut conn = memory_connection().await;
        ensure_schema(&mut conn).await.unwrap();

        let insert = "INSERT INTO products (code, name) VALUES ('DUP001', 'First one')";
        sqlx::query(insert).execute(&mut conn).await.unwrap();
        let err: DbError = sqlx::query(insert)
            .execute(&mut conn)
            .await
            .unwrap_err()
            .into();

        assert!(err.is_unique_violation_on("products.code"), "{err:?}");
    }
}
