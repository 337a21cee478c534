//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Ordered, windowed listing
//! - Exact lookup by code
//! - Insert returning the stored product
//! - Delete by id
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products row                          Product                         │
//! │  ─────────────────────────             ──────────────────────────      │
//! │  id           INTEGER        ───────►  id: Some(i64)                   │
//! │  code         TEXT           ───────►  code                            │
//! │  name         TEXT           ───────►  name                            │
//! │  category     TEXT / NULL    ───────►  category: Option<Category>      │
//! │  price_cents  INTEGER        ───────►  price: Money                    │
//! │  stock        INTEGER        ───────►  stock                           │
//! │  active       INTEGER 0/1    ───────►  active: bool                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! A `category` value that is not a known category (written by some other
//! tool) is read as `None` and logged, so one odd row never breaks a listing.

use sqlx::pool::PoolConnection;
use sqlx::{FromRow, Sqlite};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use stockroom_core::pagination::clamp_window;
use stockroom_core::{Category, Money, Product};

const CODE_COLUMN: &str = "products.code";

const SELECT_COLUMNS: &str = "SELECT id, code, name, category, price_cents, stock, active FROM products";

/// One row of the products table.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    code: String,
    name: String,
    category: Option<String>,
    price_cents: i64,
    stock: i64,
    active: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = row.category.as_deref().and_then(|raw| match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(e) => {
                warn!(id = row.id, error = %e, "Unreadable category, treating as unset");
                None
            }
        });

        Product {
            id: Some(row.id),
            code: row.code,
            name: row.name,
            category,
            price: Money::from_cents(row.price_cents),
            stock: row.stock,
            active: row.active,
        }
    }
}

/// Repository for product database operations.
///
/// Holds one pooled connection for its whole life. Get one from
/// [`Database::products`](crate::Database::products), use it for a
/// single operation, and let it drop.
///
/// ## Usage
/// ```rust,ignore
/// let mut repo = db.products().await?;
/// if repo.find_by_code("ABC123").await?.is_none() {
///     let stored = repo.insert(&product).await?;
/// }
/// ```
#[derive(Debug)]
pub struct ProductRepository {
    conn: PoolConnection<Sqlite>,
}

impl ProductRepository {
    /// Wraps a connection that already has the schema in place.
    pub fn new(conn: PoolConnection<Sqlite>) -> Self {
        ProductRepository { conn }
    }

    /// Lists products ordered by name.
    ///
    /// ## Arguments
    /// * `limit` - Maximum rows (raised to 1 if lower)
    /// * `offset` - Rows to skip (raised to 0 if lower)
    ///
    /// Products sharing a name come back in id order, so consecutive pages
    /// never overlap or skip.
    pub async fn list(&mut self, limit: i64, offset: i64) -> DbResult<Vec<Product>> {
        let (limit, offset) = clamp_window(limit, offset);
        debug!(limit, offset, "Listing products");

        let sql = format!("{SELECT_COLUMNS} ORDER BY name ASC, id ASC LIMIT ?1 OFFSET ?2");
        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = rows.len(), "Listing returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts all products.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }

    /// Gets a product by its exact code.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product has this code
    pub async fn find_by_code(&mut self, code: &str) -> DbResult<Option<Product>> {
        debug!(code = %code, "Looking up product by code");

        let sql = format!("{SELECT_COLUMNS} WHERE code = ?1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(code)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a product and returns it as stored, with its new id.
    ///
    /// Any `id` already on `product` is ignored: the table assigns one.
    /// The caller's value is left untouched.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Stored product, `id` set
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&mut self, product: &Product) -> DbResult<Product> {
        debug!(code = %product.code, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (code, name, category, price_cents, stock, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(product.category.map(|c| c.as_str()))
        .bind(product.price.cents())
        .bind(product.stock)
        .bind(product.active)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| DbError::from(e).with_unique_value(CODE_COLUMN, &product.code))?;

        let id = result.last_insert_rowid();
        debug!(id, code = %product.code, "Product inserted");

        Ok(Product {
            id: Some(id),
            ..product.clone()
        })
    }

    /// Deletes the product with this id.
    ///
    /// Deleting an id that does not exist is not an error; nothing changes.
    pub async fn delete_by_id(&mut self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id, rows = result.rows_affected(), "Delete by id");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
