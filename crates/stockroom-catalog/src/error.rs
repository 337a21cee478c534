//! # Catalog Error Types
//!
//! What a caller of [`ProductCatalog`](crate::ProductCatalog) can get back.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  ProductCatalog::create(draft)                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate_product ── ValidationError ─────────► CatalogError::Validation│
//! │         │                                                               │
//! │         ▼                                                               │
//! │  find_by_code ── Some(_) ─────────────────────► CatalogError::DuplicateCode
//! │         │                                                               │
//! │         ▼                                                               │
//! │  insert ── UniqueViolation(products.code) ────► CatalogError::DuplicateCode
//! │         └─ any other DbError ─────────────────► CatalogError::Storage   │
//! │                                                                         │
//! │  ProductCatalog::delete(0) ───────────────────► CatalogError::InvalidId │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absence is never an error: a code lookup that finds nothing returns
//! `Ok(None)`, and deleting an unknown id returns `Ok(())`.

use serde::Serialize;
use stockroom_core::ValidationError;
use stockroom_db::DbError;
use thiserror::Error;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input broke a product rule. Carries the first rule that failed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A product with this code is already stored.
    #[error("a product with code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Ids are assigned from 1 upwards; zero and negatives never name a row.
    #[error("invalid id: {id}")]
    InvalidId { id: i64 },

    /// The store failed. Nothing was partially applied.
    #[error("storage failure: {0}")]
    Storage(#[from] DbError),
}

/// Coarse error category for callers that branch on kind, not text.
///
/// ## Usage in a request handler
/// ```rust,ignore
/// match catalog.create(&draft).await {
///     Ok(product) => redirect_to_list(),
///     Err(e) => match e.kind() {
///         ErrorKind::Validation => rerender_form(e.to_string()),
///         ErrorKind::Conflict => rerender_form(e.to_string()),
///         _ => server_error(),
///     },
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Bad field value (re-prompt the user)
    Validation,

    /// Code already taken
    Conflict,

    /// Argument can never be valid (e.g. id ≤ 0)
    InvalidArgument,

    /// Store unavailable or rejected the operation
    Storage,
}

impl CatalogError {
    /// Creates a DuplicateCode error.
    pub fn duplicate_code(code: impl Into<String>) -> Self {
        CatalogError::DuplicateCode { code: code.into() }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::DuplicateCode { .. } => ErrorKind::Conflict,
            CatalogError::InvalidId { .. } => ErrorKind::InvalidArgument,
            CatalogError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
