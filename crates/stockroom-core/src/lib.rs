//! # stockroom-core: Pure Domain Rules for Stockroom
//!
//! This crate holds the product catalog's domain model and every business
//! rule that can be checked without touching storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Request layer (HTTP, forms, views)                 │   │
//! │  │         out of this workspace, calls the catalog facade         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-catalog (facade)                      │   │
//! │  │        validate → uniqueness check → insert / list / delete     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation │  │pagination │  │   │
//! │  │   │  Product  │  │   Money   │  │  ordered   │  │  offset   │  │   │
//! │  │   │ Category  │  │  parsing  │  │   rules    │  │  pages    │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │              SQLite schema, queries, row mapping                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, ProductDraft, ProductForm)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Ordered product validation
//! - [`pagination`] - Page/offset arithmetic
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//! use stockroom_core::validation::validate_product;
//! use stockroom_core::{Category, ProductDraft};
//!
//! let draft = ProductDraft {
//!     code: Some(" ABC123 ".to_string()),
//!     name: Some("Wireless Mouse".to_string()),
//!     category: Some("Accessories".to_string()),
//!     price: Some(Money::from_cents(1999)),
//!     stock: Some(50),
//!     active: Some(true),
//! };
//!
//! let product = validate_product(Some(&draft)).unwrap();
//! assert_eq!(product.code, "ABC123");
//! assert_eq!(product.category, Some(Category::Accessories));
//! assert!(product.is_transient());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockroom_core::Money` instead of
// `use stockroom_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a product code after trimming.
pub const MIN_CODE_LEN: usize = 3;

/// Maximum length of a product code after trimming.
///
/// Matches the width external tooling expects for the `code` column.
pub const MAX_CODE_LEN: usize = 50;

/// Minimum length of a product name after trimming.
pub const MIN_NAME_LEN: usize = 5;

/// Maximum length of a product name after trimming.
pub const MAX_NAME_LEN: usize = 120;

/// Default number of products per listing page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
