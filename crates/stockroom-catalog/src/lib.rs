//! # stockroom-catalog: Business Rules for the Product Catalog
//!
//! The only entry point request handlers should use. It validates input,
//! keeps product codes unique, and pages listings, delegating storage to
//! `stockroom-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Request handler (form post, list view, delete button)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              stockroom-catalog (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ProductCatalog          CatalogError          CatalogConfig   │   │
//! │  │   validate / create       Validation            env vars        │   │
//! │  │   list / count / page     DuplicateCode                         │   │
//! │  │   find_by_code / delete   InvalidId / Storage                   │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │                  ▼                                 ▼                    │
//! │        stockroom-core (rules)            stockroom-db (SQLite)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_catalog::{CatalogConfig, ProductCatalog};
//!
//! stockroom_catalog::init_tracing();
//! let catalog = ProductCatalog::open(&CatalogConfig::from_env()?).await?;
//!
//! let product = catalog.create(&draft).await?;
//! let page = catalog.page(1).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{ProductCatalog, ProductPage};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, CatalogResult, ErrorKind};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every query
/// - `RUST_LOG=stockroom_db=debug,info` - Debug only for the store
/// - Default: `info`, with sqlx held to `warn`
///
/// Call once, from a binary's `main`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
