//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern keeps SQL behind a small typed API.            │
//! │                                                                         │
//! │  ProductCatalog                                                        │
//! │       │                                                                 │
//! │       │  db.products().await?.find_by_code("ABC123")                   │
//! │       ▼                                                                 │
//! │  ProductRepository (owns one pooled connection)                        │
//! │  ├── list(&mut self, limit, offset)                                    │
//! │  ├── count(&mut self)                                                  │
//! │  ├── find_by_code(&mut self, code)                                     │
//! │  ├── insert(&mut self, product)                                        │
//! │  └── delete_by_id(&mut self, id)                                       │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                             │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  No business rules live here: the repository stores whatever it is     │
//! │  given and lets the table constraints have the last word.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product storage

pub mod product;
