//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductForm    │   │  ProductDraft   │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw strings    │──►│  typed, every   │──►│  validated      │       │
//! │  │  from a request │   │  field optional │   │  id: Option     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │       TryFrom               validate_product         │                  │
//! │                                                       ▼                 │
//! │                                              ┌─────────────────┐       │
//! │                                              │    Category     │       │
//! │                                              │  Electronics    │       │
//! │                                              │  Accessories    │       │
//! │                                              │  Furniture      │       │
//! │                                              │  Clothing       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `id`: surrogate key assigned by storage, absent while transient
//! - `code`: business identifier, unique across the catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Electronics,
    Accessories,
    Furniture,
    Clothing,
}

/// A category name that is not one of [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Accessories,
        Category::Furniture,
        Category::Clothing,
    ];

    /// Canonical name, as written to storage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Accessories => "Accessories",
            Category::Furniture => "Furniture",
            Category::Clothing => "Clothing",
        }
    }

    /// Labels used by catalogs that were first entered in Spanish.
    const fn legacy_label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronicos",
            Category::Accessories => "Accesorios",
            Category::Furniture => "Muebles",
            Category::Clothing => "Ropa",
        }
    }

    /// Canonical names of every category.
    pub fn names() -> Vec<String> {
        Category::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

/// Case-insensitive match against the canonical name or the legacy label.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(wanted)
                    || c.legacy_label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// An inventory item in the catalog.
///
/// ## Lifecycle
/// ```text
/// validate_product(draft) ──► Product { id: None, .. }        (transient)
///                                   │
///                                   ▼  insert
///                             Product { id: Some(42), .. }    (persisted)
/// ```
///
/// ## Equality
/// Two products are equal when both have an `id` and the ids match.
/// If either one is transient, they are equal when their `code`s match.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Surrogate key assigned by storage. `None` until inserted.
    pub id: Option<i64>,

    /// Business identifier, unique across the catalog.
    pub code: String,

    /// Display name. Listings are ordered by this field.
    pub name: String,

    /// Category. Storage allows `NULL` for rows written by other tools.
    pub category: Option<Category>,

    /// Unit price (2 fractional digits).
    pub price: Money,

    /// Units on hand.
    pub stock: i64,

    /// Whether the product is offered.
    pub active: bool,
}

impl Product {
    /// Creates a transient product with storage defaults for the rest:
    /// no category, price 0.00, stock 0, active.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Product {
            id: None,
            code: code.into(),
            name: name.into(),
            category: None,
            price: Money::zero(),
            stock: 0,
            active: true,
        }
    }

    /// Sets the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the price.
    pub fn price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Sets the stock level.
    pub fn stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Sets the active flag.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// True while the product has no storage identifier.
    #[inline]
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.code == other.code,
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Product input as handed over by a caller, before any rule is checked.
///
/// Strings may carry surrounding whitespace and any field may be absent;
/// [`crate::validation::validate_product`] decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub active: Option<bool>,
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw form fields, every value a string exactly as submitted.
///
/// ## Coercion
/// ```text
/// field     blank/missing    otherwise
/// ───────   ─────────────    ──────────────────────────────────────────
/// code      None             trimmed
/// name      None             trimmed
/// category  None             trimmed (checked later by validation)
/// price     None             decimal, ≤ 2 places, else InvalidFormat
/// stock     None             whole number, else InvalidFormat
/// active    false            on/true/1/yes → true, anything else → false
/// ```
/// `active` follows checkbox semantics: an unchecked box sends nothing, so
/// a missing value means inactive. The `true` default only applies to a
/// [`ProductDraft`] that leaves `active` unset.
///
/// [`crate::validation::validate_form`] coerces and validates in one pass,
/// so a bad number is reported at its field's place in the rule order.
/// `ProductDraft::try_from` only coerces, failing on the first bad number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub active: Option<String>,
}

impl ProductForm {
    /// Trimmed code, `None` when blank.
    pub fn code(&self) -> Option<&str> {
        non_blank(&self.code)
    }

    /// Trimmed name, `None` when blank.
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    /// Trimmed category, `None` when blank.
    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    /// Parsed price, `None` when blank.
    pub fn price(&self) -> Result<Option<Money>, ValidationError> {
        non_blank(&self.price)
            .map(|raw| {
                raw.parse::<Money>()
                    .map_err(|e| ValidationError::InvalidFormat {
                        field: "price".to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }

    /// Parsed stock, `None` when blank.
    pub fn stock(&self) -> Result<Option<i64>, ValidationError> {
        non_blank(&self.stock)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| ValidationError::InvalidFormat {
                        field: "stock".to_string(),
                        reason: "must be a whole number".to_string(),
                    })
            })
            .transpose()
    }

    /// Checkbox value: true for on/true/1/yes, false otherwise (missing included).
    pub fn active(&self) -> bool {
        non_blank(&self.active)
            .map(|raw| {
                ["on", "true", "1", "yes"]
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(raw))
            })
            .unwrap_or(false)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<&ProductForm> for ProductDraft {
    type Error = ValidationError;

    fn try_from(form: &ProductForm) -> Result<Self, Self::Error> {
        Ok(ProductDraft {
            code: form.code().map(str::to_string),
            name: form.name().map(str::to_string),
            category: form.category().map(str::to_string),
            price: form.price()?,
            stock: form.stock()?,
            active: Some(form.active()),
        })
    }
}

impl TryFrom<ProductForm> for ProductDraft {
    type Error = ValidationError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        ProductDraft::try_from(&form)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
