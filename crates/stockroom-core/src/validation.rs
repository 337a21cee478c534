//! # Validation Module
//!
//! Business rule validation for product input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input                                                        │
//! │  ├── ProductDraft (typed)      → validate_product                      │
//! │  └── ProductForm (raw strings) → validate_form (coerces in order)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Domain rules, first failure wins                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(code)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Order
//! When several fields are wrong, the caller sees the message for the
//! earliest rule in this list:
//!
//! 1. product present
//! 2. code at least [`MIN_CODE_LEN`] characters
//! 3. code at most [`MAX_CODE_LEN`] characters
//! 4. name at least [`MIN_NAME_LEN`] characters
//! 5. name at most [`MAX_NAME_LEN`] characters
//! 6. category is one of [`Category::ALL`]
//! 7. price present
//! 8. price greater than zero
//! 9. stock present
//! 10. stock not negative
//!
//! Lengths count characters of the trimmed value; a missing string counts
//! as empty. For raw forms, a price or stock that does not parse is
//! reported in place of rule 7 or rule 9.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product, ProductDraft, ProductForm};
use crate::{MAX_CODE_LEN, MAX_NAME_LEN, MIN_CODE_LEN, MIN_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product draft and builds the transient product it describes.
///
/// ## Returns
/// * `Ok(Product)` - trimmed `code`/`name`, parsed category, `id: None`.
///   `active` defaults to `true` when the draft leaves it unset.
/// * `Err(ValidationError)` - the first rule (see module docs) that failed
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product;
/// use stockroom_core::{Money, ProductDraft};
///
/// let draft = ProductDraft {
///     code: Some("AB".to_string()),
///     name: Some("X".to_string()),
///     category: Some("Accessories".to_string()),
///     price: Some(Money::from_cents(100)),
///     stock: Some(1),
///     active: None,
/// };
///
/// // Both code and name are too short; code is checked first.
/// let err = validate_product(Some(&draft)).unwrap_err();
/// assert_eq!(err.to_string(), "code must be at least 3 characters");
/// ```
pub fn validate_product(draft: Option<&ProductDraft>) -> ValidationResult<Product> {
    let draft = draft.ok_or_else(|| ValidationError::Required {
        field: "product".to_string(),
    })?;

    validate_in_order(
        FieldSource {
            code: draft.code.as_deref(),
            name: draft.name.as_deref(),
            category: draft.category.as_deref(),
            price: || Ok::<_, ValidationError>(draft.price),
            stock: || Ok::<_, ValidationError>(draft.stock),
        },
        draft.active.unwrap_or(true),
    )
}

/// Coerces and validates raw form fields in a single ordered pass.
///
/// A price or stock that does not parse fails as `InvalidFormat`, but only
/// when that field's turn comes: `{code: "AB", price: "abc"}` reports the
/// short code. A missing `active` means unchecked, so the product is
/// inactive.
///
/// ```rust
/// use stockroom_core::validation::validate_form;
/// use stockroom_core::ProductForm;
///
/// let form = ProductForm {
///     code: Some("AB".to_string()),
///     price: Some("abc".to_string()),
///     ..Default::default()
/// };
/// let err = validate_form(Some(&form)).unwrap_err();
/// assert_eq!(err.field(), "code");
/// ```
pub fn validate_form(form: Option<&ProductForm>) -> ValidationResult<Product> {
    let form = form.ok_or_else(|| ValidationError::Required {
        field: "product".to_string(),
    })?;

    validate_in_order(
        FieldSource {
            code: form.code(),
            name: form.name(),
            category: form.category(),
            price: || form.price(),
            stock: || form.stock(),
        },
        form.active(),
    )
}

/// Field values for one validation pass. Numbers are produced lazily so a
/// coercion failure surfaces at its field's place in the order.
struct FieldSource<'a, P, S>
where
    P: FnOnce() -> ValidationResult<Option<Money>>,
    S: FnOnce() -> ValidationResult<Option<i64>>,
{
    code: Option<&'a str>,
    name: Option<&'a str>,
    category: Option<&'a str>,
    price: P,
    stock: S,
}

fn validate_in_order<P, S>(fields: FieldSource<'_, P, S>, active: bool) -> ValidationResult<Product>
where
    P: FnOnce() -> ValidationResult<Option<Money>>,
    S: FnOnce() -> ValidationResult<Option<i64>>,
{
    let code = validate_code(fields.code.unwrap_or(""))?;
    let name = validate_name(fields.name.unwrap_or(""))?;
    let category = validate_category(fields.category.unwrap_or(""))?;
    let price = validate_price((fields.price)()?)?;
    let stock = validate_stock((fields.stock)()?)?;

    Ok(Product {
        id: None,
        code,
        name,
        category: Some(category),
        price,
        stock,
        active,
    })
}

// =============================================================================
// Field Validators
// =============================================================================

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<String> {
    let value = value.trim();
    let len = value.chars().count();

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a product code and returns it trimmed.
///
/// ```rust
/// use stockroom_core::validation::validate_code;
///
/// assert_eq!(validate_code("  ABC123 ").unwrap(), "ABC123");
/// assert!(validate_code(" AB ").is_err());
/// assert!(validate_code(&"A".repeat(51)).is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<String> {
    validate_length("code", code, MIN_CODE_LEN, MAX_CODE_LEN)
}

/// Validates a product name and returns it trimmed.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    validate_length("name", name, MIN_NAME_LEN, MAX_NAME_LEN)
}

/// Parses a category name.
pub fn validate_category(category: &str) -> ValidationResult<Category> {
    category
        .parse::<Category>()
        .map_err(|_| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: Category::names(),
        })
}

/// Validates a price: required and strictly positive.
///
/// Zero is a legal stored value (the column default) but never a valid
/// price for a new product.
pub fn validate_price(price: Option<Money>) -> ValidationResult<Money> {
    let price = price.ok_or_else(|| ValidationError::Required {
        field: "price".to_string(),
    })?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Validates a stock level: required and not negative.
pub fn validate_stock(stock: Option<i64>) -> ValidationResult<i64> {
    let stock = stock.ok_or_else(|| ValidationError::Required {
        field: "stock".to_string(),
    })?;

    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(stock)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            code: Some("ABC123".to_string()),
            name: Some("Wireless Mouse".to_string()),
            category: Some("Accessories".to_string()),
            price: Some(Money::from_cents(1999)),
            stock: Some(50),
            active: Some(true),
        }
    }

    fn failing_field(draft: &ProductDraft) -> String {
        validate_product(Some(draft))
            .unwrap_err()
            .field()
            .to_string()
    }

    #[test]
    fn test_valid_draft_builds_transient_product() {
        let mut draft = valid_draft();
        draft.code = Some("  ABC123  ".to_string());
        draft.name = Some(" Wireless Mouse ".to_string());

        let product = validate_product(Some(&draft)).unwrap();
        assert!(product.is_transient());
        assert_eq!(product.code, "ABC123");
        assert_eq!(product.name, "Wireless Mouse");
        assert_eq!(product.category, Some(Category::Accessories));
        assert_eq!(product.price, Money::from_cents(1999));
        assert_eq!(product.stock, 50);
        assert!(product.active);
    }

    #[test]
    fn test_missing_product() {
        assert_eq!(
            validate_product(None),
            Err(ValidationError::Required {
                field: "product".to_string()
            })
        );
    }

    #[test]
    fn test_short_code_reported_before_everything_else() {
        let draft = ProductDraft {
            code: Some("AB".to_string()),
            name: Some("X".to_string()),
            category: Some("Spaceships".to_string()),
            price: None,
            stock: Some(-1),
            active: None,
        };
        let err = validate_product(Some(&draft)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooShort {
                field: "code".to_string(),
                min: MIN_CODE_LEN
            }
        );
    }

    #[test]
    fn test_code_length_counts_trimmed_characters() {
        for code in ["", "   ", " AB ", "\tA\n"] {
            let mut draft = valid_draft();
            draft.code = Some(code.to_string());
            assert_eq!(failing_field(&draft), "code", "code {:?}", code);
        }

        let mut draft = valid_draft();
        draft.code = None;
        assert_eq!(failing_field(&draft), "code");

        // Three multi-byte characters are still three characters
        draft.code = Some("ÁÉÍ".to_string());
        assert!(validate_product(Some(&draft)).is_ok());
    }

    #[test]
    fn test_code_too_long() {
        let mut draft = valid_draft();
        draft.code = Some("C".repeat(MAX_CODE_LEN));
        assert!(validate_product(Some(&draft)).is_ok());

        draft.code = Some("C".repeat(MAX_CODE_LEN + 1));
        assert!(matches!(
            validate_product(Some(&draft)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_name_checked_after_code() {
        let mut draft = valid_draft();
        draft.name = Some("Lamp".to_string());
        draft.category = Some("Spaceships".to_string());
        assert_eq!(
            validate_product(Some(&draft)).unwrap_err().to_string(),
            "name must be at least 5 characters"
        );

        draft.name = Some("N".repeat(MAX_NAME_LEN + 1));
        assert_eq!(failing_field(&draft), "name");
    }

    #[test]
    fn test_category_checked_after_name_before_price() {
        let draft = ProductDraft {
            code: Some("VALIDCODE".to_string()),
            name: Some("Valid Name".to_string()),
            category: Some("Spaceships".to_string()),
            price: None,
            stock: None,
            active: None,
        };
        let err = validate_product(Some(&draft)).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert!(err.to_string().contains("invalid category"));

        let mut draft = valid_draft();
        draft.category = None;
        assert_eq!(failing_field(&draft), "category");
    }

    #[test]
    fn test_price_rules() {
        let mut draft = valid_draft();
        draft.price = None;
        draft.stock = Some(-5);
        assert_eq!(
            validate_product(Some(&draft)),
            Err(ValidationError::Required {
                field: "price".to_string()
            })
        );

        draft.price = Some(Money::zero());
        assert_eq!(
            validate_product(Some(&draft)),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );

        draft.price = Some(Money::from_cents(-100));
        assert_eq!(failing_field(&draft), "price");

        draft.price = Some(Money::from_cents(1));
        assert_eq!(failing_field(&draft), "stock");
    }

    #[test]
    fn test_stock_rules() {
        let mut draft = valid_draft();
        draft.stock = None;
        assert_eq!(
            validate_product(Some(&draft)),
            Err(ValidationError::Required {
                field: "stock".to_string()
            })
        );

        draft.stock = Some(-1);
        assert_eq!(
            validate_product(Some(&draft)),
            Err(ValidationError::Negative {
                field: "stock".to_string()
            })
        );

        draft.stock = Some(0);
        assert!(validate_product(Some(&draft)).is_ok());
    }

    #[test]
    fn test_active_defaults_to_true() {
        let mut draft = valid_draft();
        draft.active = None;
        assert!(validate_product(Some(&draft)).unwrap().active);

        draft.active = Some(false);
        assert!(!validate_product(Some(&draft)).unwrap().active);
    }

    fn form(code: &str, name: &str, category: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            price: Some(price.to_string()),
            stock: Some(stock.to_string()),
            active: Some("on".to_string()),
        }
    }

    #[test]
    fn test_form_short_code_beats_bad_price() {
        let err = validate_form(Some(&form("AB", "X", "Accessories", "abc", "1"))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooShort {
                field: "code".to_string(),
                min: MIN_CODE_LEN
            }
        );
    }

    #[test]
    fn test_form_bad_category_beats_bad_stock() {
        let err = validate_form(Some(&form("VALIDCODE", "Valid Name", "Spaceships", "1", "x")))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }), "{err}");
    }

    #[test]
    fn test_form_price_rules_before_stock_format() {
        let err = validate_form(Some(&form("ABC123", "Wireless Mouse", "Accessories", "0", "x")))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBePositive {
                field: "price".to_string()
            }
        );

        let err = validate_form(Some(&form("ABC123", "Wireless Mouse", "Accessories", "abc", "x")))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "price"));

        let err = validate_form(Some(&form("ABC123", "Wireless Mouse", "Accessories", "1", "x")))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "stock"));
    }

    #[test]
    fn test_form_blank_price_is_required() {
        let err = validate_form(Some(&form("ABC123", "Wireless Mouse", "Accessories", "  ", "1")))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "price".to_string()
            }
        );
    }

    #[test]
    fn test_form_valid_and_unchecked_active() {
        let mut raw = form(" ABC123 ", "Wireless Mouse", "accesorios", "19.99", "50");
        let product = validate_form(Some(&raw)).unwrap();
        assert_eq!(product.code, "ABC123");
        assert_eq!(product.category, Some(Category::Accessories));
        assert_eq!(product.price, Money::from_cents(1999));
        assert_eq!(product.stock, 50);
        assert!(product.active);

        raw.active = None;
        assert!(!validate_form(Some(&raw)).unwrap().active);

        assert_eq!(validate_form(None).unwrap_err().field(), "product");
    }
}
