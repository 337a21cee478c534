//! # Product Catalog
//!
//! The business-rule facade. Request handlers call this, never the
//! repository directly.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ProductCatalog::create                               │
//! │                                                                         │
//! │  ProductDraft (untrusted)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_product ──── first failed rule ───► Validation               │
//! │       │                (no connection taken)                           │
//! │       ▼                                                                 │
//! │  db.products() ─── one pooled connection for the rest of the call      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find_by_code(code) ── Some ────────────────► DuplicateCode            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert(product) ───── UNIQUE(code) failed ─► DuplicateCode            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Product { id: Some(n), .. })                                       │
//! │                                                                         │
//! │  Two concurrent creates for one code can both pass find_by_code.       │
//! │  The table's UNIQUE constraint then rejects the second insert, and     │
//! │  that rejection is reported exactly like the pre-check's.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use stockroom_core::pagination::{clamp_page, clamp_window, offset_for, total_pages};
use stockroom_core::validation::{validate_form, validate_product, ValidationResult};
use stockroom_core::{Product, ProductDraft, ProductForm};
use stockroom_db::{Database, ProductRepository};

/// Column whose unique constraint guards product codes.
const CODE_COLUMN: &str = "products.code";

/// One page of the product listing, ready for a view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page, ordered by name
    pub products: Vec<Product>,

    /// 1-based page number actually served (after clamping)
    pub page: i64,

    /// Number of pages, at least 1
    pub total_pages: i64,

    /// Number of stored products
    pub total: i64,

    /// Page size used
    pub limit: i64,
}

impl ProductPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Entry point for every product operation.
///
/// Cheap to clone; clones share the database pool.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = ProductCatalog::new(db, DEFAULT_PAGE_SIZE);
///
/// let product = catalog.create(&draft).await?;
/// let first = catalog.page(1).await?;
/// catalog.delete(product.id.unwrap_or_default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    db: Database,
    page_size: i64,
}

impl ProductCatalog {
    /// Creates a catalog over an open database.
    ///
    /// `page_size` is raised to 1 if lower.
    pub fn new(db: Database, page_size: i64) -> Self {
        let (page_size, _) = clamp_window(page_size, 0);
        ProductCatalog { db, page_size }
    }

    /// Opens the database described by `config` and wraps it.
    pub async fn open(config: &CatalogConfig) -> CatalogResult<Self> {
        let db = Database::new(config.db_config()).await?;
        Ok(ProductCatalog::new(db, config.page_size))
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Products per page used by [`ProductCatalog::page`].
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Checks a draft against the product rules without touching storage.
    ///
    /// `None` stands for "no product submitted" and fails first.
    pub fn validate(&self, draft: Option<&ProductDraft>) -> ValidationResult<Product> {
        validate_product(draft)
    }

    /// Lists products ordered by name.
    ///
    /// `limit` is raised to 1 and `offset` to 0 if lower.
    pub async fn list(&self, limit: i64, offset: i64) -> CatalogResult<Vec<Product>> {
        let (limit, offset) = clamp_window(limit, offset);
        let products = self.db.products().await?.list(limit, offset).await?;
        Ok(products)
    }

    /// Number of stored products.
    pub async fn count(&self) -> CatalogResult<i64> {
        Ok(self.db.products().await?.count().await?)
    }

    /// Looks a product up by code.
    ///
    /// The code is trimmed first. A blank code finds nothing and never
    /// reaches storage.
    pub async fn find_by_code(&self, code: &str) -> CatalogResult<Option<Product>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        Ok(self.db.products().await?.find_by_code(code).await?)
    }

    /// Validates and stores a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored product with its assigned id
    /// * `Err(CatalogError::Validation)` - first failed rule; storage untouched
    /// * `Err(CatalogError::DuplicateCode)` - code already stored
    /// * `Err(CatalogError::Storage)` - the store failed
    pub async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        let product = validate_product(Some(draft))?;
        self.store(product).await
    }

    /// Coerces raw form fields and creates the product they describe.
    ///
    /// Coercion runs inside the ordered validation pass: a price of `"abc"`
    /// is only reported once code, name and category have passed. An
    /// unchecked (missing) `active` box stores the product inactive.
    pub async fn create_from_form(&self, form: &ProductForm) -> CatalogResult<Product> {
        let product = validate_form(Some(form))?;
        self.store(product).await
    }

    /// Stores an already validated product, keeping codes unique.
    async fn store(&self, product: Product) -> CatalogResult<Product> {
        let mut repo = self.db.products().await?;
        if repo.find_by_code(&product.code).await?.is_some() {
            warn!(code = %product.code, "Rejected create: code already exists");
            return Err(CatalogError::duplicate_code(product.code));
        }

        insert_unique(&mut repo, &product).await
    }

    /// Deletes a product by id.
    ///
    /// Deleting an id that is not stored succeeds and changes nothing.
    ///
    /// ## Returns
    /// * `Err(CatalogError::InvalidId)` - `id` is zero or negative
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        if id <= 0 {
            return Err(CatalogError::InvalidId { id });
        }

        self.db.products().await?.delete_by_id(id).await?;
        info!(id, "Product deleted");
        Ok(())
    }

    /// Serves a 1-based page of the listing.
    ///
    /// Out-of-range pages are clamped into `[1, total_pages]`, so asking for
    /// page 0 or page 999 still returns a real page.
    pub async fn page(&self, page: i64) -> CatalogResult<ProductPage> {
        let limit = self.page_size;
        let mut repo = self.db.products().await?;

        let total = repo.count().await?;
        let page = clamp_page(page, total, limit);
        let products = repo.list(limit, offset_for(page, limit)).await?;

        debug!(page, total, count = products.len(), "Serving product page");

        Ok(ProductPage {
            products,
            page,
            total_pages: total_pages(total, limit),
            total,
            limit,
        })
    }
}

/// Inserts `product`, reporting a unique-code rejection from the table as
/// [`CatalogError::DuplicateCode`].
async fn insert_unique(repo: &mut ProductRepository, product: &Product) -> CatalogResult<Product> {
    match repo.insert(product).await {
        Ok(stored) => {
            info!(id = ?stored.id, code = %stored.code, "Product created");
            Ok(stored)
        }
        Err(e) if e.is_unique_violation_on(CODE_COLUMN) => {
            warn!(code = %product.code, "Rejected create: code taken by a concurrent insert");
            Err(CatalogError::duplicate_code(product.code.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;
    use stockroom_core::{Category, Money, ValidationError};
    use stockroom_db::DbConfig;

    async fn test_catalog() -> ProductCatalog {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ProductCatalog::new(db, 10)
    }

    fn draft(code: &str, name: &str, category: &str, cents: i64, stock: i64) -> ProductDraft {
        ProductDraft {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            price: Some(Money::from_cents(cents)),
            stock: Some(stock),
            active: Some(true),
        }
    }

    fn wireless_mouse() -> ProductDraft {
        draft("ABC123", "Wireless Mouse", "Accessories", 1999, 50)
    }

    #[tokio::test]
    async fn test_create_assigns_positive_id() {
        let catalog = test_catalog().await;

        let product = catalog.create(&wireless_mouse()).await.unwrap();

        assert!(product.id.unwrap() > 0);
        assert_eq!(product.code, "ABC123");
        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_code_is_conflict() {
        let catalog = test_catalog().await;
        catalog.create(&wireless_mouse()).await.unwrap();

        let again = draft("ABC123", "Wired Mouse Pro", "Accessories", 999, 5);
        let err = catalog.create(&again).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(err, CatalogError::DuplicateCode { ref code } if code == "ABC123"));
        assert_eq!(catalog.count().await.unwrap(), 1);
        let stored = catalog.find_by_code("ABC123").await.unwrap().unwrap();
        assert_eq!(stored.name, "Wireless Mouse");
    }

    #[tokio::test]
    async fn test_duplicate_check_uses_trimmed_code() {
        let catalog = test_catalog().await;
        catalog.create(&wireless_mouse()).await.unwrap();

        let padded = draft("  ABC123  ", "Wireless Mouse", "Accessories", 1999, 50);
        let err = catalog.create(&padded).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_short_code_reported_before_short_name() {
        let catalog = test_catalog().await;

        let err = catalog
            .create(&draft("AB", "X", "Accessories", 100, 1))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::TooShort { ref field, min: 3 }) if field == "code"
        ));
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_category_reported_before_price_and_stock() {
        let catalog = test_catalog().await;

        let mut bad = draft("VALIDCODE", "Valid Name", "Spaceships", 0, -1);
        bad.price = None;
        let err = catalog.create(&bad).await.unwrap_err();

        match err {
            CatalogError::Validation(e) => {
                assert_eq!(e.field(), "category");
                assert!(e.to_string().contains("Accessories"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_missing_product() {
        let catalog = test_catalog().await;

        let err = catalog.validate(None).unwrap_err();
        assert_eq!(err.to_string(), "product is required");
        assert!(catalog.validate(Some(&wireless_mouse())).is_ok());
    }

    #[tokio::test]
    async fn test_round_trip_by_trimmed_code() {
        let catalog = test_catalog().await;
        let created = catalog
            .create(&draft(" RT-001 ", "  Standing Desk  ", "furniture", 24_950, 3))
            .await
            .unwrap();

        let found = catalog.find_by_code("  RT-001\t").await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.id, created.id);
        assert_eq!(found.code, "RT-001");
        assert_eq!(found.name, "Standing Desk");
        assert_eq!(found.category, Some(Category::Furniture));
        assert_eq!(found.price.to_string(), "249.50");
        assert_eq!(found.stock, 3);
        assert!(found.active);
    }

    #[tokio::test]
    async fn test_find_by_blank_code_is_none() {
        let catalog = test_catalog().await;
        catalog.create(&wireless_mouse()).await.unwrap();

        assert!(catalog.find_by_code("").await.unwrap().is_none());
        assert!(catalog.find_by_code("   ").await.unwrap().is_none());
        assert!(catalog.find_by_code("ZZZ999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_rejects_non_positive_ids() {
        let catalog = test_catalog().await;

        for id in [0, -5] {
            let err = catalog.delete(id).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(matches!(err, CatalogError::InvalidId { id: got } if got == id));
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let catalog = test_catalog().await;
        catalog.create(&wireless_mouse()).await.unwrap();

        catalog.delete(4_242).await.unwrap();

        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let catalog = test_catalog().await;
        let created = catalog.create(&wireless_mouse()).await.unwrap();

        catalog.delete(created.id.unwrap()).await.unwrap();

        assert_eq!(catalog.count().await.unwrap(), 0);
        assert!(catalog.find_by_code("ABC123").await.unwrap().is_none());
    }

    async fn seed_25(catalog: &ProductCatalog) {
        // Insert in reverse name order so ordering comes from the query
        for i in (0..25).rev() {
            let d = draft(
                &format!("P{i:03}"),
                &format!("Product {i:02}"),
                "Electronics",
                100 + i,
                i,
            );
            catalog.create(&d).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_pagination_covers_all_rows_once() {
        let catalog = test_catalog().await;
        seed_25(&catalog).await;

        let mut all = Vec::new();
        for offset in [0, 10, 20] {
            all.extend(catalog.list(10, offset).await.unwrap());
        }

        assert_eq!(catalog.count().await.unwrap(), 25);
        assert_eq!(all.len(), 25);
        let codes: HashSet<_> = all.iter().map(|p| p.code.clone()).collect();
        assert_eq!(codes.len(), 25);
        assert!(all.windows(2).all(|w| w[0].name <= w[1].name));
        assert_eq!(all[0].name, "Product 00");
    }

    #[tokio::test]
    async fn test_list_clamps_arguments() {
        let catalog = test_catalog().await;
        seed_25(&catalog).await;

        let one = catalog.list(0, -10).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "Product 00");
    }

    #[tokio::test]
    async fn test_page_clamps_and_reports_totals() {
        let catalog = test_catalog().await;
        seed_25(&catalog).await;

        let first = catalog.page(0).await.unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 25);
        assert_eq!(first.limit, 10);
        assert_eq!(first.products.len(), 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = catalog.page(99).await.unwrap();
        assert_eq!(last.page, 3);
        assert_eq!(last.products.len(), 5);
        assert_eq!(last.products[0].name, "Product 20");
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn test_page_on_empty_catalog() {
        let catalog = test_catalog().await;

        let page = catalog.page(3).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn test_create_from_form() {
        let catalog = test_catalog().await;
        let form = ProductForm {
            code: Some(" FRM001 ".to_string()),
            name: Some("Cotton T-Shirt".to_string()),
            category: Some("Ropa".to_string()),
            price: Some("12.5".to_string()),
            stock: Some("7".to_string()),
            active: Some("on".to_string()),
        };

        let product = catalog.create_from_form(&form).await.unwrap();
        assert_eq!(product.category, Some(Category::Clothing));
        assert_eq!(product.price, Money::from_cents(1250));

        let bad = ProductForm {
            price: Some("twelve".to_string()),
            ..form
        };
        let err = catalog.create_from_form(&bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    fn raw_form(code: &str, name: &str, category: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            price: Some(price.to_string()),
            stock: Some(stock.to_string()),
            active: None,
        }
    }

    #[tokio::test]
    async fn test_form_errors_follow_rule_order() {
        let catalog = test_catalog().await;

        let err = catalog
            .create_from_form(&raw_form("AB", "X", "Accessories", "abc", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "code must be at least 3 characters");

        let err = catalog
            .create_from_form(&raw_form("VALIDCODE", "Valid Name", "Spaceships", "1", "x"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::Validation(ValidationError::NotAllowed { ref field, .. }) if field == "category"),
            "{err}"
        );

        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_form_without_active_creates_inactive_product() {
        let catalog = test_catalog().await;

        let product = catalog
            .create_from_form(&raw_form("OFF001", "Unlisted Lamp", "Furniture", "35", "2"))
            .await
            .unwrap();
        assert!(!product.active);

        let stored = catalog.find_by_code("OFF001").await.unwrap().unwrap();
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_storage_unique_violation_maps_to_duplicate() {
        let catalog = test_catalog().await;
        catalog.create(&wireless_mouse()).await.unwrap();

        // Skip the pre-check, as a losing concurrent writer would
        let product = catalog.validate(Some(&wireless_mouse())).unwrap();
        let mut repo = catalog.database().products().await.unwrap();
        let err = insert_unique(&mut repo, &product).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_creates() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("race.db")).max_connections(4);
        let catalog = ProductCatalog::new(Database::new(config).await.unwrap(), 10);
        assert_eq!(catalog.count().await.unwrap(), 0);

        for round in 0..5 {
            let code = format!("RACE{round:02}");
            let handles: Vec<_> = (0..2)
                .map(|n| {
                    let catalog = catalog.clone();
                    let d = draft(&code, &format!("Racer number {n}"), "Electronics", 500, 1);
                    tokio::spawn(async move { catalog.create(&d).await })
                })
                .collect();

            let mut created = 0;
            let mut conflicts = 0;
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(_) => created += 1,
                    Err(e) => {
                        assert_eq!(e.kind(), ErrorKind::Conflict, "{e}");
                        conflicts += 1;
                    }
                }
            }

            assert_eq!((created, conflicts), (1, 1), "round {round}");
        }

        assert_eq!(catalog.count().await.unwrap(), 5);
    }
}
