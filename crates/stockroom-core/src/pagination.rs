//! # Pagination
//!
//! Page arithmetic for product listings.
//!
//! Pages are 1-based and the page size is a configuration value, never
//! user input:
//! ```text
//! limit = 10, total = 25
//!
//!   page 1 → offset  0 → rows  1..10
//!   page 2 → offset 10 → rows 11..20
//!   page 3 → offset 20 → rows 21..25
//!   page 9 → clamped to page 3
//! ```

/// Smallest usable limit. Anything lower is raised to this.
pub const MIN_LIMIT: i64 = 1;

/// Smallest usable offset. Anything lower is raised to this.
pub const MIN_OFFSET: i64 = 0;

/// Raises `limit` and `offset` to their minimums.
///
/// ```rust
/// use stockroom_core::pagination::clamp_window;
///
/// assert_eq!(clamp_window(0, -3), (1, 0));
/// assert_eq!(clamp_window(10, 20), (10, 20));
/// ```
#[inline]
pub fn clamp_window(limit: i64, offset: i64) -> (i64, i64) {
    (limit.max(MIN_LIMIT), offset.max(MIN_OFFSET))
}

/// Row offset of a 1-based page. Pages below 1 are treated as page 1.
#[inline]
pub fn offset_for(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(MIN_LIMIT))
}

/// Number of pages needed for `total` rows. Always at least 1, so an
/// empty catalog still has a (blank) first page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    let limit = limit.max(MIN_LIMIT);
    let total = total.max(0);
    ((total + limit - 1) / limit).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(page: i64, total: i64, limit: i64) -> i64 {
    page.clamp(1, total_pages(total, limit))
}

// =============================================================================
// Unit Tests
// =============================================================================
