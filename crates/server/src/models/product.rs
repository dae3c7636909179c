//! Product domain types and search filter composition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use shopkart_core::{Price, ProductId};

/// Categories offered in the admin product form.
///
/// Categories are stored as plain strings, so this list is advisory:
/// it drives the form select and nothing rejects other values.
pub const CATEGORIES: &[&str] = &["Android", "iPhone", "Tablet", "Accessories"];

/// Category pre-selected on the empty add-product form.
pub const DEFAULT_CATEGORY: &str = "Android";

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// A catalog product (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique, immutable string key. Also names the product's image file.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category string (see [`CATEGORIES`]).
    pub category: String,
    /// Non-negative price.
    pub price: Price,
    /// Free-form description.
    pub description: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or fully overwriting a product row.
///
/// Timestamps are owned by the database, so they are absent here.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub description: String,
}

/// Normalized product search filter.
///
/// Built from raw query parameters via [`SearchFilter::from_query`];
/// fields that are absent, blank, the "All" sentinel, or non-positive
/// bounds normalize to `None`. All predicates compose conjunctively;
/// a filter with no predicates is equivalent to a full listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring match on the product name.
    pub term: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl SearchFilter {
    /// Build a filter from raw, user-submitted query values.
    ///
    /// Blank strings and unparsable or non-positive price bounds are
    /// treated as absent, matching how the catalog form submits empty
    /// fields.
    #[must_use]
    pub fn from_query(
        term: Option<&str>,
        category: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Self {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned);

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(ToOwned::to_owned);

        Self {
            term,
            category,
            min_price: parse_positive_bound(min_price),
            max_price: parse_positive_bound(max_price),
        }
    }

    /// Returns true when no predicate survived normalization.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.term.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Returns true when both price bounds are present and inverted.
    ///
    /// An inverted range matches nothing; callers return an empty
    /// result without querying rather than treating it as an error.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(
            (self.min_price, self.max_price),
            (Some(min), Some(max)) if min > max
        )
    }
}

/// Parse a price bound, keeping only positive values.
fn parse_positive_bound(raw: Option<&str>) -> Option<Decimal> {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Decimal::from_str(trimmed) {
        Ok(value) if value > Decimal::ZERO => Some(value),
        Ok(_) => None,
        Err(_) => {
            tracing::debug!(value = trimmed, "ignoring unparsable price bound");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_yields_empty_filter() {
        let filter = SearchFilter::from_query(None, None, None, None);
        assert!(filter.is_empty());
        assert!(!filter.is_unsatisfiable());
    }

    #[test]
    fn test_blank_values_are_absent() {
        let filter = SearchFilter::from_query(Some("   "), Some(""), Some(""), Some("  "));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_all_sentinel_clears_category() {
        let filter = SearchFilter::from_query(None, Some("All"), None, None);
        assert!(filter.category.is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_category_is_kept() {
        let filter = SearchFilter::from_query(None, Some("Android"), None, None);
        assert_eq!(filter.category.as_deref(), Some("Android"));
    }

    #[test]
    fn test_term_is_trimmed() {
        let filter = SearchFilter::from_query(Some("  pixel "), None, None, None);
        assert_eq!(filter.term.as_deref(), Some("pixel"));
    }

    #[test]
    fn test_non_positive_bounds_are_dropped() {
        let filter = SearchFilter::from_query(None, None, Some("0"), Some("-5"));
        assert!(filter.min_price.is_none());
        assert!(filter.max_price.is_none());
    }

    #[test]
    fn test_unparsable_bound_is_dropped() {
        let filter = SearchFilter::from_query(None, None, Some("cheap"), None);
        assert!(filter.min_price.is_none());
    }

    #[test]
    fn test_inverted_range_is_unsatisfiable() {
        let filter = SearchFilter::from_query(None, None, Some("10"), Some("5"));
        assert!(filter.is_unsatisfiable());
    }

    #[test]
    fn test_ordered_range_is_satisfiable() {
        let filter = SearchFilter::from_query(None, None, Some("5"), Some("10"));
        assert!(!filter.is_unsatisfiable());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_single_bound_is_never_unsatisfiable() {
        let filter = SearchFilter::from_query(None, None, Some("10"), None);
        assert!(!filter.is_unsatisfiable());
    }
}
