//! # Catalog Filtering
//!
//! In-memory search, sort, and pagination used by the product grid and by the
//! supplier, purchase-order, customer, and order-history lists.
//!
//! ```text
//! products ──► search term (name / SKU) ──► category ──► sort ──► page
//!                                                                  │
//!                                              empty? "no products found"
//! ```
//!
//! Every pass is a single linear scan over the snapshot the parent supplied.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

// =============================================================================
// Term Matching
// =============================================================================

/// Case-insensitive substring match of `term` against any of `fields`.
///
/// An empty (or blank) term matches everything.
pub fn matches_term<'a>(term: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort options offered by the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
}

impl SortKey {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            SortKey::NameAsc => Ordering::Equal,
            SortKey::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortKey::PriceAsc => a.price_cents.cmp(&b.price_cents),
            SortKey::PriceDesc => b.price_cents.cmp(&a.price_cents),
            SortKey::StockAsc => a.stock.cmp(&b.stock),
        };
        // Ties fall back to name then id so output is stable across renders.
        primary
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// What the product grid is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: String,
    pub category: Option<String>,
    pub sort: SortKey,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match &self.category {
            Some(category) => product.category.eq_ignore_ascii_case(category.trim()),
            None => true,
        };
        category_ok && matches_term(&self.search, [product.name.as_str(), product.sku.as_str()])
    }
}

/// Filters and sorts `products` for `query`.
pub fn filter_products<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    matched.sort_by(|a, b| query.sort.compare(a, b));
    matched
}

/// Sorted, de-duplicated category labels.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for product in products {
        let label = product.category.trim();
        if !label.is_empty() && !labels.iter().any(|l| l.eq_ignore_ascii_case(label)) {
            labels.push(label.to_string());
        }
    }
    labels.sort_by_key(|l| l.to_lowercase());
    labels
}

/// Quick-add search: at most `limit` hits, exact SKU match first.
///
/// A blank query returns nothing (the dropdown stays closed).
pub fn quick_search<'a>(products: &'a [Product], query: &str, limit: usize) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits: Vec<&Product> = products
        .iter()
        .filter(|p| matches_term(query, [p.name.as_str(), p.sku.as_str()]))
        .collect();
    hits.sort_by(|a, b| {
        let a_exact = a.sku.eq_ignore_ascii_case(query);
        let b_exact = b.sku.eq_ignore_ascii_case(query);
        b_exact
            .cmp(&a_exact)
            .then_with(|| SortKey::NameAsc.compare(a, b))
    });
    hits.truncate(limit);
    hits
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based; 1 for an empty list.
    pub page: usize,
    /// 0 for an empty list.
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Applies `f` to every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

/// Number of pages needed for `total_items`.
pub fn page_count(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

/// Cuts `items` into pages of `per_page` and returns `page` (1-based).
///
/// Out-of-range pages are clamped to the nearest valid page. A `per_page`
/// of 0 is treated as 1.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = page_count(total_items, per_page);
    let page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}
