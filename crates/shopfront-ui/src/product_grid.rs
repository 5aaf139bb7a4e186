//! # Product Grid and Quick Search
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search name or SKU...      ]  [ All categories ▾ ]  [ Name A→Z ▾ ]   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ Basmati Rice │ │ Toor Dal 1kg │ │ Mustard Oil  │ │ Brown Rice   │   │
//! │  │ ₹549.00      │ │ ₹165.00      │ │ ₹189.00      │ │ ₹129.00      │   │
//! │  │ 12 in stock  │ │ Out of stock │ │ 7 in stock   │ │ 3 in stock   │   │
//! │  │ [Add to cart]│ │   (disabled) │ │ [Add to cart]│ │ [Add to cart]│   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │                      ◄ Prev   Page 1 of 3   Next ►                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Changing the search, category, or sort always goes back to page 1.

use serde::{Deserialize, Serialize};
use shopfront_core::catalog::{self, Page, ProductQuery, SortKey};
use shopfront_core::{CartLine, Money, Product};
use tracing::debug;

use crate::error::{UiError, UiResult};
use crate::events::CartEvents;

pub const NO_PRODUCTS_MESSAGE: &str = "No products found";

// =============================================================================
// Product Grid
// =============================================================================

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub stock: u32,
    pub category: String,
    /// Units of this product already in the cart.
    pub in_cart: u32,
    /// False when out of stock or the cart already holds every unit.
    pub can_add: bool,
}

/// Rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGridView {
    pub query: ProductQuery,
    pub categories: Vec<String>,
    pub page: Page<ProductCard>,
    /// Set when nothing matches.
    pub empty_message: Option<String>,
}

/// Product grid state: filters and current page.
#[derive(Debug, Clone)]
pub struct ProductGrid {
    query: ProductQuery,
    page: usize,
    page_size: usize,
}

impl ProductGrid {
    pub fn new(page_size: usize) -> Self {
        ProductGrid {
            query: ProductQuery::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &ProductQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, search: &str) {
        debug!(search, "product grid search changed");
        self.query.search = search.to_string();
        self.page = 1;
    }

    /// `None` or a blank label shows every category.
    pub fn set_category(&mut self, category: Option<&str>) {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        debug!(?category, "product grid category changed");
        self.query.category = category;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        debug!(?sort, "product grid sort changed");
        self.query.sort = sort;
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Renders `products`, marking what is already in `cart`.
    ///
    /// The stored page is clamped into range, so paging past the end after
    /// a filter change lands on the last page.
    pub fn render(&mut self, products: &[Product], cart: &[CartLine]) -> ProductGridView {
        let matched = catalog::filter_products(products, &self.query);
        let page = catalog::paginate(matched, self.page, self.page_size);
        self.page = page.page;

        let page = page.map(|product| {
            let in_cart = cart
                .iter()
                .find(|line| line.product_id == product.id)
                .map_or(0, |line| line.quantity);
            ProductCard {
                id: product.id.clone(),
                name: product.name.clone(),
                sku: product.sku.clone(),
                price: product.price(),
                stock: product.stock,
                category: product.category.clone(),
                in_cart,
                can_add: in_cart < product.stock,
            }
        });

        let empty_message = page.is_empty().then(|| NO_PRODUCTS_MESSAGE.to_string());

        ProductGridView {
            query: self.query.clone(),
            categories: catalog::categories(products),
            page,
            empty_message,
        }
    }

    /// "Add to cart" on a card.
    pub fn add_to_cart(
        &self,
        product_id: &str,
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<()> {
        let product = find_product(products, product_id)?;
        request_add(product, events)
    }
}

fn find_product<'a>(products: &'a [Product], product_id: &str) -> UiResult<&'a Product> {
    products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| UiError::not_found("Product", product_id))
}

fn request_add(product: &Product, events: &impl CartEvents) -> UiResult<()> {
    if !product.in_stock() {
        return Err(shopfront_core::CoreError::OutOfStock {
            sku: product.sku.clone(),
        }
        .into());
    }
    debug!(product_id = %product.id, sku = %product.sku, "add to cart requested");
    events.add_to_cart(product);
    Ok(())
}

// =============================================================================
// Quick Search
// =============================================================================

/// One row in the quick-search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub stock: u32,
    pub exact_sku: bool,
}

/// Type-ahead product search used at the register.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    query: String,
    limit: usize,
}

impl ProductSearch {
    pub fn new(limit: usize) -> Self {
        ProductSearch {
            query: String::new(),
            limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Dropdown is shown while there is something typed.
    pub fn is_open(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn results(&self, products: &[Product]) -> Vec<SearchHit> {
        let query = self.query.trim();
        catalog::quick_search(products, query, self.limit)
            .into_iter()
            .map(|p| SearchHit {
                id: p.id.clone(),
                name: p.name.clone(),
                sku: p.sku.clone(),
                price: p.price(),
                stock: p.stock,
                exact_sku: p.sku.eq_ignore_ascii_case(query),
            })
            .collect()
    }

    /// Picks a result: adds it to the cart and clears the query.
    pub fn select(
        &mut self,
        product_id: &str,
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<()> {
        let product = find_product(products, product_id)?;
        request_add(product, events)?;
        self.clear();
        Ok(())
    }

    /// Enter key: adds the exact SKU match (scanner input) if there is one.
    ///
    /// ## Returns
    /// `true` when a product was added.
    pub fn submit(&mut self, products: &[Product], events: &impl CartEvents) -> UiResult<bool> {
        let query = self.query.trim();
        let Some(product) = products.iter().find(|p| p.sku.eq_ignore_ascii_case(query)) else {
            return Ok(false);
        };
        request_add(product, events)?;
        self.clear();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{product, Event, Recorder};

    fn shelf() -> Vec<Product> {
        vec![
            product("1", "Basmati Rice 5kg", "RICE-5KG", 54900, 12, "Grains"),
            product("2", "Toor Dal 1kg", "DAL-TOOR-1", 16500, 0, "Pulses"),
            product("3", "Mustard Oil 1L", "OIL-MUST-1", 18900, 7, "Oils"),
            product("4", "Brown Rice 1kg", "RICE-BRN-1", 12900, 3, "Grains"),
        ]
    }

    #[test]
    fn test_no_match_shows_empty_state() {
        let mut grid = ProductGrid::new(12);
        grid.set_search("saffron");
        let view = grid.render(&shelf(), &[]);
        assert!(view.page.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some(NO_PRODUCTS_MESSAGE));
        assert_eq!(view.categories, vec!["Grains", "Oils", "Pulses"]);
    }

    #[test]
    fn test_filters_reset_page() {
        let mut grid = ProductGrid::new(2);
        grid.next_page();
        assert_eq!(grid.render(&shelf(), &[]).page.page, 2);

        grid.set_category(Some("Grains"));
        assert_eq!(grid.page(), 1);
        let view = grid.render(&shelf(), &[]);
        assert_eq!(view.page.total_items, 2);

        grid.set_category(Some("  "));
        assert_eq!(grid.query().category, None);
    }

    #[test]
    fn test_page_clamped_after_filter() {
        let mut grid = ProductGrid::new(1);
        grid.go_to_page(4);
        grid.render(&shelf(), &[]);
        grid.query.search = "oil".to_string();
        let view = grid.render(&shelf(), &[]);
        assert_eq!(view.page.page, 1);
        assert_eq!(grid.page(), 1);
    }

    #[test]
    fn test_card_reflects_cart() {
        let products = shelf();
        let cart = vec![CartLine::from_product(&products[3], 3)];
        let mut grid = ProductGrid::new(12);
        grid.set_sort(SortKey::PriceAsc);
        let view = grid.render(&products, &cart);

        let brown = &view.page.items[0];
        assert_eq!(brown.id, "4");
        assert_eq!(brown.in_cart, 3);
        assert!(!brown.can_add);

        let dal = view.page.items.iter().find(|c| c.id == "2").unwrap();
        assert!(!dal.can_add);
    }

    #[test]
    fn test_add_to_cart_emits_event() {
        let products = shelf();
        let events = Recorder::default();
        let grid = ProductGrid::new(12);

        grid.add_to_cart("1", &products, &events).unwrap();
        assert_eq!(events.take(), vec![Event::AddToCart("1".to_string())]);

        let err = grid.add_to_cart("2", &products, &events).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        let err = grid.add_to_cart("nope", &products, &events).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(events.take().is_empty());
    }

    #[test]
    fn test_quick_search_select_clears_query() {
        let products = shelf();
        let events = Recorder::default();
        let mut search = ProductSearch::new(8);

        search.set_query("rice");
        assert!(search.is_open());
        let hits = search.results(&products);
        assert_eq!(hits.len(), 2);

        search.select(&hits[1].id, &products, &events).unwrap();
        assert_eq!(search.query(), "");
        assert!(!search.is_open());
        assert_eq!(events.take(), vec![Event::AddToCart("4".to_string())]);
    }

    #[test]
    fn test_quick_search_exact_sku_submit() {
        let products = shelf();
        let events = Recorder::default();
        let mut search = ProductSearch::new(8);

        search.set_query("oil-must-1");
        assert!(search.results(&products)[0].exact_sku);
        assert!(search.submit(&products, &events).unwrap());
        assert_eq!(events.take(), vec![Event::AddToCart("3".to_string())]);

        search.set_query("oil");
        assert!(!search.submit(&products, &events).unwrap());
        assert_eq!(search.query(), "oil");
    }
}
