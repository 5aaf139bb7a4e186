//! # Cart
//!
//! The cart the parent screen owns and the cart view renders.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Interaction            Method                  Effect                  │
//! │  ───────────            ──────                  ──────                  │
//! │  Click product card ──► add_product() ────────► push line / qty + 1     │
//! │  Click "+" / "−" ─────► set_quantity() ───────► qty within [1, stock]   │
//! │  Type a quantity ─────► set_quantity() ───────► same bounds             │
//! │  Click remove ────────► remove() ─────────────► line dropped            │
//! │  Stock changed ───────► reconcile() ──────────► stale lines re-clamped  │
//! │  Payment done ────────► clear()                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - One line per product id (adding again increases quantity)
//! - Quantity is at least 1 and never above the product's stock
//! - At most [`MAX_CART_ITEMS`] lines

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{compute_totals, Totals};
use crate::types::{OrderItem, Product, TaxRate};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Cart Line
// =============================================================================

/// A product in the cart.
///
/// Name, SKU and unit price are frozen when the line is created, so a price
/// change elsewhere does not reprice what the customer already picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: &str, sku: &str, name: &str, unit_price: Money, quantity: u32) -> Self {
        CartLine {
            product_id: product_id.to_string(),
            sku: sku.to_string(),
            name: name.to_string(),
            unit_price,
            quantity,
        }
    }

    /// Snapshot of `product` with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        CartLine::new(&product.id, &product.sku, &product.name, product.price(), quantity)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Converts the line into an order line.
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            name: self.name.clone(),
            quantity: self.quantity,
            unit_price_cents: self.unit_price.cents(),
        }
    }
}

// =============================================================================
// Quantity Rules
// =============================================================================

/// Which of the "−" / "+" buttons are enabled for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityControls {
    pub can_decrement: bool,
    pub can_increment: bool,
}

impl QuantityControls {
    pub fn for_line(quantity: u32, stock: u32) -> Self {
        QuantityControls {
            can_decrement: quantity > 1,
            can_increment: quantity < stock,
        }
    }
}

/// Brings `requested` into `[1, stock]`. Returns 0 only when stock is 0.
///
/// ```rust
/// use shopfront_core::cart::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0, 5), 1);
/// assert_eq!(clamp_quantity(9, 5), 5);
/// assert_eq!(clamp_quantity(3, 0), 0);
/// ```
#[inline]
pub fn clamp_quantity(requested: u32, stock: u32) -> u32 {
    requested.max(1).min(stock)
}

/// A line whose quantity was pulled back to match current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub product_id: String,
    pub from: u32,
    /// New quantity; 0 means the line was removed.
    pub to: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, or increases its line by one.
    ///
    /// ## Returns
    /// The line's new quantity.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<u32> {
        self.add_quantity(product, 1)
    }

    /// Adds `quantity` units of `product`.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> CoreResult<u32> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                sku: product.sku.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let requested = line.quantity.saturating_add(quantity);
            if requested > product.stock {
                return Err(CoreError::InsufficientStock {
                    sku: product.sku.clone(),
                    available: product.stock,
                    requested,
                });
            }
            line.quantity = requested;
            return Ok(requested);
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(quantity)
    }

    /// Sets the quantity of the line for `product`.
    ///
    /// ## Rules
    /// - 0 is rejected (removal is a separate action)
    /// - Above `product.stock` is rejected
    pub fn set_quantity(&mut self, product: &Product, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or_else(|| CoreError::LineNotFound(product.id.clone()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes the line for `product_id`.
    pub fn remove(&mut self, product_id: &str) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    /// Pulls every line back within the current stock of `products`.
    ///
    /// Lines whose product has no stock left, or is gone from the catalog,
    /// are removed.
    pub fn reconcile(&mut self, products: &[Product]) -> Vec<StockAdjustment> {
        let mut adjustments = Vec::new();

        self.lines.retain_mut(|line| {
            let stock = products
                .iter()
                .find(|p| p.id == line.product_id)
                .map_or(0, |p| p.stock);

            if line.quantity <= stock {
                return true;
            }

            let to = clamp_quantity(line.quantity, stock);
            adjustments.push(StockAdjustment {
                product_id: line.product_id.clone(),
                from: line.quantity,
                to,
            });
            line.quantity = to;
            to > 0
        });

        adjustments
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn totals(&self, tax_rate: TaxRate, discount: Money) -> Totals {
        compute_totals(&self.lines, tax_rate, discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64, stock: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            sku: format!("SKU-{}", id),
            price_cents,
            stock,
            category: "Grocery".to_string(),
        }
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 999, 5);

        assert_eq!(cart.add_product(&p).unwrap(), 1);
        assert_eq!(cart.add_product(&p).unwrap(), 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_respects_stock() {
        let mut cart = Cart::new();
        let p = product("1", 999, 1);

        cart.add_product(&p).unwrap();
        assert!(matches!(
            cart.add_product(&p),
            Err(CoreError::InsufficientStock { available: 1, requested: 2, .. })
        ));
        assert!(matches!(
            cart.add_product(&product("2", 100, 0)),
            Err(CoreError::OutOfStock { .. })
        ));
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_product(&product(&i.to_string(), 100, 3)).unwrap();
        }
        assert!(matches!(
            cart.add_product(&product("overflow", 100, 3)),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_set_quantity_bounds() {
        let mut cart = Cart::new();
        let p = product("1", 500, 4);
        cart.add_product(&p).unwrap();

        cart.set_quantity(&p, 4).unwrap();
        assert_eq!(cart.line("1").map(|l| l.quantity), Some(4));

        assert!(cart.set_quantity(&p, 0).is_err());
        assert!(cart.set_quantity(&p, 5).is_err());
        assert_eq!(cart.line("1").map(|l| l.quantity), Some(4));

        assert!(matches!(
            cart.set_quantity(&product("9", 1, 9), 1),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_remove_last_item_zeroes_totals() {
        let mut cart = Cart::new();
        let p = product("1", 10000, 2);
        cart.add_product(&p).unwrap();
        assert_eq!(cart.totals(TaxRate::from_bps(1800), Money::zero()).total.cents(), 11800);

        cart.remove("1").unwrap();
        assert!(cart.is_empty());
        assert!(cart.totals(TaxRate::from_bps(1800), Money::zero()).is_zero());
        assert!(cart.remove("1").is_err());
    }

    #[test]
    fn test_reconcile_reclamps_stale_lines() {
        let mut cart = Cart::new();
        let a = product("a", 100, 5);
        let b = product("b", 100, 5);
        let c = product("c", 100, 5);
        cart.add_quantity(&a, 4).unwrap();
        cart.add_quantity(&b, 2).unwrap();
        cart.add_quantity(&c, 3).unwrap();

        // Stock dropped elsewhere: a → 2, c → 0, b unchanged.
        let current = vec![product("a", 100, 2), b.clone(), product("c", 100, 0)];
        let adjustments = cart.reconcile(&current);

        assert_eq!(adjustments.len(), 2);
        assert_eq!(cart.line("a").map(|l| l.quantity), Some(2));
        assert_eq!(cart.line("b").map(|l| l.quantity), Some(2));
        assert!(cart.line("c").is_none());
        assert!(adjustments.iter().any(|a| a.product_id == "c" && a.to == 0));
    }

    #[test]
    fn test_quantity_controls() {
        assert_eq!(
            QuantityControls::for_line(1, 5),
            QuantityControls { can_decrement: false, can_increment: true }
        );
        assert_eq!(
            QuantityControls::for_line(5, 5),
            QuantityControls { can_decrement: true, can_increment: false }
        );
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("1", 1000, 5);
        cart.add_product(&p).unwrap();

        p.price_cents = 2000;
        cart.add_product(&p).unwrap();

        assert_eq!(cart.line("1").map(|l| l.unit_price.cents()), Some(1000));
    }
}
