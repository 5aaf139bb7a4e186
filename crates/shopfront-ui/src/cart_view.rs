//! # Cart View
//!
//! Renders the cart the parent owns and turns clicks into cart events.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                                       2 items     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Basmati Rice 5kg     [−] 2 [+]      ₹1,098.00    [remove]              │
//! │  Mustard Oil 1L       [−] 1 [+]        ₹189.00    [remove]              │
//! │     "−" disabled at 1, "+" disabled at stock                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Discount code [ FESTIVE10 ] [Apply]                                    │
//! │  Subtotal                                        ₹1,287.00              │
//! │  Tax (18%)                                         ₹231.66              │
//! │  Discount                                         −₹151.87              │
//! │  TOTAL                                           ₹1,366.79              │
//! │                                   [ Checkout ]  (disabled when empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The view never changes the cart itself. Every mutation goes out through
//! [`CartEvents`] and comes back as a new snapshot.

use serde::{Deserialize, Serialize};
use shopfront_core::cart::{clamp_quantity, StockAdjustment};
use shopfront_core::validation::parse_quantity_input;
use shopfront_core::{
    compute_totals, CartLine, Discount, DiscountBook, Money, Product, QuantityControls, TaxRate,
    Totals,
};
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};
use crate::events::{CartEvents, CheckoutTotals};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

// =============================================================================
// View Types
// =============================================================================

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub unit_price: Money,
    /// Quantity shown, clamped to current stock.
    pub quantity: u32,
    pub line_total: Money,
    pub stock: u32,
    pub controls: QuantityControls,
    /// The cart holds more than is in stock; reconcile before checkout.
    pub stale: bool,
}

/// Rendered cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLineView>,
    pub totals: Totals,
    pub tax_rate: TaxRate,
    pub item_count: usize,
    pub total_quantity: u32,
    pub is_empty: bool,
    pub empty_message: Option<String>,
    /// Non-empty, no stale lines, and something left to pay. A discount that
    /// covers the whole bill leaves the sale unpayable.
    pub can_checkout: bool,
    pub discount_code: Option<String>,
    pub discount_error: Option<String>,
}

// =============================================================================
// Cart View
// =============================================================================

/// Transient cart UI state: the discount code box.
#[derive(Debug, Clone)]
pub struct CartView {
    tax_rate: TaxRate,
    discounts: DiscountBook,
    applied: Option<(String, Discount)>,
    discount_error: Option<String>,
}

impl CartView {
    pub fn new(tax_rate: TaxRate, discounts: DiscountBook) -> Self {
        CartView {
            tax_rate,
            discounts,
            applied: None,
            discount_error: None,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Renders `lines` against current `products`.
    ///
    /// A line whose product is missing from `products` is treated as having
    /// no stock.
    pub fn render(&self, lines: &[CartLine], products: &[Product]) -> CartSnapshot {
        let mut views = Vec::with_capacity(lines.len());
        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            let stock = stock_of(products, &line.product_id);
            let quantity = clamp_quantity(line.quantity, stock);
            let effective = CartLine {
                quantity,
                ..line.clone()
            };

            views.push(CartLineView {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                sku: line.sku.clone(),
                unit_price: line.unit_price,
                quantity,
                line_total: effective.line_total(),
                stock,
                controls: QuantityControls::for_line(quantity, stock),
                stale: line.quantity > stock,
            });
            priced.push(effective);
        }

        let totals = self.totals_for(&priced);
        let is_empty = lines.is_empty();
        let has_stale = views.iter().any(|v| v.stale);

        CartSnapshot {
            total_quantity: views.iter().map(|v| v.quantity).sum(),
            item_count: views.len(),
            lines: views,
            totals,
            tax_rate: self.tax_rate,
            is_empty,
            empty_message: is_empty.then(|| EMPTY_CART_MESSAGE.to_string()),
            can_checkout: !is_empty && !has_stale && totals.total.is_positive(),
            discount_code: self.applied.as_ref().map(|(code, _)| code.clone()),
            discount_error: self.discount_error.clone(),
        }
    }

    fn totals_for(&self, lines: &[CartLine]) -> Totals {
        let undiscounted = compute_totals(lines, self.tax_rate, Money::zero());
        let discount = match &self.applied {
            Some((_, discount)) => discount.amount_for(undiscounted.subtotal + undiscounted.tax),
            None => Money::zero(),
        };
        compute_totals(lines, self.tax_rate, discount)
    }

    // =========================================================================
    // Quantity
    // =========================================================================

    /// "+" on a line. Does nothing at stock.
    ///
    /// ## Returns
    /// The new quantity, or `None` when the button was disabled.
    pub fn increment(
        &self,
        product_id: &str,
        lines: &[CartLine],
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<Option<u32>> {
        let line = find_line(lines, product_id)?;
        let stock = stock_of(products, product_id);
        if !QuantityControls::for_line(line.quantity, stock).can_increment {
            debug!(product_id, quantity = line.quantity, stock, "increment ignored at stock");
            return Ok(None);
        }
        let quantity = line.quantity + 1;
        debug!(product_id, quantity, "cart quantity changed");
        events.update_quantity(product_id, quantity);
        Ok(Some(quantity))
    }

    /// "−" on a line. Does nothing at 1.
    pub fn decrement(
        &self,
        product_id: &str,
        lines: &[CartLine],
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<Option<u32>> {
        let line = find_line(lines, product_id)?;
        let stock = stock_of(products, product_id);
        let current = clamp_quantity(line.quantity, stock);
        if current <= 1 {
            debug!(product_id, "decrement ignored at 1");
            return Ok(None);
        }
        let quantity = current - 1;
        debug!(product_id, quantity, "cart quantity changed");
        events.update_quantity(product_id, quantity);
        Ok(Some(quantity))
    }

    /// Quantity typed into the line's input.
    ///
    /// Anything that is not a positive integer becomes 1; the result is then
    /// clamped to stock. No event is emitted when the quantity is unchanged.
    pub fn set_quantity_text(
        &self,
        product_id: &str,
        text: &str,
        lines: &[CartLine],
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<u32> {
        let line = find_line(lines, product_id)?;
        let stock = stock_of(products, product_id);
        let quantity = clamp_quantity(parse_quantity_input(text), stock);

        if quantity == 0 {
            debug!(product_id, "typed quantity on a product with no stock");
            events.remove_item(product_id);
        } else if quantity != line.quantity {
            debug!(product_id, quantity, "cart quantity changed");
            events.update_quantity(product_id, quantity);
        }
        Ok(quantity)
    }

    pub fn remove(
        &self,
        product_id: &str,
        lines: &[CartLine],
        events: &impl CartEvents,
    ) -> UiResult<()> {
        find_line(lines, product_id)?;
        debug!(product_id, "cart line removed");
        events.remove_item(product_id);
        Ok(())
    }

    /// Emits the events that bring stale lines back within stock.
    ///
    /// Lines whose product has no stock left are removed.
    pub fn reconcile_stock(
        &self,
        lines: &[CartLine],
        products: &[Product],
        events: &impl CartEvents,
    ) -> Vec<StockAdjustment> {
        let mut adjustments = Vec::new();
        for line in lines {
            let stock = stock_of(products, &line.product_id);
            if line.quantity <= stock {
                continue;
            }
            if stock == 0 {
                events.remove_item(&line.product_id);
            } else {
                events.update_quantity(&line.product_id, stock);
            }
            info!(
                product_id = %line.product_id,
                from = line.quantity,
                to = stock,
                "cart line reconciled with stock"
            );
            adjustments.push(StockAdjustment {
                product_id: line.product_id.clone(),
                from: line.quantity,
                to: stock,
            });
        }
        adjustments
    }

    // =========================================================================
    // Discount
    // =========================================================================

    /// Applies a discount code. Unknown codes leave the discount at zero and
    /// set an inline message.
    pub fn apply_discount_code(&mut self, code: &str) -> UiResult<()> {
        match self.discounts.resolve(code) {
            Ok(discount) => {
                let code = code.trim().to_uppercase();
                debug!(code = %code, ?discount, "discount code applied");
                self.applied = Some((code, discount));
                self.discount_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(code, "unknown discount code");
                let err = UiError::from(err);
                self.applied = None;
                self.discount_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    pub fn clear_discount(&mut self) {
        debug!("discount cleared");
        self.applied = None;
        self.discount_error = None;
    }

    /// Forgets the code once the sale is done.
    pub fn reset(&mut self) {
        self.applied = None;
        self.discount_error = None;
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// "Checkout". Rejected while the cart is empty or has stale lines.
    pub fn checkout(
        &self,
        lines: &[CartLine],
        products: &[Product],
        events: &impl CartEvents,
    ) -> UiResult<CheckoutTotals> {
        let snapshot = self.render(lines, products);
        if snapshot.is_empty {
            return Err(UiError::cart("Cart is empty"));
        }
        if let Some(stale) = snapshot.lines.iter().find(|l| l.stale) {
            return Err(UiError::new(
                crate::error::ErrorCode::InsufficientStock,
                format!("Only {} of {} left in stock", stale.stock, stale.name),
            ));
        }
        if !snapshot.can_checkout {
            return Err(UiError::cart("Nothing to pay"));
        }

        let totals =
            CheckoutTotals::from_totals(snapshot.totals, snapshot.item_count, snapshot.discount_code);
        info!(
            items = totals.item_count,
            total = totals.total.cents(),
            "checkout requested"
        );
        events.checkout(totals.clone());
        Ok(totals)
    }
}

fn stock_of(products: &[Product], product_id: &str) -> u32 {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map_or(0, |p| p.stock)
}

fn find_line<'a>(lines: &'a [CartLine], product_id: &str) -> UiResult<&'a CartLine> {
    lines
        .iter()
        .find(|l| l.product_id == product_id)
        .ok_or_else(|| UiError::not_found("Cart line", product_id))
}
