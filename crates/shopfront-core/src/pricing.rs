//! # Cart Pricing
//!
//! Subtotal, tax, discount, and total for a set of cart lines.
//!
//! ```text
//! lines ──► subtotal = Σ unit_price × qty
//!              │
//!              ├──► tax = subtotal × rate        (half-up on minor units)
//!              │
//!              ├──► discount clamped to [0, subtotal + tax]
//!              │
//!              ▼
//!           total = subtotal + tax − discount     (never negative)
//! ```
//!
//! [`compute_totals`] is pure: same lines, rate, and discount always give the
//! same [`Totals`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Totals
// =============================================================================

/// The four numbers every cart and checkout screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl Totals {
    pub fn is_zero(&self) -> bool {
        self.subtotal.is_zero() && self.tax.is_zero() && self.total.is_zero()
    }
}

/// Computes totals for `lines`.
///
/// ```rust
/// use shopfront_core::cart::CartLine;
/// use shopfront_core::money::Money;
/// use shopfront_core::pricing::compute_totals;
/// use shopfront_core::types::TaxRate;
///
/// let lines = vec![CartLine::new("p1", "OIL-1L", "Mustard Oil 1L", Money::from_cents(10000), 1)];
/// let totals = compute_totals(&lines, TaxRate::from_bps(1800), Money::zero());
/// assert_eq!(totals.tax.cents(), 1800);
/// assert_eq!(totals.total.cents(), 11800);
/// ```
pub fn compute_totals(lines: &[CartLine], tax_rate: TaxRate, discount: Money) -> Totals {
    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
    totals_for_subtotal(subtotal, tax_rate, discount)
}

/// Same as [`compute_totals`] when the subtotal is already known.
pub fn totals_for_subtotal(subtotal: Money, tax_rate: TaxRate, discount: Money) -> Totals {
    let subtotal = subtotal.max(Money::zero());
    let tax = subtotal.calculate_tax(tax_rate);
    let gross = subtotal + tax;
    let discount = discount.clamp(Money::zero(), gross);

    Totals {
        subtotal,
        tax,
        discount,
        total: gross - discount,
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// What a discount code takes off the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Flat amount off.
    Fixed(Money),
    /// Basis points of subtotal + tax.
    Percentage(u32),
}

impl Discount {
    /// Amount this discount takes off a bill of `gross` (subtotal + tax).
    ///
    /// The result is not yet clamped; [`compute_totals`] does that.
    pub fn amount_for(&self, gross: Money) -> Money {
        match self {
            Discount::Fixed(amount) => *amount,
            Discount::Percentage(bps) => gross.percentage((*bps).min(10000)),
        }
    }
}

/// Known discount codes. Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct DiscountBook {
    codes: HashMap<String, Discount>,
}

impl DiscountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a code.
    pub fn with_code(mut self, code: &str, discount: Discount) -> Self {
        self.codes.insert(normalize_code(code), discount);
        self
    }

    /// Resolves a code typed by the cashier.
    pub fn resolve(&self, code: &str) -> CoreResult<Discount> {
        let key = normalize_code(code);
        self.codes
            .get(&key)
            .copied()
            .ok_or(CoreError::UnknownDiscountCode(key))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price_cents: i64, qty: u32) -> CartLine {
        CartLine::new(id, &format!("SKU-{}", id), &format!("Item {}", id), Money::from_cents(price_cents), qty)
    }

    #[test]
    fn test_hundred_at_eighteen_percent() {
        let totals = compute_totals(&[line("1", 10000, 1)], TaxRate::from_bps(1800), Money::zero());
        assert_eq!(totals.subtotal.cents(), 10000);
        assert_eq!(totals.tax.cents(), 1800);
        assert_eq!(totals.discount.cents(), 0);
        assert_eq!(totals.total.cents(), 11800);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax_across_amounts() {
        let rate = TaxRate::from_bps(1800);
        for cents in [0_i64, 1, 99, 250, 1999, 123_456, 10_000_000] {
            let totals = compute_totals(&[line("1", cents, 1)], rate, Money::zero());
            assert_eq!(totals.tax, Money::from_cents(cents).calculate_tax(rate));
            assert_eq!(totals.total, totals.subtotal + totals.tax);
        }
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = compute_totals(&[], TaxRate::from_bps(1800), Money::from_cents(500));
        assert!(totals.is_zero());
        assert_eq!(totals.discount, Money::zero());
    }

    #[test]
    fn test_discount_is_clamped() {
        let lines = [line("1", 1000, 2)];
        let rate = TaxRate::from_bps(1800);

        let totals = compute_totals(&lines, rate, Money::from_cents(100_000));
        assert_eq!(totals.discount.cents(), 2360);
        assert_eq!(totals.total, Money::zero());

        let totals = compute_totals(&lines, rate, Money::from_cents(-500));
        assert_eq!(totals.discount, Money::zero());
        assert_eq!(totals.total.cents(), 2360);
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let lines = [line("1", 4550, 3), line("2", 1299, 1)];
        let rate = TaxRate::from_bps(1800);
        let first = compute_totals(&lines, rate, Money::from_cents(200));
        let second = compute_totals(&lines, rate, Money::from_cents(200));
        assert_eq!(first, second);
    }

    #[test]
    fn test_discount_book() {
        let book = DiscountBook::new()
            .with_code("festive10", Discount::Percentage(1000))
            .with_code("FLAT50", Discount::Fixed(Money::from_cents(5000)));

        assert_eq!(book.len(), 2);
        assert_eq!(book.resolve(" Festive10 ").unwrap(), Discount::Percentage(1000));
        assert!(matches!(
            book.resolve("nope"),
            Err(CoreError::UnknownDiscountCode(code)) if code == "NOPE"
        ));

        let gross = Money::from_cents(11800);
        assert_eq!(Discount::Percentage(1000).amount_for(gross).cents(), 1180);
        assert_eq!(Discount::Fixed(Money::from_cents(5000)).amount_for(gross).cents(), 5000);
        assert_eq!(Discount::Percentage(20000).amount_for(gross), gross);
    }
}
