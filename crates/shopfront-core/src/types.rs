//! # Domain Types
//!
//! Core domain types shared by every Shopfront screen.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Sales side                          Inventory side                     │
//! │  ──────────                          ──────────────                     │
//! │  ┌───────────┐  ┌───────────┐        ┌───────────┐  ┌───────────────┐  │
//! │  │  Product  │  │   Order   │        │ Supplier  │  │ PurchaseOrder │  │
//! │  │  sku      │  │  items    │        │ categories│  │  status       │  │
//! │  │  price    │  │  totals   │        │ contact   │  │  items        │  │
//! │  │  stock    │  │  receipt  │        └───────────┘  │  dates        │  │
//! │  └───────────┘  └───────────┘                       └───────────────┘  │
//! │  ┌───────────┐  ┌───────────────┐    ┌──────────────────────┐          │
//! │  │ Customer  │  │PaymentReceipt │    │ PurchaseOrderStatus  │          │
//! │  │ loyalty   │  │ transaction   │    │ Pending → Delivered  │          │
//! │  └───────────┘  └───────────────┘    │ Pending → Cancelled  │          │
//! │                                      └──────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is owned by the data layer outside this crate. The screens
//! only ever read a snapshot of these values.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1800 bps = 18%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config files and env vars).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Stock Keeping Unit - business identifier.
    pub sku: String,
    /// Unit price in minor units, never negative.
    pub price_cents: i64,
    /// Units on hand.
    pub stock: u32,
    /// Category label used by the grid filter.
    pub category: String,
}

impl Product {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record selectable at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub loyalty_points: u32,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Category labels this supplier delivers. Never empty once validated.
    pub categories: Vec<String>,
    pub notes: String,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// What the payment widget handed back, packaged for the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Provider transaction / payment id.
    pub transaction_id: String,
    /// Provider-side order id the widget was opened with.
    pub provider_order_id: String,
    /// Charged amount in minor units.
    pub amount_minor: i64,
    /// ISO 4217 code.
    pub currency: String,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub customer_id: Option<String>,
    pub payment: Option<PaymentReceipt>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Serializes the order (with its receipt) for hand-off to the caller.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Purchase Orders
// =============================================================================

/// Status of a purchase order.
///
/// Pending is the only state with outgoing transitions; see
/// [`crate::purchase_order`] for the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PurchaseOrderStatus {
    #[default]
    Pending,
    /// Set by the data layer while the supplier prepares the shipment.
    Processing,
    Delivered,
    Cancelled,
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PurchaseOrderStatus::Pending => "Pending",
            PurchaseOrderStatus::Processing => "Processing",
            PurchaseOrderStatus::Delivered => "Delivered",
            PurchaseOrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// One line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    pub name: String,
    pub sku: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

impl PurchaseOrderItem {
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// An order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub order_number: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub items: Vec<PurchaseOrderItem>,
    pub status: PurchaseOrderStatus,
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    #[ts(as = "String")]
    pub expected_delivery: NaiveDate,
    #[ts(as = "Option<String>")]
    pub actual_delivery: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Precomputed total from the data layer, if it sent one.
    pub total_cents: Option<i64>,
}

// =============================================================================
// Roles
// =============================================================================

/// Role of the signed-in user, used by the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Cashier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(-3.0).bps(), 0);
        assert!((TaxRate::from_bps(1800).percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            name: "Basmati Rice 5kg".to_string(),
            quantity: 3,
            unit_price_cents: 54900,
        };
        assert_eq!(item.line_total().cents(), 164700);
    }

    #[test]
    fn test_purchase_order_status_default_and_display() {
        assert_eq!(PurchaseOrderStatus::default(), PurchaseOrderStatus::Pending);
        assert_eq!(PurchaseOrderStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_order_json_carries_receipt() {
        let order = Order {
            id: "o-1".to_string(),
            items: vec![],
            subtotal_cents: 0,
            tax_cents: 0,
            discount_cents: 0,
            total_cents: 0,
            created_at: Utc::now(),
            customer_id: None,
            payment: Some(PaymentReceipt {
                transaction_id: "pay_123".to_string(),
                provider_order_id: "order_456".to_string(),
                amount_minor: 0,
                currency: "INR".to_string(),
                paid_at: Utc::now(),
            }),
        };
        let json = order.to_json().unwrap();
        assert!(json.contains("\"transactionId\":\"pay_123\""));
        assert!(json.contains("\"providerOrderId\":\"order_456\""));
    }
}
