//! # Handler Traits
//!
//! How a screen tells its parent that the user did something.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   One-way data flow                                     │
//! │                                                                         │
//! │   parent state ──snapshot──► view-model.render() ──► view struct        │
//! │        ▲                                                                │
//! │        │ mutate                                                         │
//! │        │                                                                │
//! │   handler trait ◄──validated data── view-model method ◄── user action   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers only ever receive fully formed, already validated values. They
//! take `&self` so a parent holding its data behind a mutex can implement
//! them directly.

use serde::{Deserialize, Serialize};
use shopfront_core::{
    Customer, Money, Order, Product, PurchaseOrderStatus, Supplier, Totals,
};

use crate::error::UiError;

/// Amounts handed to the parent when the cashier presses "Checkout".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    /// Distinct lines in the cart.
    pub item_count: usize,
    /// Applied discount code, if any.
    pub discount_code: Option<String>,
}

impl CheckoutTotals {
    pub fn from_totals(totals: Totals, item_count: usize, discount_code: Option<String>) -> Self {
        CheckoutTotals {
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            total: totals.total,
            item_count,
            discount_code,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            discount: self.discount,
            total: self.total,
        }
    }
}

/// Cart and product grid callbacks.
pub trait CartEvents {
    fn add_to_cart(&self, product: &Product);
    fn update_quantity(&self, product_id: &str, quantity: u32);
    fn remove_item(&self, product_id: &str);
    fn checkout(&self, totals: CheckoutTotals);
}

/// Customer picker callbacks.
pub trait CustomerEvents {
    /// `None` clears the selection.
    fn select_customer(&self, customer: Option<&Customer>);
    fn create_customer(&self, customer: Customer);
}

/// Payment form callbacks.
pub trait PaymentEvents {
    fn payment_success(&self, order: Order);
    fn payment_error(&self, error: UiError);
}

/// Supplier and purchase-order callbacks.
pub trait InventoryEvents {
    fn update_status(&self, order_id: &str, status: PurchaseOrderStatus);
    fn save_supplier(&self, supplier: Supplier);
    fn delete_supplier(&self, supplier_id: &str);
}
