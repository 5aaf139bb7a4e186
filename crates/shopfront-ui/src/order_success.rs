//! # Order Success Dialog
//!
//! Shown after payment: order summary plus a plain-text receipt.
//!
//! ## Receipt Layout (42 columns)
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            Shopfront Demo Store          │
//! │               14 MG Road                 │
//! │ Order 3f2a9c1d      2024-03-07 14:05 UTC │
//! │ ---------------------------------------- │
//! │ Mustard Oil 1L                           │
//! │   2 x ₹189.00                    ₹378.00 │
//! │ ---------------------------------------- │
//! │ Subtotal                         ₹378.00 │
//! │ Tax (18%)                         ₹68.04 │
//! │ TOTAL                            ₹446.04 │
//! │ Paid: pay_001                            │
//! └──────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_core::{Money, Order, OrderItem};

use crate::config::ShopConfig;

const RECEIPT_WIDTH: usize = 42;

/// Rendered dialog contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryView {
    pub order_id: String,
    /// First 8 characters of the id, for display.
    pub short_id: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_quantity: u32,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub transaction_id: Option<String>,
}

impl OrderSummaryView {
    pub fn from_order(order: &Order) -> Self {
        OrderSummaryView {
            order_id: order.id.clone(),
            short_id: short_id(&order.id),
            created_at: order.created_at,
            items: order.items.clone(),
            total_quantity: order.total_quantity(),
            subtotal: Money::from_cents(order.subtotal_cents),
            tax: Money::from_cents(order.tax_cents),
            discount: Money::from_cents(order.discount_cents),
            total: Money::from_cents(order.total_cents),
            transaction_id: order.payment.as_ref().map(|p| p.transaction_id.clone()),
        }
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Dialog state.
#[derive(Debug, Clone, Default)]
pub struct OrderSuccessDialog {
    order: Option<Order>,
}

impl OrderSuccessDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, order: Order) {
        self.order = Some(order);
    }

    pub fn close(&mut self) {
        self.order = None;
    }

    pub fn is_open(&self) -> bool {
        self.order.is_some()
    }

    pub fn render(&self) -> Option<OrderSummaryView> {
        self.order.as_ref().map(OrderSummaryView::from_order)
    }

    pub fn receipt_text(&self, config: &ShopConfig) -> Option<String> {
        self.order.as_ref().map(|order| receipt_text(order, config))
    }
}

/// Formats `order` as a fixed-width text receipt.
pub fn receipt_text(order: &Order, config: &ShopConfig) -> String {
    let rule = "-".repeat(RECEIPT_WIDTH);
    let mut lines = Vec::new();

    lines.push(center(&config.store.name));
    for address in &config.store.address {
        lines.push(center(address));
    }
    lines.push(columns(
        &format!("Order {}", short_id(&order.id)),
        &order.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    ));
    lines.push(rule.clone());

    for item in &order.items {
        lines.push(item.name.clone());
        lines.push(columns(
            &format!(
                "  {} x {}",
                item.quantity,
                config.format_money(Money::from_cents(item.unit_price_cents))
            ),
            &config.format_money(item.line_total()),
        ));
    }
    lines.push(rule);

    lines.push(columns(
        "Subtotal",
        &config.format_money(Money::from_cents(order.subtotal_cents)),
    ));
    lines.push(columns(
        &config.tax_label(),
        &config.format_money(Money::from_cents(order.tax_cents)),
    ));
    if order.discount_cents > 0 {
        lines.push(columns(
            "Discount",
            &format!("-{}", config.format_money(Money::from_cents(order.discount_cents))),
        ));
    }
    lines.push(columns(
        "TOTAL",
        &config.format_money(Money::from_cents(order.total_cents)),
    ));
    if let Some(payment) = &order.payment {
        lines.push(format!("Paid: {}", payment.transaction_id));
    }

    lines.join("\n")
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((RECEIPT_WIDTH - len) / 2), text)
}

fn columns(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = RECEIPT_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::PaymentReceipt;

    fn order() -> Order {
        Order {
            id: "3f2a9c1d-0000-4000-8000-000000000001".to_string(),
            items: vec![OrderItem {
                name: "Mustard Oil 1L".to_string(),
                quantity: 2,
                unit_price_cents: 18900,
            }],
            subtotal_cents: 37800,
            tax_cents: 6804,
            discount_cents: 0,
            total_cents: 44604,
            created_at: Utc::now(),
            customer_id: None,
            payment: Some(PaymentReceipt {
                transaction_id: "pay_001".to_string(),
                provider_order_id: "order_001".to_string(),
                amount_minor: 44604,
                currency: "INR".to_string(),
                paid_at: Utc::now(),
            }),
        }
    }

    #[test]
    fn test_dialog_lifecycle() {
        let mut dialog = OrderSuccessDialog::new();
        assert!(dialog.render().is_none());

        dialog.open(order());
        let view = dialog.render().unwrap();
        assert_eq!(view.short_id, "3f2a9c1d");
        assert_eq!(view.total_quantity, 2);
        assert_eq!(view.total.cents(), 44604);
        assert_eq!(view.transaction_id.as_deref(), Some("pay_001"));

        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_receipt_text() {
        let mut dialog = OrderSuccessDialog::new();
        dialog.open(order());
        let receipt = dialog.receipt_text(&ShopConfig::default()).unwrap();

        assert!(receipt.contains("Shopfront Demo Store"));
        assert!(receipt.contains("  2 x ₹189.00"));
        assert!(receipt.contains("₹378.00"));
        assert!(receipt.contains("Tax (18%)"));
        assert!(receipt.lines().any(|l| l.starts_with("TOTAL") && l.ends_with("₹446.04")));
        assert!(!receipt.contains("Discount"));
        assert!(receipt.ends_with("Paid: pay_001"));
    }
}
