//! # Order History
//!
//! Past sales, newest first, searchable by order id or item name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_core::catalog::{self, matches_term, Page};
use shopfront_core::{Money, Order};
use tracing::debug;

use crate::order_success::short_id;

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    pub short_id: String,
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub total: Money,
    pub customer_id: Option<String>,
    pub paid: bool,
}

impl OrderRow {
    fn from_order(order: &Order) -> Self {
        OrderRow {
            id: order.id.clone(),
            short_id: short_id(&order.id),
            created_at: order.created_at,
            item_count: order.items.len(),
            total_quantity: order.total_quantity(),
            total: Money::from_cents(order.total_cents),
            customer_id: order.customer_id.clone(),
            paid: order.payment.is_some(),
        }
    }
}

/// Rendered history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryView {
    pub search: String,
    pub page: Page<OrderRow>,
    /// Sum of every matching order, not just this page.
    pub matched_revenue: Money,
    pub empty_message: Option<String>,
}

/// History table state.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    search: String,
    page: usize,
    page_size: usize,
}

impl OrderHistory {
    pub fn new(page_size: usize) -> Self {
        OrderHistory {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn set_search(&mut self, search: &str) {
        debug!(search, "order history search changed");
        self.search = search.to_string();
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn render(&mut self, orders: &[Order]) -> OrderHistoryView {
        let mut matched: Vec<&Order> = orders
            .iter()
            .filter(|o| {
                matches_term(&self.search, [o.id.as_str()])
                    || o.items.iter().any(|i| matches_term(&self.search, [i.name.as_str()]))
            })
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let matched_revenue: Money = matched.iter().map(|o| Money::from_cents(o.total_cents)).sum();
        let page = catalog::paginate(matched, self.page, self.page_size).map(OrderRow::from_order);
        self.page = page.page;

        let empty_message = page.is_empty().then(|| "No orders yet".to_string());
        OrderHistoryView {
            search: self.search.clone(),
            page,
            matched_revenue,
            empty_message,
        }
    }
}
