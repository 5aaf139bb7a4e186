//! # Purchase Order Status Rules
//!
//! ```text
//!                 ┌──────────────┐
//!                 │   Pending    │
//!                 └──────┬───────┘
//!          MarkDelivered │ Cancel
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!     ┌──────────────┐        ┌──────────────┐
//!     │  Delivered   │        │  Cancelled   │
//!     └──────────────┘        └──────────────┘
//!         terminal                terminal
//!
//!   Processing: set by the data layer, no controls from this side.
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::matches_term;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PurchaseOrder, PurchaseOrderStatus};

// =============================================================================
// Transitions
// =============================================================================

/// A status change the user can request from the PO screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransition {
    MarkDelivered,
    Cancel,
}

impl StatusTransition {
    /// Status the order ends up in.
    pub fn target(&self) -> PurchaseOrderStatus {
        match self {
            StatusTransition::MarkDelivered => PurchaseOrderStatus::Delivered,
            StatusTransition::Cancel => PurchaseOrderStatus::Cancelled,
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusTransition::MarkDelivered => "Mark as Delivered",
            StatusTransition::Cancel => "Cancel Order",
        }
    }

    /// Question asked by the confirmation dialog.
    pub fn confirmation_prompt(&self, order_number: &str) -> String {
        match self {
            StatusTransition::MarkDelivered => {
                format!("Mark purchase order {} as delivered?", order_number)
            }
            StatusTransition::Cancel => format!(
                "Cancel purchase order {}? This cannot be undone.",
                order_number
            ),
        }
    }
}

impl PurchaseOrderStatus {
    /// Delivered and Cancelled never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Delivered | PurchaseOrderStatus::Cancelled
        )
    }

    /// Transitions offered for this status.
    pub fn available_transitions(&self) -> &'static [StatusTransition] {
        match self {
            PurchaseOrderStatus::Pending => {
                &[StatusTransition::MarkDelivered, StatusTransition::Cancel]
            }
            PurchaseOrderStatus::Processing
            | PurchaseOrderStatus::Delivered
            | PurchaseOrderStatus::Cancelled => &[],
        }
    }

    pub fn allows(&self, transition: StatusTransition) -> bool {
        self.available_transitions().contains(&transition)
    }
}

// =============================================================================
// Purchase Order Operations
// =============================================================================

impl PurchaseOrder {
    /// Order total: the precomputed value when present, otherwise the sum of
    /// the line items.
    pub fn total(&self) -> Money {
        match self.total_cents {
            Some(cents) => Money::from_cents(cents),
            None => self.items.iter().map(|item| item.line_total()).sum(),
        }
    }

    /// Total units ordered across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Applies `transition`, stamping `today` as the delivery date when the
    /// order is marked delivered.
    pub fn apply_transition(
        &mut self,
        transition: StatusTransition,
        today: NaiveDate,
    ) -> CoreResult<()> {
        if !self.status.allows(transition) {
            return Err(CoreError::InvalidStatusTransition {
                order_number: self.order_number.clone(),
                from: self.status.to_string(),
                to: transition.target().to_string(),
            });
        }

        self.status = transition.target();
        if self.status == PurchaseOrderStatus::Delivered {
            self.actual_delivery = Some(today);
        }
        Ok(())
    }

    /// True when the expected delivery date has passed and the order is
    /// still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_terminal() && self.expected_delivery < today
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Filter state of the purchase-orders table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderFilter {
    /// Matches order number or supplier name.
    pub search: String,
    pub status: Option<PurchaseOrderStatus>,
}

impl PurchaseOrderFilter {
    pub fn matches(&self, order: &PurchaseOrder) -> bool {
        let status_ok = self.status.map_or(true, |status| order.status == status);
        status_ok
            && matches_term(
                &self.search,
                [order.order_number.as_str(), order.supplier_name.as_str()],
            )
    }
}

/// Filters purchase orders, newest order date first.
pub fn filter_purchase_orders<'a>(
    orders: &'a [PurchaseOrder],
    filter: &PurchaseOrderFilter,
) -> Vec<&'a PurchaseOrder> {
    let mut matched: Vec<&PurchaseOrder> = orders.iter().filter(|o| filter.matches(o)).collect();
    matched.sort_by(|a, b| {
        b.order_date
            .cmp(&a.order_date)
            .then_with(|| a.order_number.cmp(&b.order_number))
    });
    matched
}
