//! # Purchase Orders
//!
//! Table, details panel, and the status confirmation dialog they share.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search PO number or supplier ]   [ All statuses ▾ ]                  │
//! │                                                                         │
//! │  PO-1042  Annapurna Foods  2024-03-01  Pending    ₹16,470.00  [✓] [✕]   │
//! │  PO-1041  Ganga Oils       2024-02-27  Delivered   ₹9,450.00            │
//! │  PO-1040  Nandini Dairy    2024-02-20  Cancelled   ₹2,300.00            │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!   [✓] ──► StatusDialog ("Mark PO-1042 as delivered?")
//!               ├─ Confirm ──► status re-checked against the current orders
//!               │                ├─ still Pending ──► update_status(id, Delivered)
//!               │                └─ moved on      ──► notice, nothing emitted
//!               └─ Cancel  ──► dialog closes, nothing emitted
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopfront_core::catalog::{self, Page};
use shopfront_core::purchase_order::{filter_purchase_orders, PurchaseOrderFilter};
use shopfront_core::{
    Money, PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus, StatusTransition,
};
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};
use crate::events::InventoryEvents;

pub const NO_PURCHASE_ORDERS_MESSAGE: &str = "No purchase orders found";

// =============================================================================
// Status Dialog
// =============================================================================

/// An open confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransition {
    pub order_id: String,
    pub order_number: String,
    pub transition: StatusTransition,
    pub prompt: String,
}

/// Confirmation step in front of every status change.
#[derive(Debug, Clone, Default)]
pub struct StatusDialog {
    pending: Option<PendingTransition>,
    notice: Option<String>,
}

impl StatusDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog. A transition the order's status does not allow
    /// leaves the dialog closed and sets an inline notice instead.
    pub fn request(&mut self, order: &PurchaseOrder, transition: StatusTransition) {
        if !order.status.allows(transition) {
            self.refuse(order, transition);
            return;
        }

        debug!(order_number = %order.order_number, ?transition, "status change requested");
        self.notice = None;
        self.pending = Some(PendingTransition {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            transition,
            prompt: transition.confirmation_prompt(&order.order_number),
        });
    }

    /// Emits `update_status` and closes. Returns the new status, or `None`
    /// when the dialog was not open or the order has since left a status
    /// that allows the transition.
    pub fn confirm(
        &mut self,
        orders: &[PurchaseOrder],
        events: &impl InventoryEvents,
    ) -> Option<PurchaseOrderStatus> {
        let pending = self.pending.take()?;
        let Some(order) = orders.iter().find(|o| o.id == pending.order_id) else {
            warn!(order_number = %pending.order_number, "purchase order disappeared");
            self.notice = Some(format!("{} no longer exists", pending.order_number));
            return None;
        };
        if !order.status.allows(pending.transition) {
            self.refuse(order, pending.transition);
            return None;
        }

        let status = pending.transition.target();
        info!(order_number = %pending.order_number, %status, "purchase order status changed");
        events.update_status(&pending.order_id, status);
        Some(status)
    }

    /// Closes a dialog whose order no longer allows the pending transition.
    pub fn refresh(&mut self, orders: &[PurchaseOrder]) {
        let Some(pending) = &self.pending else {
            return;
        };
        match orders.iter().find(|o| o.id == pending.order_id) {
            Some(order) if order.status.allows(pending.transition) => {}
            Some(order) => {
                let transition = pending.transition;
                self.refuse(order, transition);
            }
            None => {
                debug!(order_number = %pending.order_number, "dialog closed, order gone");
                self.pending = None;
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn refuse(&mut self, order: &PurchaseOrder, transition: StatusTransition) {
        warn!(
            order_number = %order.order_number,
            status = %order.status,
            ?transition,
            "status transition not allowed"
        );
        self.pending = None;
        self.notice = Some(format!(
            "{} is {} and can no longer change status",
            order.order_number, order.status
        ));
    }
}

/// Transition button on a row or details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionAction {
    pub transition: StatusTransition,
    pub label: String,
}

fn actions_for(status: PurchaseOrderStatus) -> Vec<TransitionAction> {
    status
        .available_transitions()
        .iter()
        .map(|&transition| TransitionAction {
            transition,
            label: transition.label().to_string(),
        })
        .collect()
}

fn find_order<'a>(orders: &'a [PurchaseOrder], order_id: &str) -> UiResult<&'a PurchaseOrder> {
    orders
        .iter()
        .find(|o| o.id == order_id)
        .ok_or_else(|| UiError::not_found("Purchase order", order_id))
}

// =============================================================================
// Table
// =============================================================================

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderRow {
    pub id: String,
    pub order_number: String,
    pub supplier_name: String,
    pub order_date: NaiveDate,
    pub expected_delivery: NaiveDate,
    pub status: PurchaseOrderStatus,
    pub total: Money,
    pub item_count: usize,
    pub overdue: bool,
    pub actions: Vec<TransitionAction>,
}

/// Rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrdersTableView {
    pub filter: PurchaseOrderFilter,
    pub page: Page<PurchaseOrderRow>,
    pub empty_message: Option<String>,
    pub dialog: Option<PendingTransition>,
    pub notice: Option<String>,
}

/// Purchase-order list state.
#[derive(Debug, Clone)]
pub struct PurchaseOrdersTable {
    filter: PurchaseOrderFilter,
    page: usize,
    page_size: usize,
    dialog: StatusDialog,
}

impl PurchaseOrdersTable {
    pub fn new(page_size: usize) -> Self {
        PurchaseOrdersTable {
            filter: PurchaseOrderFilter::default(),
            page: 1,
            page_size: page_size.max(1),
            dialog: StatusDialog::new(),
        }
    }

    pub fn set_search(&mut self, search: &str) {
        debug!(search, "purchase order search changed");
        self.filter.search = search.to_string();
        self.page = 1;
    }

    /// `None` shows every status.
    pub fn set_status_filter(&mut self, status: Option<PurchaseOrderStatus>) {
        debug!(?status, "purchase order status filter changed");
        self.filter.status = status;
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn render(&mut self, orders: &[PurchaseOrder], today: NaiveDate) -> PurchaseOrdersTableView {
        self.dialog.refresh(orders);
        let matched = filter_purchase_orders(orders, &self.filter);
        let page = catalog::paginate(matched, self.page, self.page_size).map(|o| PurchaseOrderRow {
            id: o.id.clone(),
            order_number: o.order_number.clone(),
            supplier_name: o.supplier_name.clone(),
            order_date: o.order_date,
            expected_delivery: o.expected_delivery,
            status: o.status,
            total: o.total(),
            item_count: o.items.len(),
            overdue: o.is_overdue(today),
            actions: actions_for(o.status),
        });
        self.page = page.page;

        PurchaseOrdersTableView {
            filter: self.filter.clone(),
            empty_message: page
                .is_empty()
                .then(|| NO_PURCHASE_ORDERS_MESSAGE.to_string()),
            page,
            dialog: self.dialog.pending().cloned(),
            notice: self.dialog.notice().map(str::to_string),
        }
    }

    pub fn request_transition(
        &mut self,
        order_id: &str,
        transition: StatusTransition,
        orders: &[PurchaseOrder],
    ) -> UiResult<()> {
        let order = find_order(orders, order_id)?;
        self.dialog.request(order, transition);
        Ok(())
    }

    pub fn confirm_transition(
        &mut self,
        orders: &[PurchaseOrder],
        events: &impl InventoryEvents,
    ) -> Option<PurchaseOrderStatus> {
        self.dialog.confirm(orders, events)
    }

    pub fn cancel_transition(&mut self) {
        self.dialog.cancel();
    }
}

// =============================================================================
// Details
// =============================================================================

/// One item line in the details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLineView {
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&PurchaseOrderItem> for PurchaseOrderLineView {
    fn from(item: &PurchaseOrderItem) -> Self {
        PurchaseOrderLineView {
            name: item.name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            unit_price: Money::from_cents(item.unit_price_cents),
            line_total: item.line_total(),
        }
    }
}

/// Rendered details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDetailsView {
    pub id: String,
    pub order_number: String,
    pub supplier_name: String,
    pub status: PurchaseOrderStatus,
    pub order_date: NaiveDate,
    pub expected_delivery: NaiveDate,
    pub actual_delivery: Option<NaiveDate>,
    pub overdue: bool,
    pub items: Vec<PurchaseOrderLineView>,
    pub total_quantity: u32,
    pub total: Money,
    pub notes: Option<String>,
    pub actions: Vec<TransitionAction>,
    pub dialog: Option<PendingTransition>,
    pub notice: Option<String>,
}

/// Details panel for a single purchase order.
#[derive(Debug, Clone)]
pub struct PurchaseOrderDetails {
    order_id: String,
    dialog: StatusDialog,
}

impl PurchaseOrderDetails {
    pub fn new(order_id: &str) -> Self {
        PurchaseOrderDetails {
            order_id: order_id.to_string(),
            dialog: StatusDialog::new(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn render(
        &mut self,
        orders: &[PurchaseOrder],
        today: NaiveDate,
    ) -> UiResult<PurchaseOrderDetailsView> {
        self.dialog.refresh(orders);
        let order = find_order(orders, &self.order_id)?;
        Ok(PurchaseOrderDetailsView {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            supplier_name: order.supplier_name.clone(),
            status: order.status,
            order_date: order.order_date,
            expected_delivery: order.expected_delivery,
            actual_delivery: order.actual_delivery,
            overdue: order.is_overdue(today),
            items: order.items.iter().map(PurchaseOrderLineView::from).collect(),
            total_quantity: order.total_quantity(),
            total: order.total(),
            notes: order.notes.clone().filter(|n| !n.trim().is_empty()),
            actions: actions_for(order.status),
            dialog: self.dialog.pending().cloned(),
            notice: self.dialog.notice().map(str::to_string),
        })
    }

    pub fn request_transition(
        &mut self,
        transition: StatusTransition,
        orders: &[PurchaseOrder],
    ) -> UiResult<()> {
        let order = find_order(orders, &self.order_id)?;
        self.dialog.request(order, transition);
        Ok(())
    }

    pub fn confirm_transition(
        &mut self,
        orders: &[PurchaseOrder],
        events: &impl InventoryEvents,
    ) -> Option<PurchaseOrderStatus> {
        self.dialog.confirm(orders, events)
    }

    pub fn cancel_transition(&mut self) {
        self.dialog.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, Recorder};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn po(id: &str, number: &str, status: PurchaseOrderStatus, day: u32) -> PurchaseOrder {
        PurchaseOrder {
            id: id.to_string(),
            order_number: number.to_string(),
            supplier_id: "anna".to_string(),
            supplier_name: "Annapurna Foods".to_string(),
            items: vec![
                PurchaseOrderItem {
                    name: "Basmati Rice 5kg".to_string(),
                    sku: "RICE-5KG".to_string(),
                    unit_price_cents: 45000,
                    quantity: 20,
                },
                PurchaseOrderItem {
                    name: "Toor Dal 1kg".to_string(),
                    sku: "DAL-TOOR-1KG".to_string(),
                    unit_price_cents: 13000,
                    quantity: 50,
                },
            ],
            status,
            order_date: date(2024, 3, day),
            expected_delivery: date(2024, 3, day + 7),
            actual_delivery: None,
            notes: Some("Deliver to back door".to_string()),
            total_cents: None,
        }
    }

    fn orders() -> Vec<PurchaseOrder> {
        vec![
            po("p1", "PO-1040", PurchaseOrderStatus::Cancelled, 1),
            po("p2", "PO-1041", PurchaseOrderStatus::Delivered, 2),
            po("p3", "PO-1042", PurchaseOrderStatus::Pending, 3),
            po("p4", "PO-1043", PurchaseOrderStatus::Processing, 4),
        ]
    }

    #[test]
    fn test_only_pending_rows_have_actions() {
        let orders = orders();
        let mut table = PurchaseOrdersTable::new(10);
        let view = table.render(&orders, date(2024, 3, 5));

        let numbers: Vec<_> = view.page.items.iter().map(|r| r.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["PO-1043", "PO-1042", "PO-1041", "PO-1040"]);

        for row in &view.page.items {
            match row.status {
                PurchaseOrderStatus::Pending => {
                    let kinds: Vec<_> = row.actions.iter().map(|a| a.transition).collect();
                    assert_eq!(kinds, vec![StatusTransition::MarkDelivered, StatusTransition::Cancel]);
                }
                _ => assert!(row.actions.is_empty()),
            }
        }
        assert_eq!(view.page.items[1].total.cents(), 1_550_000);
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let orders = orders();
        let mut table = PurchaseOrdersTable::new(10);

        table.set_status_filter(Some(PurchaseOrderStatus::Delivered));
        let view = table.render(&orders, date(2024, 3, 5));
        assert_eq!(view.page.items.len(), 1);
        assert_eq!(view.page.items[0].id, "p2");

        table.set_status_filter(None);
        table.set_search("po-1040");
        assert_eq!(table.render(&orders, date(2024, 3, 5)).page.items[0].id, "p1");

        table.set_search("nobody");
        assert_eq!(
            table.render(&orders, date(2024, 3, 5)).empty_message.as_deref(),
            Some(NO_PURCHASE_ORDERS_MESSAGE)
        );
    }

    #[test]
    fn test_confirm_emits_update_status() {
        let orders = orders();
        let events = Recorder::default();
        let mut table = PurchaseOrdersTable::new(10);

        table
            .request_transition("p3", StatusTransition::MarkDelivered, &orders)
            .unwrap();
        let dialog = table.render(&orders, date(2024, 3, 5)).dialog.unwrap();
        assert_eq!(dialog.order_number, "PO-1042");

        assert_eq!(
            table.confirm_transition(&orders, &events),
            Some(PurchaseOrderStatus::Delivered)
        );
        assert_eq!(
            events.take(),
            vec![Event::UpdateStatus("p3".to_string(), PurchaseOrderStatus::Delivered)]
        );
        assert!(table.render(&orders, date(2024, 3, 5)).dialog.is_none());
        assert_eq!(table.confirm_transition(&orders, &events), None);
    }

    #[test]
    fn test_cancel_closes_without_emitting() {
        let orders = orders();
        let events = Recorder::default();
        let mut table = PurchaseOrdersTable::new(10);

        table
            .request_transition("p3", StatusTransition::Cancel, &orders)
            .unwrap();
        table.cancel_transition();
        assert_eq!(table.confirm_transition(&orders, &events), None);
        assert!(events.take().is_empty());
    }

    #[test]
    fn test_disallowed_transition_sets_notice() {
        let orders = orders();
        let events = Recorder::default();
        let mut table = PurchaseOrdersTable::new(10);

        table
            .request_transition("p2", StatusTransition::Cancel, &orders)
            .unwrap();
        let view = table.render(&orders, date(2024, 3, 5));
        assert!(view.dialog.is_none());
        assert!(view.notice.unwrap().contains("Delivered"));
        assert_eq!(table.confirm_transition(&orders, &events), None);
        assert!(events.take().is_empty());

        assert!(table
            .request_transition("missing", StatusTransition::Cancel, &orders)
            .is_err());
    }

    #[test]
    fn test_dialog_closes_when_order_moves_on() {
        let mut orders = orders();
        let events = Recorder::default();
        let mut table = PurchaseOrdersTable::new(10);

        table
            .request_transition("p3", StatusTransition::Cancel, &orders)
            .unwrap();
        assert!(table.render(&orders, date(2024, 3, 5)).dialog.is_some());

        // Delivered from another screen while the dialog was open.
        orders[2].status = PurchaseOrderStatus::Delivered;

        let view = table.render(&orders, date(2024, 3, 5));
        let row = view.page.items.iter().find(|r| r.id == "p3").unwrap();
        assert!(row.actions.is_empty());
        assert!(view.dialog.is_none());
        assert!(view.notice.unwrap().contains("PO-1042 is Delivered"));

        assert_eq!(table.confirm_transition(&orders, &events), None);
        assert!(events.take().is_empty());
    }

    #[test]
    fn test_confirm_rechecks_current_status() {
        let mut orders = orders();
        let events = Recorder::default();
        let mut details = PurchaseOrderDetails::new("p3");

        details
            .request_transition(StatusTransition::MarkDelivered, &orders)
            .unwrap();
        orders[2].status = PurchaseOrderStatus::Cancelled;

        // Confirm without a render in between.
        assert_eq!(details.confirm_transition(&orders, &events), None);
        assert!(events.take().is_empty());
        let view = details.render(&orders, date(2024, 3, 5)).unwrap();
        assert!(view.dialog.is_none());
        assert!(view.notice.unwrap().contains("Cancelled"));
    }

    #[test]
    fn test_confirm_after_order_removed() {
        let mut orders = orders();
        let events = Recorder::default();
        let mut table = PurchaseOrdersTable::new(10);

        table
            .request_transition("p3", StatusTransition::Cancel, &orders)
            .unwrap();
        orders.retain(|o| o.id != "p3");

        assert_eq!(table.confirm_transition(&orders, &events), None);
        assert!(events.take().is_empty());
        assert!(table
            .render(&orders, date(2024, 3, 5))
            .notice
            .unwrap()
            .contains("PO-1042 no longer exists"));
    }

    #[test]
    fn test_details_view() {
        let orders = orders();
        let events = Recorder::default();
        let mut details = PurchaseOrderDetails::new("p3");

        let view = details.render(&orders, date(2024, 3, 12)).unwrap();
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].line_total.cents(), 900_000);
        assert_eq!(view.total.cents(), 1_550_000);
        assert_eq!(view.total_quantity, 70);
        assert!(view.overdue);
        assert_eq!(view.actions.len(), 2);

        details
            .request_transition(StatusTransition::Cancel, &orders)
            .unwrap();
        assert_eq!(details.confirm_transition(&orders, &events), Some(PurchaseOrderStatus::Cancelled));
        assert_eq!(
            events.take(),
            vec![Event::UpdateStatus("p3".to_string(), PurchaseOrderStatus::Cancelled)]
        );

        let delivered = PurchaseOrderDetails::new("p2")
            .render(&orders, date(2024, 3, 12))
            .unwrap();
        assert!(delivered.actions.is_empty());
        assert!(!delivered.overdue);

        assert!(PurchaseOrderDetails::new("nope")
            .render(&orders, date(2024, 3, 12))
            .is_err());
    }
}
