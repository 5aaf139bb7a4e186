//! # Register Session
//!
//! Drives every screen through one sale and a round of back-office work,
//! exactly as a shell would: render from a snapshot, act on the view,
//! let the handler traits mutate [`StoreState`], render again.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. grid search "rice" ──► add first card                               │
//! │  2. quick search scans OIL-MUST-1                                       │
//! │  3. cart: +1 oil, discount code WELCOME10                               │
//! │  4. customer picker: "meera" ──► select                                 │
//! │  5. checkout ──► payment form (prefilled) ──► widget, retry on decline  │
//! │  6. order success dialog + receipt                                      │
//! │  7. order history                                                       │
//! │  8. admin gate ──► suppliers table, PO table: deliver the overdue PO    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use shopfront_core::drafts::BuyerContact;
use shopfront_core::{Order, PurchaseOrderStatus, StatusTransition, UserRole};
use shopfront_ui::order_history::OrderHistoryView;
use shopfront_ui::{
    Access, AccessGate, CartView, CustomerSelect, ErrorCode, OrderHistory, OrderSuccessDialog,
    PaymentForm, PaymentOptions, PaymentWidget, ProductGrid, ProductSearch, PurchaseOrdersTable,
    ShopConfig, SuppliersTable,
};
use tracing::{debug, info, warn};

use crate::error::{RegisterError, RegisterResult};
use crate::seed;
use crate::state::StoreState;

/// Payment attempts before the session gives up.
const MAX_PAYMENT_ATTEMPTS: usize = 3;

/// What the session did.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub order: Order,
    pub receipt: String,
    pub payment_attempts: usize,
    pub history: OrderHistoryView,
    pub back_office: Access,
    /// Purchase order marked delivered, if the role was allowed in.
    pub delivered_po: Option<String>,
}

/// All the view-models of one register.
pub struct RegisterSession {
    config: ShopConfig,
    grid: ProductGrid,
    search: ProductSearch,
    cart: CartView,
    customers: CustomerSelect,
    payment: PaymentForm,
    success: OrderSuccessDialog,
    history: OrderHistory,
    suppliers: SuppliersTable,
    purchase_orders: PurchaseOrdersTable,
    gate: AccessGate,
}

impl RegisterSession {
    pub fn new(config: ShopConfig) -> Self {
        let page_size = config.ui.page_size;
        RegisterSession {
            grid: ProductGrid::new(page_size),
            search: ProductSearch::new(config.ui.quick_search_limit),
            cart: CartView::new(config.tax_rate(), seed::discounts()),
            customers: CustomerSelect::new(),
            payment: PaymentForm::new(PaymentOptions::from_config(&config)),
            success: OrderSuccessDialog::new(),
            history: OrderHistory::new(page_size),
            suppliers: SuppliersTable::new(page_size),
            purchase_orders: PurchaseOrdersTable::new(page_size),
            gate: AccessGate::admin_only(),
            config,
        }
    }

    /// Runs the scripted sale and back-office round as `role`.
    pub async fn run<W: PaymentWidget>(
        &mut self,
        state: &StoreState,
        widget: &W,
        role: UserRole,
        today: NaiveDate,
    ) -> RegisterResult<SessionReport> {
        self.build_cart(state)?;
        self.choose_customer(state)?;
        let (order, payment_attempts) = self.take_payment(state, widget).await?;

        self.success.open(order.clone());
        let receipt = self
            .success
            .receipt_text(&self.config)
            .ok_or_else(|| RegisterError::Session("order dialog did not open".to_string()))?;
        self.cart.reset();
        self.payment.reset();

        let history = self.history.render(&state.orders());
        debug!(orders = history.page.total_items, "order history rendered");

        let back_office = self.gate.check(role);
        let delivered_po = if back_office.is_granted() {
            self.back_office(state, today)?
        } else {
            None
        };

        Ok(SessionReport {
            order,
            receipt,
            payment_attempts,
            history,
            back_office,
            delivered_po,
        })
    }

    fn build_cart(&mut self, state: &StoreState) -> RegisterResult<()> {
        let products = state.products();

        self.grid.set_search("rice");
        let grid = self.grid.render(&products, &state.cart_lines());
        let card = grid
            .page
            .items
            .iter()
            .find(|card| card.can_add)
            .ok_or_else(|| RegisterError::Session("no rice in stock".to_string()))?;
        self.grid.add_to_cart(&card.id, &products, state)?;

        self.search.set_query("OIL-MUST-1");
        if !self.search.submit(&products, state)? {
            return Err(RegisterError::Session("scanned SKU not found".to_string()));
        }

        let lines = state.cart_lines();
        self.cart
            .increment("p-oil-mustard", &lines, &products, state)?;
        self.cart.apply_discount_code("WELCOME10")?;

        let snapshot = self.cart.render(&state.cart_lines(), &products);
        info!(
            lines = snapshot.item_count,
            units = snapshot.total_quantity,
            total = %self.config.format_money(snapshot.totals.total),
            "cart ready"
        );
        Ok(())
    }

    fn choose_customer(&mut self, state: &StoreState) -> RegisterResult<()> {
        let customers = state.customers();
        self.customers.set_search("meera");
        let id = self
            .customers
            .results(&customers)
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| RegisterError::Session("customer not found".to_string()))?;
        self.customers.select(&id, &customers, state)?;
        Ok(())
    }

    async fn take_payment<W: PaymentWidget>(
        &mut self,
        state: &StoreState,
        widget: &W,
    ) -> RegisterResult<(Order, usize)> {
        self.cart
            .checkout(&state.cart_lines(), &state.products(), state)?;
        let summary = state
            .checkout_summary()
            .ok_or_else(|| RegisterError::Session("checkout did not open".to_string()))?;

        if let Some(customer) = state.selected_customer() {
            self.payment.prefill(BuyerContact::from_customer(&customer));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.payment.submit(&summary, widget, state).await {
                Ok(order) => return Ok((order, attempt)),
                Err(err) if err.code == ErrorCode::PaymentError && attempt < MAX_PAYMENT_ATTEMPTS => {
                    warn!(attempt, error = %err, "payment failed, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn back_office(&mut self, state: &StoreState, today: NaiveDate) -> RegisterResult<Option<String>> {
        let suppliers = self.suppliers.render(&state.suppliers());
        debug!(suppliers = suppliers.page.total_items, "suppliers rendered");

        let orders = state.purchase_orders();
        let table = self.purchase_orders.render(&orders, today);
        let Some(row) = table.page.items.iter().find(|row| {
            row.overdue
                && row
                    .actions
                    .iter()
                    .any(|a| a.transition == StatusTransition::MarkDelivered)
        }) else {
            return Ok(None);
        };

        self.purchase_orders
            .request_transition(&row.id, StatusTransition::MarkDelivered, &orders)?;
        match self.purchase_orders.confirm_transition(&orders, state) {
            Some(PurchaseOrderStatus::Delivered) => Ok(Some(row.order_number.clone())),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::SimulatedWidget;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn config() -> ShopConfig {
        let mut config = ShopConfig::default();
        config.payment.delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_full_session_as_admin() {
        let state = StoreState::seeded(today(), 2);
        let widget = SimulatedWidget::declining(1);
        let mut session = RegisterSession::new(config());

        let report = session
            .run(&state, &widget, UserRole::Admin, today())
            .await
            .unwrap();

        assert_eq!(report.payment_attempts, 2);
        // Basmati 549.00 + 2 × Mustard Oil 189.00 = 927.00; +18% = 1093.86;
        // WELCOME10 takes 109.39.
        assert_eq!(report.order.subtotal_cents, 92700);
        assert_eq!(report.order.tax_cents, 16686);
        assert_eq!(report.order.discount_cents, 10939);
        assert_eq!(report.order.total_cents, 98447);
        assert_eq!(report.order.customer_id.as_deref(), Some("c-meera"));
        assert!(report.receipt.contains("Discount"));
        assert_eq!(report.history.page.items.len(), 1);
        assert_eq!(report.delivered_po.as_deref(), Some("PO-1042"));

        assert!(state.cart_lines().is_empty());
        let rice = state
            .products()
            .into_iter()
            .find(|p| p.id == "p-rice-5")
            .unwrap();
        assert_eq!(rice.stock, 11);
        let meera = state
            .customers()
            .into_iter()
            .find(|c| c.id == "c-meera")
            .unwrap();
        assert_eq!(meera.loyalty_points, 129);
    }

    #[tokio::test]
    async fn test_cashier_is_kept_out_of_back_office() {
        let state = StoreState::seeded(today(), 2);
        let widget = SimulatedWidget::new();
        let mut session = RegisterSession::new(config());

        let report = session
            .run(&state, &widget, UserRole::Cashier, today())
            .await
            .unwrap();

        assert_eq!(report.payment_attempts, 1);
        assert!(matches!(report.back_office, Access::Denied(_)));
        assert!(report.delivered_po.is_none());
        let po = state
            .purchase_orders()
            .into_iter()
            .find(|po| po.id == "po-1042")
            .unwrap();
        assert_eq!(po.status, PurchaseOrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_gives_up_after_repeated_declines() {
        let state = StoreState::seeded(today(), 2);
        let widget = SimulatedWidget::declining(MAX_PAYMENT_ATTEMPTS);
        let mut session = RegisterSession::new(config());

        let err = session
            .run(&state, &widget, UserRole::Admin, today())
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::Ui(ref e) if e.code == ErrorCode::PaymentError));
        assert_eq!(widget.opened(), MAX_PAYMENT_ATTEMPTS);
        assert!(state.orders().is_empty());
        assert!(state.notice().is_some());
    }
}
