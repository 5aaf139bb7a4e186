//! # Store State
//!
//! The parent container behind every screen. It owns the data, answers
//! snapshot reads for `render()`, and applies the mutations the handler
//! traits request.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreState                                       │
//! │                                                                         │
//! │   Arc<Mutex<Store>>                                                     │
//! │   ┌─────────────────────────────────────────────────────────────────┐   │
//! │   │ products   cart   customers   selected   orders                 │   │
//! │   │ suppliers  purchase_orders    checkout   notice                 │   │
//! │   └─────────────────────────────────────────────────────────────────┘   │
//! │        ▲                                          │                     │
//! │        │ CartEvents, CustomerEvents,              │ products(),         │
//! │        │ PaymentEvents, InventoryEvents           │ cart_lines(), ...   │
//! │        │                                          ▼                     │
//! │   view-model methods                        view-model render()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handler calls cannot return errors, so a rejected mutation is logged and
//! left in `notice` for the shell to show.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};
use shopfront_core::{
    Cart, CartLine, CoreError, Customer, Order, Product, PurchaseOrder, PurchaseOrderStatus,
    StatusTransition, Supplier,
};
use shopfront_ui::payment_form::CheckoutSummary;
use shopfront_ui::{
    CartEvents, CheckoutTotals, CustomerEvents, InventoryEvents, PaymentEvents, UiError,
};
use tracing::{debug, info, warn};

use crate::seed;

/// Everything the register holds in memory.
#[derive(Debug, Default)]
pub struct Store {
    pub products: Vec<Product>,
    pub cart: Cart,
    pub customers: Vec<Customer>,
    pub selected_customer: Option<String>,
    pub orders: Vec<Order>,
    pub suppliers: Vec<Supplier>,
    pub purchase_orders: Vec<PurchaseOrder>,
    /// Totals handed over by the cart's checkout button.
    pub checkout: Option<CheckoutTotals>,
    /// Last rejected action or payment failure.
    pub notice: Option<String>,
}

/// Shared handle to the [`Store`].
#[derive(Debug, Clone)]
pub struct StoreState {
    inner: Arc<Mutex<Store>>,
    /// Minor units per loyalty point (100 major units).
    minor_per_point: i64,
}

impl StoreState {
    pub fn new(store: Store, currency_decimals: u8) -> Self {
        StoreState {
            inner: Arc::new(Mutex::new(store)),
            minor_per_point: 10_i64
                .saturating_pow(u32::from(currency_decimals))
                .saturating_mul(100),
        }
    }

    /// Store filled with the sample catalog.
    pub fn seeded(today: NaiveDate, currency_decimals: u8) -> Self {
        let store = Store {
            products: seed::products(),
            customers: seed::customers(),
            suppliers: seed::suppliers(),
            purchase_orders: seed::purchase_orders(today),
            ..Store::default()
        };
        Self::new(store, currency_decimals)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        f(&self.lock())
    }

    /// Runs `f` with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        f(&mut self.lock())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.lock().cart.lines().to_vec()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.lock().customers.clone()
    }

    pub fn selected_customer(&self) -> Option<Customer> {
        let store = self.lock();
        let id = store.selected_customer.as_deref()?;
        store.customers.iter().find(|c| c.id == id).cloned()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    pub fn suppliers(&self) -> Vec<Supplier> {
        self.lock().suppliers.clone()
    }

    pub fn purchase_orders(&self) -> Vec<PurchaseOrder> {
        self.lock().purchase_orders.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    /// What the payment form should charge, once checkout was pressed.
    pub fn checkout_summary(&self) -> Option<CheckoutSummary> {
        let store = self.lock();
        let totals = store.checkout.as_ref()?;
        Some(CheckoutSummary::from_lines(
            store.cart.lines(),
            totals.totals(),
            store.selected_customer.clone(),
        ))
    }

    fn reject(store: &mut Store, message: String) {
        warn!(%message, "action rejected");
        store.notice = Some(message);
    }
}

// =============================================================================
// Handlers
// =============================================================================

impl CartEvents for StoreState {
    fn add_to_cart(&self, product: &Product) {
        let mut store = self.lock();
        // Current stock, not whatever the view rendered from.
        let Some(current) = store.products.iter().find(|p| p.id == product.id).cloned() else {
            let missing = CoreError::ProductNotFound(product.id.clone());
            return Self::reject(&mut store, missing.to_string());
        };
        match store.cart.add_product(&current) {
            Ok(quantity) => {
                debug!(product_id = %current.id, quantity, "added to cart");
                store.checkout = None;
                store.notice = None;
            }
            Err(err) => Self::reject(&mut store, err.to_string()),
        }
    }

    fn update_quantity(&self, product_id: &str, quantity: u32) {
        let mut store = self.lock();
        let Some(current) = store.products.iter().find(|p| p.id == product_id).cloned() else {
            let missing = CoreError::ProductNotFound(product_id.to_string());
            return Self::reject(&mut store, missing.to_string());
        };
        match store.cart.set_quantity(&current, quantity) {
            Ok(()) => {
                debug!(product_id, quantity, "cart quantity set");
                store.checkout = None;
            }
            Err(err) => Self::reject(&mut store, err.to_string()),
        }
    }

    fn remove_item(&self, product_id: &str) {
        let mut store = self.lock();
        match store.cart.remove(product_id) {
            Ok(line) => {
                debug!(product_id, name = %line.name, "removed from cart");
                store.checkout = None;
            }
            Err(err) => Self::reject(&mut store, err.to_string()),
        }
    }

    fn checkout(&self, totals: CheckoutTotals) {
        info!(total = totals.total.cents(), items = totals.item_count, "checkout opened");
        self.lock().checkout = Some(totals);
    }
}

impl CustomerEvents for StoreState {
    fn select_customer(&self, customer: Option<&Customer>) {
        let mut store = self.lock();
        store.selected_customer = customer.map(|c| c.id.clone());
        debug!(customer_id = ?store.selected_customer, "customer selection changed");
    }

    fn create_customer(&self, customer: Customer) {
        info!(customer_id = %customer.id, "customer added");
        self.lock().customers.push(customer);
    }
}

impl PaymentEvents for StoreState {
    fn payment_success(&self, order: Order) {
        let mut store = self.lock();
        let Store {
            products,
            cart,
            customers,
            ..
        } = &mut *store;

        for line in cart.lines() {
            if let Some(product) = products.iter_mut().find(|p| p.id == line.product_id) {
                product.stock = product.stock.saturating_sub(line.quantity);
            }
        }

        if let Some(customer_id) = &order.customer_id {
            if let Some(customer) = customers.iter_mut().find(|c| &c.id == customer_id) {
                let points = u32::try_from(order.total_cents / self.minor_per_point).unwrap_or(0);
                customer.loyalty_points = customer.loyalty_points.saturating_add(points);
                debug!(customer_id = %customer.id, points, "loyalty points awarded");
            }
        }

        info!(order_id = %order.id, total = order.total_cents, "order recorded");
        store.cart.clear();
        store.checkout = None;
        store.selected_customer = None;
        store.notice = None;
        store.orders.push(order);
    }

    fn payment_error(&self, error: UiError) {
        warn!(error = %error, "payment failed");
        self.lock().notice = Some(error.message);
    }
}

impl InventoryEvents for StoreState {
    fn update_status(&self, order_id: &str, status: PurchaseOrderStatus) {
        let mut store = self.lock();
        let transition = match status {
            PurchaseOrderStatus::Delivered => StatusTransition::MarkDelivered,
            PurchaseOrderStatus::Cancelled => StatusTransition::Cancel,
            other => {
                return Self::reject(&mut store, format!("Cannot set status to {}", other));
            }
        };

        let today = Utc::now().date_naive();
        let Some(index) = store.purchase_orders.iter().position(|po| po.id == order_id) else {
            return Self::reject(&mut store, format!("Purchase order not found: {}", order_id));
        };
        match store.purchase_orders[index].apply_transition(transition, today) {
            Ok(()) => info!(order_id, %status, "purchase order updated"),
            Err(err) => Self::reject(&mut store, err.to_string()),
        }
    }

    fn save_supplier(&self, supplier: Supplier) {
        let mut store = self.lock();
        match store.suppliers.iter_mut().find(|s| s.id == supplier.id) {
            Some(existing) => {
                info!(supplier_id = %supplier.id, "supplier updated");
                *existing = supplier;
            }
            None => {
                info!(supplier_id = %supplier.id, "supplier added");
                store.suppliers.push(supplier);
            }
        }
    }

    fn delete_supplier(&self, supplier_id: &str) {
        let mut store = self.lock();
        let before = store.suppliers.len();
        store.suppliers.retain(|s| s.id != supplier_id);
        if store.suppliers.len() == before {
            Self::reject(&mut store, format!("Supplier not found: {}", supplier_id));
        } else {
            info!(supplier_id, "supplier removed");
        }
    }
}
