//! Test doubles shared by the view-model tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use shopfront_core::{Customer, Order, Product, PurchaseOrderStatus, Supplier};

use crate::error::UiError;
use crate::events::{CartEvents, CheckoutTotals, CustomerEvents, InventoryEvents, PaymentEvents};
use crate::payment_form::{PaymentRequest, PaymentWidget, WidgetError, WidgetSuccess};

pub fn product(
    id: &str,
    name: &str,
    sku: &str,
    price_cents: i64,
    stock: u32,
    category: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        price_cents,
        stock,
        category: category.to_string(),
    }
}

/// Everything a view-model can tell its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AddToCart(String),
    UpdateQuantity(String, u32),
    RemoveItem(String),
    Checkout(CheckoutTotals),
    SelectCustomer(Option<String>),
    CreateCustomer(Customer),
    PaymentSuccess(Order),
    PaymentError(UiError),
    UpdateStatus(String, PurchaseOrderStatus),
    SaveSupplier(Supplier),
    DeleteSupplier(String),
}

/// Records every handler call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    /// Drains what has been recorded so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl CartEvents for Recorder {
    fn add_to_cart(&self, product: &Product) {
        self.push(Event::AddToCart(product.id.clone()));
    }

    fn update_quantity(&self, product_id: &str, quantity: u32) {
        self.push(Event::UpdateQuantity(product_id.to_string(), quantity));
    }

    fn remove_item(&self, product_id: &str) {
        self.push(Event::RemoveItem(product_id.to_string()));
    }

    fn checkout(&self, totals: CheckoutTotals) {
        self.push(Event::Checkout(totals));
    }
}

impl CustomerEvents for Recorder {
    fn select_customer(&self, customer: Option<&Customer>) {
        self.push(Event::SelectCustomer(customer.map(|c| c.id.clone())));
    }

    fn create_customer(&self, customer: Customer) {
        self.push(Event::CreateCustomer(customer));
    }
}

impl PaymentEvents for Recorder {
    fn payment_success(&self, order: Order) {
        self.push(Event::PaymentSuccess(order));
    }

    fn payment_error(&self, error: UiError) {
        self.push(Event::PaymentError(error));
    }
}

impl InventoryEvents for Recorder {
    fn update_status(&self, order_id: &str, status: PurchaseOrderStatus) {
        self.push(Event::UpdateStatus(order_id.to_string(), status));
    }

    fn save_supplier(&self, supplier: Supplier) {
        self.push(Event::SaveSupplier(supplier));
    }

    fn delete_supplier(&self, supplier_id: &str) {
        self.push(Event::DeleteSupplier(supplier_id.to_string()));
    }
}

/// Payment widget that replays queued outcomes and remembers each request.
#[derive(Debug, Default)]
pub struct ScriptedWidget {
    outcomes: Mutex<VecDeque<Result<WidgetSuccess, WidgetError>>>,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl ScriptedWidget {
    pub fn then(self, outcome: Result<WidgetSuccess, WidgetError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PaymentWidget for ScriptedWidget {
    async fn open(&self, request: PaymentRequest) -> Result<WidgetSuccess, WidgetError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(WidgetError::Dismissed))
    }
}
