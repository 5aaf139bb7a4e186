//! # Payment Form
//!
//! Collects buyer contact details and hands the charge to an external
//! checkout widget.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         submit()                                        │
//! │                                                                         │
//! │  Idle / Failed ──► validate contact ──✗──► inline field errors          │
//! │                         │ ✓                                             │
//! │                         ▼                                               │
//! │                    Processing  (submit disabled)                        │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  sleep(payment delay)                                   │
//! │                         │                                               │
//! │                         ▼                                               │
//! │             PaymentWidget::open(PaymentRequest)                         │
//! │                 │                       │                               │
//! │              success                 failure                            │
//! │                 │                       │                               │
//! │                 ▼                       ▼                               │
//! │   Order + PaymentReceipt         Failed(message)                        │
//! │   Succeeded                      submit re-enabled                      │
//! │   payment_success(order)         payment_error(err)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The widget is opaque: the form never sees card data, only the ids the
//! widget hands back.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shopfront_core::drafts::BuyerContact;
use shopfront_core::{CartLine, FieldErrors, Money, Order, OrderItem, PaymentReceipt, Totals};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ShopConfig;
use crate::error::{UiError, UiResult};
use crate::events::PaymentEvents;

// =============================================================================
// Widget Seam
// =============================================================================

/// What the form asks the widget to charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in minor units.
    pub amount_minor: i64,
    /// ISO 4217 code.
    pub currency: String,
    pub merchant: String,
    pub description: String,
    pub prefill: BuyerContact,
}

/// Ids the widget returns after a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSuccess {
    pub transaction_id: String,
    pub provider_order_id: String,
}

/// Why the widget did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// Buyer closed the widget.
    #[error("Payment was cancelled")]
    Dismissed,

    /// Provider declined the charge.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// Widget could not be loaded.
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Third-party checkout widget.
pub trait PaymentWidget {
    async fn open(&self, request: PaymentRequest) -> Result<WidgetSuccess, WidgetError>;
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// What is being paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub items: Vec<OrderItem>,
    pub totals: Totals,
    pub customer_id: Option<String>,
}

impl CheckoutSummary {
    pub fn from_lines(lines: &[CartLine], totals: Totals, customer_id: Option<String>) -> Self {
        CheckoutSummary {
            items: lines.iter().map(CartLine::to_order_item).collect(),
            totals,
            customer_id,
        }
    }

    pub fn is_payable(&self) -> bool {
        !self.items.is_empty() && self.totals.total.is_positive()
    }
}

// =============================================================================
// Form State
// =============================================================================

/// Where the form is in the flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    /// Carries the new order id.
    Succeeded(String),
    /// Carries the banner message.
    Failed(String),
}

/// Rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFormView {
    pub contact: BuyerContact,
    pub amount: Money,
    pub status: PaymentStatus,
    pub submit_enabled: bool,
    pub field_errors: FieldErrors,
    /// Single error banner, shown after a failed payment.
    pub error_banner: Option<String>,
}

/// Settings the form takes from [`ShopConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOptions {
    pub currency: String,
    pub merchant: String,
    pub description: String,
    pub delay: Duration,
}

impl PaymentOptions {
    pub fn from_config(config: &ShopConfig) -> Self {
        PaymentOptions {
            currency: config.currency.code.clone(),
            merchant: config.merchant_name().to_string(),
            description: config.payment_description(),
            delay: config.payment_delay(),
        }
    }
}

/// Payment form state.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    options: PaymentOptions,
    contact: BuyerContact,
    errors: FieldErrors,
    status: PaymentStatus,
}

impl PaymentForm {
    pub fn new(options: PaymentOptions) -> Self {
        PaymentForm {
            options,
            contact: BuyerContact::default(),
            errors: FieldErrors::new(),
            status: PaymentStatus::Idle,
        }
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    pub fn contact(&self) -> &BuyerContact {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut BuyerContact {
        &mut self.contact
    }

    /// Prefills from the selected customer; blank fields stay blank.
    pub fn prefill(&mut self, contact: BuyerContact) {
        self.contact = contact;
        self.errors.clear();
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn can_submit(&self, summary: &CheckoutSummary) -> bool {
        self.status != PaymentStatus::Processing && summary.is_payable()
    }

    pub fn render(&self, summary: &CheckoutSummary) -> PaymentFormView {
        let error_banner = match &self.status {
            PaymentStatus::Failed(message) => Some(message.clone()),
            _ => None,
        };
        PaymentFormView {
            contact: self.contact.clone(),
            amount: summary.totals.total,
            status: self.status.clone(),
            submit_enabled: self.can_submit(summary),
            field_errors: self.errors.clone(),
            error_banner,
        }
    }

    /// Back to a blank form for the next sale.
    pub fn reset(&mut self) {
        self.contact = BuyerContact::default();
        self.errors.clear();
        self.status = PaymentStatus::Idle;
    }

    /// Runs the payment.
    ///
    /// Validation failures only set inline messages. Widget failures set the
    /// error banner and emit `payment_error`; the form can be submitted again.
    pub async fn submit<W, E>(
        &mut self,
        summary: &CheckoutSummary,
        widget: &W,
        events: &E,
    ) -> UiResult<Order>
    where
        W: PaymentWidget,
        E: PaymentEvents,
    {
        if self.status == PaymentStatus::Processing {
            return Err(UiError::business("Payment already in progress"));
        }
        if !summary.is_payable() {
            return Err(UiError::cart("Nothing to pay"));
        }

        let contact = match self.contact.validate() {
            Ok(contact) => contact,
            Err(errors) => {
                warn!(fields = errors.len(), "payment form validation failed");
                let err = UiError::from_field_errors(&errors);
                self.errors = errors;
                return Err(err);
            }
        };
        self.errors.clear();
        self.status = PaymentStatus::Processing;
        debug!(amount = summary.totals.total.cents(), "payment processing");

        if !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }

        let request = PaymentRequest {
            amount_minor: summary.totals.total.cents(),
            currency: self.options.currency.clone(),
            merchant: self.options.merchant.clone(),
            description: self.options.description.clone(),
            prefill: contact,
        };

        match widget.open(request.clone()).await {
            Ok(success) => {
                let order = build_order(summary, &request, success);
                info!(
                    order_id = %order.id,
                    total = order.total_cents,
                    "payment succeeded"
                );
                self.status = PaymentStatus::Succeeded(order.id.clone());
                events.payment_success(order.clone());
                Ok(order)
            }
            Err(widget_err) => {
                warn!(error = %widget_err, "payment failed");
                let err = UiError::from(widget_err);
                self.status = PaymentStatus::Failed(err.message.clone());
                events.payment_error(err.clone());
                Err(err)
            }
        }
    }
}

fn build_order(summary: &CheckoutSummary, request: &PaymentRequest, success: WidgetSuccess) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4().to_string(),
        items: summary.items.clone(),
        subtotal_cents: summary.totals.subtotal.cents(),
        tax_cents: summary.totals.tax.cents(),
        discount_cents: summary.totals.discount.cents(),
        total_cents: summary.totals.total.cents(),
        created_at: now,
        customer_id: summary.customer_id.clone(),
        payment: Some(PaymentReceipt {
            transaction_id: success.transaction_id,
            provider_order_id: success.provider_order_id,
            amount_minor: request.amount_minor,
            currency: request.currency.clone(),
            paid_at: now,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{product, Event, Recorder, ScriptedWidget};
    use shopfront_core::{compute_totals, TaxRate};

    fn options() -> PaymentOptions {
        PaymentOptions {
            currency: "INR".to_string(),
            merchant: "Corner Mart".to_string(),
            description: "Purchase at Corner Mart".to_string(),
            delay: Duration::ZERO,
        }
    }

    fn summary() -> CheckoutSummary {
        let oil = product("oil", "Mustard Oil 1L", "OIL-MUST-1", 10000, 5, "Oils");
        let lines = vec![CartLine::from_product(&oil, 1)];
        let totals = compute_totals(&lines, TaxRate::from_bps(1800), Money::zero());
        CheckoutSummary::from_lines(&lines, totals, Some("cust-1".to_string()))
    }

    fn filled_form() -> PaymentForm {
        let mut form = PaymentForm::new(options());
        *form.contact_mut() = BuyerContact {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
        };
        form
    }

    fn paid() -> Result<WidgetSuccess, WidgetError> {
        Ok(WidgetSuccess {
            transaction_id: "pay_001".to_string(),
            provider_order_id: "order_001".to_string(),
        })
    }

    #[tokio::test]
    async fn test_successful_payment_builds_order() {
        let mut form = filled_form();
        let widget = ScriptedWidget::default().then(paid());
        let events = Recorder::default();

        let order = form.submit(&summary(), &widget, &events).await.unwrap();

        assert_eq!(order.total_cents, 11800);
        assert_eq!(order.customer_id.as_deref(), Some("cust-1"));
        let receipt = order.payment.clone().unwrap();
        assert_eq!(receipt.transaction_id, "pay_001");
        assert_eq!(receipt.amount_minor, 11800);
        assert_eq!(form.status(), &PaymentStatus::Succeeded(order.id.clone()));

        let requests = widget.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount_minor, 11800);
        assert_eq!(requests[0].currency, "INR");
        assert_eq!(requests[0].prefill.phone, "9876543210");

        assert_eq!(events.take(), vec![Event::PaymentSuccess(order)]);
    }

    #[tokio::test]
    async fn test_invalid_contact_blocks_widget() {
        let mut form = PaymentForm::new(options());
        form.contact_mut().name = "Asha".to_string();
        let widget = ScriptedWidget::default().then(paid());
        let events = Recorder::default();

        let err = form.submit(&summary(), &widget, &events).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(form.field_errors().contains("email"));
        assert!(form.field_errors().contains("phone"));
        assert_eq!(form.status(), &PaymentStatus::Idle);
        assert!(widget.requests().is_empty());
        assert!(events.take().is_empty());
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let mut form = filled_form();
        let widget = ScriptedWidget::default()
            .then(Err(WidgetError::Declined("insufficient funds".to_string())))
            .then(paid());
        let events = Recorder::default();
        let summary = summary();

        let err = form.submit(&summary, &widget, &events).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);

        let view = form.render(&summary);
        assert!(view.submit_enabled);
        assert_eq!(
            view.error_banner.as_deref(),
            Some("Payment declined: insufficient funds")
        );
        assert_eq!(events.take(), vec![Event::PaymentError(err)]);

        let order = form.submit(&summary, &widget, &events).await.unwrap();
        assert!(order.payment.is_some());
        assert_eq!(form.render(&summary).error_banner, None);
        assert_eq!(events.take(), vec![Event::PaymentSuccess(order)]);
    }

    #[tokio::test]
    async fn test_empty_summary_is_not_payable() {
        let mut form = filled_form();
        let widget = ScriptedWidget::default().then(paid());
        let events = Recorder::default();
        let empty = CheckoutSummary::from_lines(&[], Totals::default(), None);

        assert!(!form.can_submit(&empty));
        let err = form.submit(&empty, &widget, &events).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(widget.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_before_widget_opens() {
        let mut opts = options();
        opts.delay = Duration::from_millis(1500);
        let mut form = PaymentForm::new(opts);
        *form.contact_mut() = filled_form().contact().clone();

        let widget = ScriptedWidget::default().then(paid());
        let events = Recorder::default();

        let started = tokio::time::Instant::now();
        form.submit(&summary(), &widget, &events).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn test_options_from_config() {
        let config = ShopConfig::default();
        let options = PaymentOptions::from_config(&config);
        assert_eq!(options.currency, "INR");
        assert_eq!(options.merchant, "Shopfront Demo Store");
        assert_eq!(options.description, "Purchase at Shopfront Demo Store");
        assert_eq!(options.delay, Duration::from_millis(1500));
    }
}
