//! Stand-in for the hosted checkout widget.
//!
//! Approves every charge with freshly generated provider ids, except for a
//! configurable number of leading attempts that are declined so the retry
//! path can be exercised.

use std::sync::atomic::{AtomicUsize, Ordering};

use shopfront_ui::{PaymentRequest, PaymentWidget, WidgetError, WidgetSuccess};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SimulatedWidget {
    declines_left: AtomicUsize,
    opened: AtomicUsize,
}

impl SimulatedWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declines the first `count` charges.
    pub fn declining(count: usize) -> Self {
        SimulatedWidget {
            declines_left: AtomicUsize::new(count),
            opened: AtomicUsize::new(0),
        }
    }

    /// How many times the widget was opened.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

fn provider_id(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &id[..14])
}

impl PaymentWidget for SimulatedWidget {
    async fn open(&self, request: PaymentRequest) -> Result<WidgetSuccess, WidgetError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        debug!(
            amount = request.amount_minor,
            currency = %request.currency,
            buyer = %request.prefill.name,
            "payment widget opened"
        );

        let declined = self
            .declines_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if declined {
            return Err(WidgetError::Declined("card was declined by the issuer".to_string()));
        }

        Ok(WidgetSuccess {
            transaction_id: provider_id("pay"),
            provider_order_id: provider_id("order"),
        })
    }
}
