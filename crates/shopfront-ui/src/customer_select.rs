//! # Customer Select
//!
//! Search, pick, clear, or create the customer attached to the sale.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Customer: [ meera             ] [×]          │
//! │ ┌──────────────────────────────────────────┐ │
//! │ │ Meera Iyer    9123456780   120 pts       │ │
//! │ │ Meera Nair    9988776655     0 pts       │ │
//! │ ├──────────────────────────────────────────┤ │
//! │ │ + New customer                           │ │
//! │ └──────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use shopfront_core::catalog::matches_term;
use shopfront_core::drafts::CustomerDraft;
use shopfront_core::{Customer, FieldErrors};
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};
use crate::events::CustomerEvents;

/// Maximum rows in the dropdown.
const MAX_RESULTS: usize = 10;

/// Rendered picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSelectView {
    pub search: String,
    pub selected: Option<Customer>,
    pub results: Vec<Customer>,
    pub dropdown_open: bool,
    /// The new-customer form, while open.
    pub create_form: Option<CustomerDraft>,
    pub field_errors: FieldErrors,
}

/// Customer picker state.
#[derive(Debug, Clone, Default)]
pub struct CustomerSelect {
    search: String,
    open: bool,
    draft: Option<CustomerDraft>,
    errors: FieldErrors,
}

impl CustomerSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Customers matching the search by name, phone, or email.
    pub fn results<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers
            .iter()
            .filter(|c| {
                matches_term(
                    &self.search,
                    [
                        c.name.as_str(),
                        c.phone.as_str(),
                        c.email.as_deref().unwrap_or_default(),
                    ],
                )
            })
            .take(MAX_RESULTS)
            .collect()
    }

    pub fn render(&self, selected: Option<&Customer>, customers: &[Customer]) -> CustomerSelectView {
        CustomerSelectView {
            search: self.search.clone(),
            selected: selected.cloned(),
            results: self.results(customers).into_iter().cloned().collect(),
            dropdown_open: self.open,
            create_form: self.draft.clone(),
            field_errors: self.errors.clone(),
        }
    }

    pub fn select(
        &mut self,
        customer_id: &str,
        customers: &[Customer],
        events: &impl CustomerEvents,
    ) -> UiResult<()> {
        let customer = customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| UiError::not_found("Customer", customer_id))?;
        debug!(customer_id, "customer selected");
        events.select_customer(Some(customer));
        self.search.clear();
        self.open = false;
        Ok(())
    }

    /// The "×" button.
    pub fn clear(&mut self, events: &impl CustomerEvents) {
        debug!("customer selection cleared");
        events.select_customer(None);
        self.search.clear();
        self.open = false;
    }

    // =========================================================================
    // New Customer
    // =========================================================================

    /// Opens the new-customer form, seeding the name from the search box.
    pub fn start_create(&mut self) {
        let name = self.search.trim().to_string();
        self.draft = Some(CustomerDraft {
            name,
            ..Default::default()
        });
        self.errors.clear();
        self.open = false;
    }

    pub fn draft_mut(&mut self) -> Option<&mut CustomerDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_create(&mut self) {
        self.draft = None;
        self.errors.clear();
    }

    /// Saves the new customer and selects it.
    ///
    /// On validation failure the form stays open with inline messages and
    /// nothing is emitted.
    pub fn submit_create(&mut self, events: &impl CustomerEvents) -> UiResult<Customer> {
        let Some(draft) = &self.draft else {
            return Err(UiError::business("New customer form is not open"));
        };

        match draft.validate() {
            Ok(customer) => {
                info!(customer_id = %customer.id, "customer created");
                events.create_customer(customer.clone());
                events.select_customer(Some(&customer));
                self.draft = None;
                self.errors.clear();
                self.search.clear();
                Ok(customer)
            }
            Err(errors) => {
                warn!(fields = errors.len(), "customer form validation failed");
                let err = UiError::from_field_errors(&errors);
                self.errors = errors;
                Err(err)
            }
        }
    }
}
