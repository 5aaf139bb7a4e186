//! # Suppliers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search suppliers...           ]                  [ + Add supplier ]  │
//! │                                                                         │
//! │  Name            Contact       Email              Categories            │
//! │  ─────────────── ───────────── ────────────────── ───────────────────   │
//! │  Annapurna Foods Ravi Kumar    ravi@annapurna.in  Grains, Pulses  ✎ 🗑  │
//! │  Ganga Oils      Sita Rao      sita@gangaoils.in  Oils            ✎ 🗑  │
//! │                                                                         │
//! │                      ◄ Prev   Page 1 of 1   Next ►                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!   🗑 ──► "Delete Ganga Oils?" ──► Confirm ──► delete_supplier(id)
//!                               └─► Cancel  ──► (nothing)
//! ```

use serde::{Deserialize, Serialize};
use shopfront_core::catalog::{self, matches_term, Page};
use shopfront_core::drafts::SupplierDraft;
use shopfront_core::{FieldErrors, Supplier};
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};
use crate::events::InventoryEvents;

pub const NO_SUPPLIERS_MESSAGE: &str = "No suppliers found";

// =============================================================================
// Table
// =============================================================================

/// Supplier awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub supplier_id: String,
    pub prompt: String,
}

/// Rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppliersTableView {
    pub search: String,
    pub page: Page<Supplier>,
    pub empty_message: Option<String>,
    pub confirm_delete: Option<DeleteConfirmation>,
}

/// Supplier list state.
#[derive(Debug, Clone)]
pub struct SuppliersTable {
    search: String,
    page: usize,
    page_size: usize,
    pending_delete: Option<DeleteConfirmation>,
}

impl SuppliersTable {
    pub fn new(page_size: usize) -> Self {
        SuppliersTable {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            pending_delete: None,
        }
    }

    pub fn set_search(&mut self, search: &str) {
        debug!(search, "supplier search changed");
        self.search = search.to_string();
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    fn matches(&self, supplier: &Supplier) -> bool {
        matches_term(
            &self.search,
            [
                supplier.name.as_str(),
                supplier.contact_person.as_str(),
                supplier.email.as_str(),
            ],
        ) || supplier
            .categories
            .iter()
            .any(|c| matches_term(&self.search, [c.as_str()]))
    }

    pub fn render(&mut self, suppliers: &[Supplier]) -> SuppliersTableView {
        let mut matched: Vec<&Supplier> = suppliers.iter().filter(|s| self.matches(s)).collect();
        matched.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        let page = catalog::paginate(matched, self.page, self.page_size).map(Supplier::clone);
        self.page = page.page;

        SuppliersTableView {
            search: self.search.clone(),
            empty_message: page.is_empty().then(|| NO_SUPPLIERS_MESSAGE.to_string()),
            page,
            confirm_delete: self.pending_delete.clone(),
        }
    }

    /// Opens the delete confirmation for `supplier_id`.
    pub fn request_delete(&mut self, supplier_id: &str, suppliers: &[Supplier]) -> UiResult<()> {
        let supplier = suppliers
            .iter()
            .find(|s| s.id == supplier_id)
            .ok_or_else(|| UiError::not_found("Supplier", supplier_id))?;
        debug!(supplier_id, "supplier delete requested");
        self.pending_delete = Some(DeleteConfirmation {
            supplier_id: supplier.id.clone(),
            prompt: format!(
                "Delete {}? This cannot be undone.",
                supplier.name
            ),
        });
        Ok(())
    }

    /// Confirms the pending delete. Returns false when nothing was pending.
    pub fn confirm_delete(&mut self, events: &impl InventoryEvents) -> bool {
        match self.pending_delete.take() {
            Some(pending) => {
                info!(supplier_id = %pending.supplier_id, "supplier deleted");
                events.delete_supplier(&pending.supplier_id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

// =============================================================================
// Form
// =============================================================================

/// Rendered create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierFormView {
    pub title: String,
    pub draft: SupplierDraft,
    /// Category chips with their selected state.
    pub categories: Vec<(String, bool)>,
    pub field_errors: FieldErrors,
}

/// Supplier create/edit form state.
#[derive(Debug, Clone)]
pub struct SupplierForm {
    draft: SupplierDraft,
    errors: FieldErrors,
    available_categories: Vec<String>,
}

impl SupplierForm {
    /// Empty form for a new supplier.
    pub fn new(available_categories: Vec<String>) -> Self {
        SupplierForm {
            draft: SupplierDraft::default(),
            errors: FieldErrors::new(),
            available_categories,
        }
    }

    /// Form prefilled from an existing supplier.
    pub fn edit(supplier: &Supplier, available_categories: Vec<String>) -> Self {
        SupplierForm {
            draft: SupplierDraft::from_supplier(supplier),
            errors: FieldErrors::new(),
            available_categories,
        }
    }

    pub fn draft(&self) -> &SupplierDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SupplierDraft {
        &mut self.draft
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.draft.toggle_category(category);
    }

    pub fn render(&self) -> SupplierFormView {
        // Categories already on the supplier stay visible even if no product
        // currently uses them.
        let mut chips: Vec<String> = self.available_categories.clone();
        for selected in &self.draft.categories {
            if !chips.iter().any(|c| c.eq_ignore_ascii_case(selected)) {
                chips.push(selected.clone());
            }
        }

        SupplierFormView {
            title: if self.draft.is_edit() {
                "Edit Supplier".to_string()
            } else {
                "Add Supplier".to_string()
            },
            categories: chips
                .into_iter()
                .map(|c| {
                    let on = self
                        .draft
                        .categories
                        .iter()
                        .any(|s| s.eq_ignore_ascii_case(&c));
                    (c, on)
                })
                .collect(),
            draft: self.draft.clone(),
            field_errors: self.errors.clone(),
        }
    }

    /// Validates and emits `save_supplier`. Invalid drafts stay in the form
    /// with inline messages.
    pub fn submit(&mut self, events: &impl InventoryEvents) -> UiResult<Supplier> {
        match self.draft.validate() {
            Ok(supplier) => {
                info!(supplier_id = %supplier.id, edit = self.draft.is_edit(), "supplier saved");
                self.errors.clear();
                events.save_supplier(supplier.clone());
                Ok(supplier)
            }
            Err(errors) => {
                warn!(fields = errors.len(), "supplier form validation failed");
                let err = UiError::from_field_errors(&errors);
                self.errors = errors;
                Err(err)
            }
        }
    }
}
