//! # shopfront-ui: View-Models for the Shopfront Screens
//!
//! Each screen of the point-of-sale front end is a view-model: a struct
//! holding transient UI state (search text, current page, open dialogs,
//! form drafts, inline errors) with a `render()` that turns parent-owned
//! data into a serializable view struct.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   parent state (products, cart, customers, suppliers, POs, orders)      │
//! │        │                                          ▲                     │
//! │        │ &[T] snapshots                           │ mutate              │
//! │        ▼                                          │                     │
//! │   ┌──────────────┐  user action  ┌──────────────────────────────┐       │
//! │   │  view-model  │──────────────►│  handler traits              │       │
//! │   │  .render()   │               │  CartEvents, CustomerEvents, │       │
//! │   └──────┬───────┘               │  PaymentEvents,              │       │
//! │          │                       │  InventoryEvents             │       │
//! │          ▼                       └──────────────────────────────┘       │
//! │   view struct (serde)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product_grid`] - Product grid and quick-add search
//! - [`cart_view`] - Cart lines, quantity controls, totals, discount code
//! - [`customer_select`] - Customer picker with inline create
//! - [`payment_form`] - Buyer contact, simulated delay, payment widget
//! - [`order_success`] - Post-payment summary and text receipt
//! - [`order_history`] - Past orders
//! - [`suppliers`] - Suppliers table and create/edit form
//! - [`purchase_orders`] - Purchase-order table, details, status dialog
//! - [`admin`] - Role gate and the access-denied screen
//! - [`events`] - Handler traits
//! - [`config`] - `shopfront.toml` settings
//! - [`error`] - `UiError` and `ConfigError`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod cart_view;
pub mod config;
pub mod customer_select;
pub mod error;
pub mod events;
pub mod order_history;
pub mod order_success;
pub mod payment_form;
pub mod product_grid;
pub mod purchase_orders;
pub mod suppliers;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use admin::{Access, AccessDeniedView, AccessGate};
pub use cart_view::{CartSnapshot, CartView};
pub use config::ShopConfig;
pub use customer_select::CustomerSelect;
pub use error::{ConfigError, ErrorCode, UiError, UiResult};
pub use events::{CartEvents, CheckoutTotals, CustomerEvents, InventoryEvents, PaymentEvents};
pub use order_history::OrderHistory;
pub use order_success::OrderSuccessDialog;
pub use payment_form::{
    CheckoutSummary, PaymentForm, PaymentOptions, PaymentRequest, PaymentStatus, PaymentWidget,
    WidgetError, WidgetSuccess,
};
pub use product_grid::{ProductGrid, ProductSearch};
pub use purchase_orders::{PurchaseOrderDetails, PurchaseOrdersTable, StatusDialog};
pub use suppliers::{SupplierForm, SuppliersTable};
