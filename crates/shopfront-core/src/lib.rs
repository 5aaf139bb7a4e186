//! # shopfront-core: Pure Business Logic for Shopfront
//!
//! Everything the Shopfront screens decide on their own, with no I/O:
//! cart math, validation, catalog filtering, and purchase-order rules.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shopfront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                apps/register (parent container)                 │   │
//! │  │    owns products, cart, customers, suppliers, purchase orders   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ handler traits                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shopfront-ui (view-models)                       │   │
//! │  │    ProductGrid, CartView, PaymentForm, SuppliersTable, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │validation│ │ drafts │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────────┐                   │   │
//! │  │   │ pricing │ │ catalog │ │ purchase_order │                   │   │
//! │  │   └─────────┘ └─────────┘ └────────────────┘                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Supplier, PurchaseOrder, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart lines bounded by stock
//! - [`pricing`] - Subtotal, tax, discount, total
//! - [`validation`] - Field validators and `FieldErrors`
//! - [`drafts`] - Form drafts for customers, suppliers, buyers, products
//! - [`catalog`] - Search, sort, pagination
//! - [`purchase_order`] - Status transitions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Cart, Money, Product, TaxRate};
//!
//! let oil = Product {
//!     id: "p-oil".to_string(),
//!     name: "Mustard Oil 1L".to_string(),
//!     sku: "OIL-MUST-1".to_string(),
//!     price_cents: 10000,
//!     stock: 5,
//!     category: "Oils".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_product(&oil).unwrap();
//!
//! let totals = cart.totals(TaxRate::from_bps(1800), Money::zero());
//! assert_eq!(totals.total.cents(), 11800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod drafts;
pub mod error;
pub mod money;
pub mod pricing;
pub mod purchase_order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, QuantityControls};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_totals, Discount, DiscountBook, Totals};
pub use purchase_order::StatusTransition;
pub use types::*;
pub use validation::FieldErrors;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Digits in a national phone number.
pub const PHONE_DIGITS: usize = 10;

/// Default tax rate, 18%.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1800);
