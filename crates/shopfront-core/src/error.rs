//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures (field-keyed)        │
//! │                                                                         │
//! │  shopfront-ui errors (separate crate)                                  │
//! │  ├── UiError          - What the screen shows (serialized)             │
//! │  └── ConfigError      - Configuration loading                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UiError → inline message / banner │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the supplied catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No cart line references the product id.
    #[error("Product {0} is not in the cart")]
    LineNotFound(String),

    /// Requested quantity is above the recorded stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "+" on a line showing 3 of 3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "RICE-5KG", available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// "+" stays disabled; the line keeps quantity 3
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: u32,
        requested: u32,
    },

    /// Product has no stock at all and cannot be added.
    #[error("{sku} is out of stock")]
    OutOfStock { sku: String },

    /// Cart has reached its line limit.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Discount code is not in the discount book.
    #[error("Unknown discount code: {0}")]
    UnknownDiscountCode(String),

    /// Purchase order is not in a state that allows the transition.
    #[error("Purchase order {order_number} is {from}, cannot move to {to}")]
    InvalidStatusTransition {
        order_number: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant carries the field name so forms can key inline messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, short phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A collection that needs at least one entry is empty.
    #[error("select at least one {field}")]
    Empty { field: String },
}

impl ValidationError {
    /// Returns the name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Empty { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
