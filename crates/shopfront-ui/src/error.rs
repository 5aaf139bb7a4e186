//! # UI Error Type
//!
//! What a screen shows when something goes wrong.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  View-model method                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation failed? ── FieldErrors ───────────► inline field messages   │
//! │         │              (also UiError::ValidationError summary)          │
//! │         ▼                                                               │
//! │  Core rule broken? ─── CoreError ──┐                                    │
//! │         │                          ├── UiError { code, message } ─────► │
//! │  Widget failed? ────── WidgetError ┘       banner / toast               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ─────────────────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `UiError` is serializable so the shell can hand it to the
//! JavaScript front end unchanged:
//! ```json
//! { "code": "INSUFFICIENT_STOCK", "message": "Only 3 of RICE-5KG in stock" }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shopfront_core::{CoreError, FieldErrors};
use thiserror::Error;

use crate::payment_form::WidgetError;

/// Result type for view-model operations.
pub type UiResult<T> = Result<T, UiError>;

// =============================================================================
// UI Error
// =============================================================================

/// Error shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes carried by [`UiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Referenced record is not in the data the screen was given
    NotFound,

    /// Cart operation failed
    CartError,

    /// Not enough stock
    InsufficientStock,

    /// Payment widget reported a failure
    PaymentError,

    /// Business rule violated (e.g. status transition)
    BusinessLogic,

    /// Anything else
    Internal,
}

impl UiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        UiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::CartError, message)
    }

    pub fn payment(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::PaymentError, message)
    }

    pub fn business(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::BusinessLogic, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::Internal, message)
    }

    /// One-line summary of a failed form.
    pub fn from_field_errors(errors: &FieldErrors) -> Self {
        let summary = errors
            .iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ");
        UiError::validation(summary)
    }
}

/// Converts core errors to UI errors.
impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => UiError::not_found("Product", &id),
            CoreError::LineNotFound(id) => UiError::not_found("Cart line", &id),
            CoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => UiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    sku, available, requested
                ),
            ),
            CoreError::OutOfStock { sku } => {
                UiError::new(ErrorCode::InsufficientStock, format!("{} is out of stock", sku))
            }
            CoreError::CartTooLarge { max } => {
                UiError::cart(format!("Cart cannot have more than {} items", max))
            }
            CoreError::UnknownDiscountCode(code) => {
                UiError::validation(format!("Discount code {} is not valid", code))
            }
            err @ CoreError::InvalidStatusTransition { .. } => UiError::business(err.to_string()),
            CoreError::Validation(e) => UiError::validation(e.to_string()),
        }
    }
}

/// Converts payment widget failures to UI errors.
impl From<WidgetError> for UiError {
    fn from(err: WidgetError) -> Self {
        UiError::payment(err.to_string())
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UiError {}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `ShopConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized for saving.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Values parsed but are not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoPath,
}
