//! # Validation Module
//!
//! Input validation for every Shopfront form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Submit                                        │
//! │                                                                         │
//! │  User clicks "Save"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Each field runs its validator (THIS MODULE)                           │
//! │       │                                                                 │
//! │       ├── any failure → FieldErrors { "email": "...", ... }            │
//! │       │                  submission blocked, messages shown inline     │
//! │       │                                                                 │
//! │       └── all pass → validated value handed to the save handler        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_email, parse_quantity_input};
//!
//! assert!(validate_email("email", "buyer@example.com").is_ok());
//! assert_eq!(parse_quantity_input("abc"), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::PHONE_DIGITS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Errors
// =============================================================================

/// Inline error messages keyed by field name.
///
/// Only the first failure per field is kept, matching what a form can show
/// under each input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the field already has one.
    pub fn push(&mut self, err: ValidationError) {
        self.0
            .entry(err.field().to_string())
            .or_insert_with(|| err.to_string());
    }

    /// Unwraps a validator result, recording the error if there is one.
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Checks a required text field and returns it trimmed.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Checks a required name-like field with a length cap.
pub fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = validate_required(field, value)?;
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value)
}

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
///
/// ```rust
/// use shopfront_core::validation::validate_sku;
///
/// assert!(validate_sku("RICE-5KG").is_ok());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<String> {
    let sku = validate_name("sku", sku, 50)?;

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(sku)
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Optional `+` and 1-3 digit country code, then the national number.
/// Applied after separators are stripped. ASCII digits only.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:\+[0-9]{{1,3}})?([0-9]{{{}}})$", PHONE_DIGITS))
        .expect("phone pattern is valid")
});

/// Validates an email address with a deliberately simple pattern.
///
/// ## Rules (`local@domain.tld`)
/// - No whitespace anywhere
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot with text on both sides
pub fn validate_email(field: &str, value: &str) -> ValidationResult<String> {
    let email = validate_required(field, value)?;

    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "enter a valid email address".to_string(),
        });
    }

    Ok(email)
}

/// Validates a phone number and returns its bare digits.
///
/// ## Rules
/// - Spaces, dashes, and parentheses are ignored
/// - An optional leading `+` country code of 1-3 digits is dropped
/// - The national number must be exactly [`PHONE_DIGITS`] digits
///
/// ```rust
/// use shopfront_core::validation::validate_phone;
///
/// assert_eq!(validate_phone("phone", "98765 43210").unwrap(), "9876543210");
/// assert_eq!(validate_phone("phone", "+91 98765-43210").unwrap(), "9876543210");
/// assert!(validate_phone("phone", "12345").is_err());
/// ```
pub fn validate_phone(field: &str, value: &str) -> ValidationResult<String> {
    let raw = validate_required(field, value)?;

    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    PHONE_RE
        .captures(&compact)
        .and_then(|caps| caps.get(1))
        .map(|national| national.as_str().to_string())
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be a {}-digit phone number", PHONE_DIGITS),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a manually typed quantity.
///
/// Anything that is not a positive integer falls back to 1. The caller
/// still clamps the result to stock.
///
/// ```rust
/// use shopfront_core::validation::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input("4"), 4);
/// assert_eq!(parse_quantity_input("0"), 1);
/// assert_eq!(parse_quantity_input("-2"), 1);
/// assert_eq!(parse_quantity_input("2.5"), 1);
/// assert_eq!(parse_quantity_input(""), 1);
/// ```
pub fn parse_quantity_input(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(qty) if qty > 0 => qty,
        _ => 1,
    }
}

/// Parses a stock count typed into a form (non-negative integer).
pub fn parse_stock_input(field: &str, text: &str) -> ValidationResult<u32> {
    let text = validate_required(field, text)?;
    text.parse::<u32>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number of 0 or more".to_string(),
        })
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a category selection: trimmed, de-duplicated, at least one.
pub fn validate_categories(field: &str, categories: &[String]) -> ValidationResult<Vec<String>> {
    let mut selected: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.trim();
        if category.is_empty() {
            continue;
        }
        if !selected.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            selected.push(category.to_string());
        }
    }

    if selected.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_trims() {
        assert_eq!(validate_required("name", "  Asha  ").unwrap(), "Asha");
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("RICE-5KG").is_ok());
        assert!(validate_sku("atta_10").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "buyer@example.com").is_ok());
        assert!(validate_email("email", "a.b@shop.co.in").is_ok());

        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "buyer.example.com").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "buyer@example").is_err());
        assert!(validate_email("email", "buyer@.com").is_err());
        assert!(validate_email("email", "buyer@example.").is_err());
        assert!(validate_email("email", "buy er@example.com").is_err());
        assert!(validate_email("email", "a@b@example.com").is_err());
        assert!(validate_email("email", "buyer@example.com\nx@y.z").is_err());
    }

    #[test]
    fn test_validate_email_trims_before_matching() {
        assert_eq!(
            validate_email("email", "  buyer@example.com ").unwrap(),
            "buyer@example.com"
        );
        let err = validate_email("contact_email", "nope").unwrap_err();
        assert_eq!(err.field(), "contact_email");
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("phone", "9876543210").unwrap(), "9876543210");
        assert_eq!(validate_phone("phone", "(987) 654-3210").unwrap(), "9876543210");
        assert_eq!(validate_phone("phone", "+1 987 654 3210").unwrap(), "9876543210");

        assert!(validate_phone("phone", "98765").is_err());
        assert!(validate_phone("phone", "98765432101").is_err());
        assert!(validate_phone("phone", "98765x3210").is_err());
        assert!(validate_phone("phone", "+9876543210").is_err());
        assert!(validate_phone("phone", "+12349876543210").is_err());
        assert!(validate_phone("phone", "91+9876543210").is_err());
        assert!(validate_phone("phone", "+91 98765-43210 ").is_ok());
        assert!(validate_phone("phone", "９８７６５４３２１０").is_err());
    }

    #[test]
    fn test_parse_stock_input() {
        assert_eq!(parse_stock_input("stock", "0").unwrap(), 0);
        assert_eq!(parse_stock_input("stock", " 25 ").unwrap(), 25);
        assert!(parse_stock_input("stock", "-1").is_err());
        assert!(parse_stock_input("stock", "").is_err());
    }

    #[test]
    fn test_validate_categories() {
        let picked = vec![" Grains ".to_string(), "grains".to_string(), "Oil".to_string()];
        assert_eq!(
            validate_categories("categories", &picked).unwrap(),
            vec!["Grains".to_string(), "Oil".to_string()]
        );
        assert!(matches!(
            validate_categories("categories", &[]),
            Err(ValidationError::Empty { .. })
        ));
        assert!(validate_categories("categories", &["  ".to_string()]).is_err());
    }

    #[test]
    fn test_field_errors_keeps_first_message() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::Required {
            field: "email".to_string(),
        });
        errors.push(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "nope".to_string(),
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("email is required"));

        assert_eq!(errors.check(validate_required("name", "x")), Some("x".to_string()));
        assert_eq!(errors.check(validate_required("phone", "")), None);
        assert!(errors.contains("phone"));
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(1800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
