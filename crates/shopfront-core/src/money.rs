//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cart totalled in floats:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Shopfront keeps every amount in minor units (paise, cents):            │
//! │    1999 + 4999 = 6998 → shown as "69.98"                               │
//! │                                                                         │
//! │  The payment widget also expects minor units, so no conversion          │
//! │  happens between the cart and the checkout hand-off.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(1999);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 5997);
//! assert_eq!(line.to_string(), "59.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Decimal places assumed when parsing and displaying without a currency config.
pub const DEFAULT_DECIMALS: u8 = 2;

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and differences may be negative mid-calculation
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (two decimals).
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(118, 0).cents(), 11800);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax at `rate`, rounding half up on minor units.
    ///
    /// ## Implementation
    /// Integer math only: `(amount * bps + 5000) / 10000`. The `+5000` is the
    /// half-unit that turns truncation into rounding.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major_minor(100, 0);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1800));
    /// assert_eq!(tax.cents(), 1800);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing before the division
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns the portion of this amount given by `bps` basis points.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let gross = Money::from_cents(11800);
    /// assert_eq!(gross.percentage(1000).cents(), 1180); // 10%
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Restricts the value to `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Money, max: Money) -> Money {
        Money(self.0.clamp(min.0, max.0.max(min.0)))
    }

    /// Parses a decimal string such as `"249.5"` into minor units.
    ///
    /// ## Rules
    /// - Leading/trailing whitespace is ignored
    /// - At most `decimals` fractional digits
    /// - Negative values are rejected (prices are never negative)
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("249.5", "price", 2).unwrap().cents(), 24950);
    /// assert!(Money::parse_decimal("-1", "price", 2).is_err());
    /// assert!(Money::parse_decimal("1.999", "price", 2).is_err());
    /// ```
    pub fn parse_decimal(text: &str, field: &str, decimals: u8) -> Result<Money, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if text.starts_with('-') {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (text, ""),
        };

        if frac.len() > decimals as usize {
            return Err(invalid("too many decimal places"));
        }
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must be a number"));
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a number"));
        }

        let scale = 10_i64.pow(decimals as u32);
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("number is too large"))?
        };
        let frac_padded = format!("{:0<width$}", frac, width = decimals as usize);
        let frac: i64 = if frac_padded.is_empty() {
            0
        } else {
            frac_padded.parse().map_err(|_| invalid("must be a number"))?
        };

        whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac))
            .map(Money)
            .ok_or_else(|| invalid("number is too large"))
    }

    /// Formats with a currency symbol and a number of decimal places.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(11800).format_with("₹", 2), "₹118.00");
    /// assert_eq!(Money::from_cents(-550).format_with("$", 2), "-$5.50");
    /// assert_eq!(Money::from_cents(1500).format_with("¥", 0), "¥1500");
    /// ```
    pub fn format_with(&self, symbol: &str, decimals: u8) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        if decimals == 0 {
            return format!("{}{}{}", sign, symbol, abs);
        }
        let divisor = 10_u64.pow(decimals as u32);
        format!(
            "{}{}{}.{:0width$}",
            sign,
            symbol,
            abs / divisor,
            abs % divisor,
            width = decimals as usize
        )
    }
}

/// Plain two-decimal rendering, no symbol. Screens use `format_with`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("", DEFAULT_DECIMALS))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}
