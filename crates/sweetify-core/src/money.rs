//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Integer Cents Internally, Decimals on the Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  The frontend sends and expects decimal numbers:  { "price": 3.99 }    │
//! │                                                                         │
//! │    JSON 3.99 ──► from_decimal ──► Money(399) ──► price_cents column    │
//! │                                                                         │
//! │    price_cents ──► Money(399) ──► to_decimal ──► JSON 3.99             │
//! │                                                                         │
//! │  All sums (cart totals, checkout) happen on the integer side.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sweetify_core::money::Money;
//!
//! let price = Money::from_decimal(3.99).unwrap();
//! assert_eq!(price.cents(), 399);
//!
//! let line_total = price.checked_mul(3).unwrap();
//! assert_eq!(line_total.to_decimal(), 11.97);
//!
//! // Arithmetic is checked: overflow is a `None`, never a wrapped total
//! assert!(Money::from_cents(i64::MAX).checked_add(price).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64**: one field, zero-cost over the database column
/// - **Conversions at the edge**: only the HTTP layer sees `f64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use sweetify_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as sent by the frontend) into cents.
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities and
    /// values that do not fit in an `i64` number of cents.
    ///
    /// ```rust
    /// use sweetify_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).unwrap().cents(), 250);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents > i64::MAX as f64 || cents < i64::MIN as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal amount for JSON responses.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Sweet: Gummy Bears $1.25
    /// Cart quantity: 4
    ///      │
    ///      ▼
    /// checked_mul(4) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $5.00
    /// ```
    ///
    /// Returns `None` on overflow.
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts. Returns `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering, e.g. `$10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
