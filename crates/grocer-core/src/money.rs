//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    2.30 × 1.05 = 2.4149999999999996  → rounds to 2.41  ❌ WRONG!        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer cents × integer basis points                     │
//! │    230 × 10500 = 2_415_000 → (2_415_000 + 5000) / 10000 = 242 ✅        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::money::Money;
//! use grocer_core::types::PriceModifier;
//!
//! let milk: Money = "2.00".parse().unwrap();
//! let price = milk.apply_modifier(PriceModifier::from_bps(9300));
//! assert_eq!(price, Money::from_cents(186));
//! assert_eq!(price.to_string(), "$1.86");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::ops::Add;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::PriceModifier;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Product.base_price ──► × PriceModifier ──► ShelfPrice::Available
///                                                   │
///                                                   ▼
///                                  Σ over cart ──► CartTotal::Total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a price modifier and rounds to whole cents, half up.
    ///
    /// ## Implementation
    /// `(cents × bps + 5000) / 10000` in i128. The +5000 is half of the
    /// basis-point scale, so an exact half cent always goes up. Negative
    /// amounts round half away from zero, mirroring positive ones.
    /// Results beyond the i64 range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    /// use grocer_core::types::PriceModifier;
    ///
    /// // $2.30 × 1.05 = $2.415 → $2.42
    /// let bread = Money::from_cents(230);
    /// assert_eq!(bread.apply_modifier(PriceModifier::from_bps(10500)).cents(), 242);
    /// ```
    pub fn apply_modifier(&self, modifier: PriceModifier) -> Money {
        let scale = PriceModifier::SCALE as i128;
        let product = self.0 as i128 * modifier.bps() as i128;
        let half = scale / 2;
        let rounded = if product >= 0 {
            (product + half) / scale
        } else {
            (product - half) / scale
        };
        let cents = i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses a plain decimal string with at most `max_scale` fractional digits.
///
/// Trailing zeros do not count: "2.300" is accepted as a price.
pub(crate) fn parse_decimal(input: &str, max_scale: u32) -> Result<Decimal, String> {
    let trimmed = input.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|e| format!("'{}' is not a decimal number: {}", trimmed, e))?
        .normalize();

    if value.scale() > max_scale {
        return Err(format!(
            "'{}' has more than {} decimal places",
            trimmed, max_scale
        ));
    }
    Ok(value)
}

/// `value × factor` as an integer, or `None` when it does not fit in i64.
pub(crate) fn to_scaled_i64(value: Decimal, factor: i64) -> Option<i64> {
    value.checked_mul(Decimal::from(factor))?.to_i64()
}

/// Parses "2.30" style amounts exactly.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason,
        };
        let value = parse_decimal(s, 2).map_err(invalid)?;
        to_scaled_i64(value, 100)
            .map(Money::from_cents)
            .ok_or_else(|| invalid(format!("'{}' is out of range", s.trim())))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1.86`. Front ends with a different currency symbol
/// format cents themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(186).to_string(), "$1.86");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!("2.30".parse::<Money>().unwrap().cents(), 230);
        assert_eq!("2.3".parse::<Money>().unwrap().cents(), 230);
        assert_eq!("0.95".parse::<Money>().unwrap().cents(), 95);
        assert_eq!("2.300".parse::<Money>().unwrap().cents(), 230);
        assert_eq!("4".parse::<Money>().unwrap().cents(), 400);
        assert_eq!("-1.05".parse::<Money>().unwrap().cents(), -105);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2.305".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("two".parse::<Money>().is_err());
        assert!("99999999999999999999.99".parse::<Money>().is_err());
        assert!("$2.00".parse::<Money>().is_err());
    }

    #[test]
    fn test_apply_modifier_rounds_half_up() {
        // $2.30 × 1.05 = $2.415 → $2.42 (binary floats would give $2.41)
        let bread = Money::from_cents(230);
        assert_eq!(bread.apply_modifier(PriceModifier::from_bps(10500)).cents(), 242);

        // $2.00 × 0.93 = $1.86 exactly
        let milk = Money::from_cents(200);
        assert_eq!(milk.apply_modifier(PriceModifier::from_bps(9300)).cents(), 186);

        // $1.25 × 0.91 = $1.1375 → $1.14
        let chips = Money::from_cents(125);
        assert_eq!(chips.apply_modifier(PriceModifier::from_bps(9100)).cents(), 114);
    }

    #[test]
    fn test_apply_modifier_saturates() {
        let huge = Money::from_cents(i64::MAX);
        let doubled = huge.apply_modifier(PriceModifier::from_bps(20000));
        assert_eq!(doubled.cents(), i64::MAX);

        let owed = Money::from_cents(i64::MIN);
        assert_eq!(owed.apply_modifier(PriceModifier::from_bps(20000)).cents(), i64::MIN);
    }

    #[test]
    fn test_add_saturates() {
        let total = Money::from_cents(i64::MAX) + Money::from_cents(1);
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_apply_identity_modifier() {
        let price = Money::from_cents(399);
        assert_eq!(price.apply_modifier(PriceModifier::ONE), price);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }
}
