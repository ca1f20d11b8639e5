//! # Money Module
//!
//! Provides the `Money` type for handling prices and totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    26997 * 0.18 = 4859.46 (and 0.1 + 0.2 = 0.30000000000000004)         │
//! │    Every page that recomputes the total can drift by a fraction.        │
//! │                                                                         │
//! │  OUR SOLUTION: Whole Currency Units + Basis Points                      │
//! │    26997 × 1800 bps = 48_594_600 / 10_000 → 4859 (rounded once)         │
//! │    Taxes and discounts are integers before they are ever displayed     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listing prices are quoted in whole rupees (`₹8,999 / night`), so the
//! smallest unit tracked here is one rupee.
//!
//! ## Usage
//! ```rust
//! use stayhub_core::money::Money;
//!
//! let nightly = Money::from_units(8999);
//! let three_nights = nightly * 3u32;
//! assert_eq!(three_nights.units(), 26997);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Currency symbol used by `Display`.
pub const CURRENCY_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted, so intermediate values may be negative
/// - **Single field tuple struct**: serializes as a bare JSON number, matching
///   the persisted `priceDetails` layout
/// - **Lenient reads**: fractional amounts (`4859.46`) and numeric strings are
///   accepted and rounded half away from zero to whole units
///
/// ## Where Money is Used
/// ```text
/// Property.price ──► PriceBreakdown.price_per_night ──► subtotal
///                                                         │
///        subtotal − discount + taxes + service fee ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    /// Returns the value, or zero if it is negative.
    ///
    /// ## Example
    /// ```rust
    /// use stayhub_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(-250).non_negative(), Money::zero());
    /// assert_eq!(Money::from_units(250).non_negative().units(), 250);
    /// ```
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates tax at the given rate, rounded to the nearest whole unit.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5), half rounds up.
    ///
    /// ## Example
    /// ```rust
    /// use stayhub_core::money::Money;
    /// use stayhub_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(26997);
    /// let gst = TaxRate::from_bps(1800); // 18%
    ///
    /// // 26997 × 18% = 4859.46 → 4859
    /// assert_eq!(subtotal.calculate_tax(gst).units(), 4859);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so that large multi-room stays cannot overflow the product
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_units(tax as i64)
    }

    /// Divides by `count`, rounding half up. Returns zero for a zero count.
    ///
    /// ## Example
    /// ```rust
    /// use stayhub_core::money::Money;
    ///
    /// let total = Money::from_units(1001);
    /// assert_eq!(total.divide_rounded(2).units(), 501);
    /// assert_eq!(total.divide_rounded(0), Money::zero());
    /// ```
    pub fn divide_rounded(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        let count = count as i128;
        let value = self.0 as i128;
        let rounded = if value >= 0 {
            (value + count / 2) / count
        } else {
            (value - count / 2) / count
        };
        Money::from_units(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with the rupee sign and thousands separators.
///
/// ## Note
/// This is for receipts, share text and logs. The presentation layer applies
/// its own locale-aware formatting for on-screen prices.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

impl Money {
    /// Formats with `symbol` in place of the rupee sign.
    ///
    /// ## Example
    /// ```rust
    /// use stayhub_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(4500).format_with("$"), "$4,500");
    /// assert_eq!(Money::from_units(-6750).format_with("Rs. "), "-Rs. 6,750");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{}{}", sign, symbol, grouped)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map(Money)
            .map_err(|_| E::custom(format!("amount {} is out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let rounded = v.round();
        if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
            return Err(E::custom(format!("amount {} is out of range", v)));
        }
        Ok(Money(rounded as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        let trimmed = v.trim();
        if let Ok(units) = trimmed.parse::<i64>() {
            return Ok(Money(units));
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            .and_then(|amount| self.visit_f64(amount))
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by nights or rooms.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
