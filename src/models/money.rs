//! Money type for representing currency amounts
//!
//! Amounts arrive as floats (prices, ticket values) but are held in cents
//! (i64) so that sums are exact and independent of row order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use super::coerce::parse_number_or_default;

/// Currency symbol used by [`Money`]'s `Display`
pub const CURRENCY_SYMBOL: &str = "R$";

/// Largest magnitude a stored amount is read as, in cents (ten trillion)
pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

/// A monetary amount stored as cents (hundredths of a real)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create a Money amount from a float in currency units, rounded to the cent
    ///
    /// Non-finite input is treated as zero; magnitudes beyond `MAX_CENTS`
    /// are clamped to it.
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        let limit = MAX_CENTS as f64;
        Self((value * 100.0).round().clamp(-limit, limit) as i64)
    }

    /// Parse an amount from text; malformed input becomes zero
    pub fn parse_or_zero(s: &str) -> Self {
        let s = s.trim();
        let s = s.strip_prefix(CURRENCY_SYMBOL).unwrap_or(s);
        Self::from_number(parse_number_or_default(s, 0.0))
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in currency units
    pub fn to_number(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp negative amounts to zero
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            self
        }
    }

    /// Average over `count` items, rounded half away from zero; zero when `count` is 0
    pub fn average(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        let count = count as i64;
        let half = count / 2;
        let adjusted = if self.0 >= 0 {
            self.0.saturating_add(half)
        } else {
            self.0.saturating_sub(half)
        };
        Self(adjusted / count)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol(CURRENCY_SYMBOL))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_rounds_to_cent() {
        assert_eq!(Money::from_number(50.0).cents(), 5000);
        assert_eq!(Money::from_number(10.006).cents(), 1001);
        assert_eq!(Money::from_number(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_number(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "R$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "R$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-R$10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("$"), "$0.05");
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(Money::parse_or_zero("35").cents(), 3500);
        assert_eq!(Money::parse_or_zero("R$ 35.5").cents(), 3550);
        assert_eq!(Money::parse_or_zero("abc").cents(), 0);
        assert_eq!(Money::parse_or_zero("").cents(), 0);
    }

    #[test]
    fn test_average() {
        assert_eq!(Money::from_cents(8000).average(2).cents(), 4000);
        assert_eq!(Money::from_cents(1000).average(3).cents(), 333);
        assert_eq!(Money::from_cents(200).average(3).cents(), 67);
        assert_eq!(Money::from_cents(1000).average(0).cents(), 0);
    }

    #[test]
    fn test_sum_and_clamp() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(Money::from_cents(-10).non_negative(), Money::zero());
    }

    #[test]
    fn test_huge_amounts_saturate() {
        assert_eq!(Money::from_number(1e17).cents(), MAX_CENTS);
        assert_eq!(Money::from_number(-1e300).cents(), -MAX_CENTS);

        let total: Money = std::iter::repeat(Money::from_cents(i64::MAX)).take(3).sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut running = Money::from_cents(i64::MIN);
        running += Money::from_cents(-1);
        assert_eq!(running.cents(), i64::MIN);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);
        assert_eq!(Money::from_cents(i64::MAX).average(3).cents(), i64::MAX / 3);
    }
}
