//! Amount type for representing entry values
//!
//! Internally stores amounts in hundredths (cents) as an unsigned integer, so
//! an amount can never be negative: the direction of money is carried by
//! [`EntryKind`](super::EntryKind), never by a sign.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A non-negative monetary amount stored as hundredths of the currency unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Create an amount from cents
    ///
    /// # Examples
    /// ```
    /// use pfim::models::Amount;
    /// let amount = Amount::from_cents(27500); // 275.00
    /// assert_eq!(amount.to_string(), "275.00");
    /// ```
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Get the whole units portion
    pub const fn units(&self) -> u64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> u64 {
        self.0 % 100
    }

    /// The amount as a floating point value, for statistics
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Convert a stored floating point value back into an amount
    ///
    /// Rounds to the nearest cent; negative, infinite and NaN values are
    /// rejected.
    pub fn from_f64(value: f64) -> Result<Self, AmountParseError> {
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(value.to_string()));
        }
        if value < 0.0 {
            return Err(AmountParseError::Negative(value.to_string()));
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(AmountParseError::Overflow(value.to_string()));
        }
        Ok(Self(cents as u64))
    }

    /// Parse an amount from a string
    ///
    /// Accepts formats: "275", "275.5", "275.50". Rejects signs, more than two
    /// fractional digits and anything that is not a plain decimal number.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();

        if s.starts_with('-') {
            return Err(AmountParseError::Negative(s.to_string()));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        let units: u64 = whole
            .parse()
            .map_err(|_| AmountParseError::Overflow(s.to_string()))?;

        // Pad cents to 2 digits: "5" means 50 cents
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction
                .parse()
                .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or_else(|| AmountParseError::Overflow(s.to_string()))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}.{:02}", self.units(), self.cents_part());
        f.pad(&text)
    }
}

// Totals saturate instead of wrapping
impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, m| acc + m)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    Negative(String),
    Overflow(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            Self::Negative(s) => write!(f, "Amount must not be negative: {}", s),
            Self::Overflow(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Amount::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_cents(27500).to_string(), "275.00");
        assert_eq!(Amount::from_cents(0).to_string(), "0.00");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(format!("{:>8}", Amount::from_cents(7500)), "   75.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Amount::parse("275.00").unwrap().cents(), 27500);
        assert_eq!(Amount::parse("275").unwrap().cents(), 27500);
        assert_eq!(Amount::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Amount::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Amount::parse(" 75. ").unwrap().cents(), 7500);
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert!(matches!(
            Amount::parse("-10"),
            Err(AmountParseError::Negative(_))
        ));
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("1.234").is_err());
        assert!(Amount::parse(".5").is_err());
        assert!(Amount::parse("1.2.3").is_err());
        assert!(Amount::parse("$10").is_err());
        assert!(Amount::parse("").is_err());
    }

    #[test]
    fn test_f64_conversion() {
        let m = Amount::parse("141.42").unwrap();
        assert!((m.as_f64() - 141.42).abs() < 1e-9);
        assert_eq!(Amount::from_f64(m.as_f64()).unwrap(), m);
        assert!(Amount::from_f64(-1.0).is_err());
        assert!(Amount::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_sum() {
        let total: Amount = [7500, 27500].into_iter().map(Amount::from_cents).sum();
        assert_eq!(total.cents(), 35000);
    }

    #[test]
    fn test_sum_saturates_on_overflow() {
        let huge = Amount::from_cents(u64::MAX - 1);
        let total: Amount = [huge, Amount::from_cents(500)].into_iter().sum();
        assert_eq!(total.cents(), u64::MAX);

        let mut running = huge;
        running += huge;
        assert_eq!(running.cents(), u64::MAX);
        assert_eq!(Amount::default(), Amount::zero());
    }

    #[test]
    fn test_serialization() {
        let m = Amount::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
