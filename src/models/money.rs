//! Money type for representing rupiah amounts
//!
//! Amounts are whole rupiah stored in an `i64`. The store may hand back
//! numeric columns as floats, so deserialization accepts both and rounds.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount in whole rupiah
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole rupiah
    ///
    /// # Examples
    /// ```
    /// use balance_cli::models::Money;
    /// let amount = Money::from_rupiah(50_000);
    /// assert_eq!(amount.to_string(), "Rp 50.000");
    /// ```
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Self(rupiah)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in rupiah
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply a unit price by a quantity, saturating at the `i64` bounds
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Multiply a unit price by a quantity, `None` on overflow
    pub const fn checked_times(&self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "50000", "50.000", "Rp 50.000", "-20000", "50rb", "1.5jt".
    /// Dots and underscores are thousands separators unless followed by a
    /// `jt`/`rb` suffix, in which case a dot or comma is a decimal point.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };

        let s = s
            .strip_prefix("Rp")
            .or_else(|| s.strip_prefix("rp"))
            .unwrap_or(s)
            .trim();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(raw.to_string()));
        }

        let lower = s.to_lowercase();
        let (number, multiplier) = if let Some(n) = lower.strip_suffix("jt") {
            (n.trim().to_string(), Some(1_000_000.0))
        } else if let Some(n) = lower.strip_suffix("rb") {
            (n.trim().to_string(), Some(1_000.0))
        } else if let Some(n) = lower.strip_suffix('k') {
            (n.trim().to_string(), Some(1_000.0))
        } else {
            (lower, None)
        };

        let value = match multiplier {
            Some(mult) => {
                let scaled: f64 = number
                    .replace(',', ".")
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?;
                (scaled * mult).round() as i64
            }
            None => {
                let digits: String = number.chars().filter(|c| *c != '.' && *c != '_').collect();
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(MoneyParseError::InvalidFormat(raw.to_string()));
                }
                digits
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?
            }
        };

        Ok(Self(if negative { -value } else { value }))
    }

    /// Compact form used on chart axes: "1.5jt", "50rb", "750"
    pub fn format_compact(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let value = self.0.unsigned_abs();
        // 999.500 would round up to "1000rb"
        if value >= 999_500 {
            format!("{}{:.1}jt", sign, value as f64 / 1_000_000.0)
        } else if value >= 1_000 {
            format!("{}{:.0}rb", sign, value as f64 / 1_000.0)
        } else {
            self.0.to_string()
        }
    }
}

/// Group the digits of a non-negative number with `.` every three places
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grouped = group_thousands(self.0.unsigned_abs());
        if self.is_negative() {
            write!(f, "-Rp {}", grouped)
        } else {
            write!(f, "Rp {}", grouped)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Int(v) => Ok(Self(v)),
            Wire::Float(v) => Ok(Self(v.round() as i64)),
            // Postgres numeric columns can arrive quoted
            Wire::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(|v| Self(v.round() as i64))
                .map_err(serde::de::Error::custom),
        }
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

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
