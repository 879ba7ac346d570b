//! Exact fraction value object (0 to 1 inclusive).
//!
//! Decimal input such as `0.875` is read digit by digit from its shortest
//! decimal form, so the stored ratio is exactly `7/8` and never a rounded
//! binary approximation.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ValidationError;

/// Decimal places accepted from decimal input; `10^18` still fits in `u64`.
const MAX_DECIMAL_PLACES: usize = 18;

/// A reduced ratio `numerator / denominator` within `0..=1`.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Fraction {
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Whole percent as a fraction, clamping to 100.
    pub const fn percent(value: u8) -> Self {
        let value = if value > 100 { 100 } else { value as u64 };
        let divisor = gcd(value, 100);
        Self {
            numerator: value / divisor,
            denominator: 100 / divisor,
        }
    }

    /// Creates a reduced fraction, rejecting a zero denominator or a value above 1.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, ValidationError> {
        if denominator == 0 {
            return Err(ValidationError::invalid_format(
                "fraction",
                "denominator must be positive",
            ));
        }
        if numerator > denominator {
            return Err(ValidationError::invalid_format(
                "fraction",
                format!("{}/{} is greater than 1", numerator, denominator),
            ));
        }
        let divisor = gcd(numerator, denominator).max(1);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Reads a decimal in `0.0..=1.0` exactly as written.
    pub fn try_from_decimal(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "fraction",
                format!("must be within 0 and 1, got {}", value),
            ));
        }

        // f64 Display prints the shortest round-tripping decimal, never exponent form.
        let text = value.to_string();
        let (whole, decimals) = text.split_once('.').unwrap_or((text.as_str(), ""));
        if decimals.len() > MAX_DECIMAL_PLACES {
            return Err(ValidationError::invalid_format(
                "fraction",
                format!("{} has more than {} decimal places", value, MAX_DECIMAL_PLACES),
            ));
        }

        let denominator = 10u64.pow(decimals.len() as u32);
        let digits = format!("{}{}", whole, decimals);
        let numerator = digits.parse::<u64>().map_err(|e| {
            ValidationError::invalid_format("fraction", format!("{}: {}", value, e))
        })?;
        Self::new(numerator, denominator)
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Approximate value for display and serialization.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// True when `part / whole` is at or above this fraction.
    ///
    /// Compared by cross-multiplication; `whole == 0` reads as zero.
    pub fn is_met_by(&self, part: u64, whole: u64) -> bool {
        if whole == 0 {
            return self.numerator == 0;
        }
        u128::from(part) * u128::from(self.denominator)
            >= u128::from(self.numerator) * u128::from(whole)
    }
}

impl TryFrom<f64> for Fraction {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_decimal(value)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> Self {
        f.as_f64()
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (u128::from(self.numerator) * u128::from(other.denominator))
            .cmp(&(u128::from(other.numerator) * u128::from(self.denominator)))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
