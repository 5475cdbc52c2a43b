//! Fixed-point arithmetic for weights and weighted scores.
//!
//! Values are stored in micro units (10^-6). Configuration decimals are
//! accepted with at most three fractional digits, so the product of two
//! configured values (weight × multiplier) is still exact in micro units,
//! and so is its product with an integer affinity score.

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

pub const SCALE: u64 = 1_000_000;

/// Largest decimal accepted from configuration. Keeps `value × 1000` well
/// inside the range where f64 still resolves a milli unit.
pub const MAX_DECIMAL: f64 = 1.0e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(u64);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(SCALE);

    pub const fn from_micros(micros: u64) -> Self {
        Fixed(micros)
    }

    pub const fn from_int(value: u64) -> Self {
        Fixed(value * SCALE)
    }

    /// Parse a configuration decimal with at most three fractional digits.
    ///
    /// Returns `None` for negative, non-finite, oversized or finer-grained
    /// values.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 || value > MAX_DECIMAL {
            return None;
        }
        let millis = value * 1000.0;
        let rounded = millis.round();
        if (millis - rounded).abs() > 1e-6 {
            return None;
        }
        Some(Fixed(rounded as u64 * 1000))
    }

    pub fn micros(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Product of two values. Exact while both operands carry at most three
    /// fractional digits, which holds for everything built by
    /// [`Fixed::from_decimal`]. Saturates on overflow; the table loaders cap
    /// weights and multipliers so a full weighted row never gets there.
    pub fn mul_exact(self, other: Fixed) -> Fixed {
        let product = self.0 as u128 * other.0 as u128 / SCALE as u128;
        Fixed(u64::try_from(product).unwrap_or(u64::MAX))
    }

    /// Scale by an integer affinity score.
    pub fn times(self, score: u8) -> Fixed {
        Fixed(self.0.saturating_mul(score as u64))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Fixed>>(iter: I) -> Fixed {
        iter.fold(Fixed::ZERO, Add::add)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            let digits = format!("{:06}", frac);
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
