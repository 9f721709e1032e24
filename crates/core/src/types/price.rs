//! Whole-unit prices and line quantities.
//!
//! The menu is priced in whole Kenyan shillings, so amounts are plain
//! integers with no fractional part. Display always uses the fixed
//! `KSh` label followed by the bare integer (e.g. `KSh 150`), with no
//! locale-aware grouping.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency label prefixed to every rendered amount.
pub const CURRENCY_LABEL: &str = "KSh";

/// A non-negative amount in whole currency units.
///
/// Arithmetic saturates instead of overflowing; cart sizes are human-scale
/// so the ceiling is never reached in practice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero shillings.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The bare amount, without the currency label.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity.get())))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_LABEL} {}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Quantity error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units on a line, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Zero` if `value` is 0.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(value))
        }
    }

    /// The raw count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// One more unit.
    #[must_use]
    pub const fn increased(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, never dropping below one.
    #[must_use]
    pub const fn decreased(self) -> Self {
        if self.0 > 1 { Self(self.0 - 1) } else { self }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
