//! Prices

use std::{fmt, ops::Deref, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a price from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The input was empty or only whitespace.
    #[error("price is empty")]
    Empty,

    /// The input is not a decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),

    /// The number is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,

    /// A positive number too large or too precise to store exactly.
    #[error("price is outside the supported range: {0}")]
    OutOfRange(String),
}

/// An observed price, always strictly greater than zero.
///
/// Backed by a 96-bit [`Decimal`]: at most 28 fractional digits and a magnitude
/// below about `7.9e28`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// Wraps a decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] when `value` is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        Ok(Self { value })
    }

    /// Parses a price typed by a user.
    ///
    /// Surrounding whitespace is ignored. Plain decimal notation is tried first,
    /// then scientific notation (`1e2`). Digit separators are not accepted.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Empty`]: nothing but whitespace was entered.
    /// - [`PriceError::NotANumber`]: the input is not a finite number.
    /// - [`PriceError::NotPositive`]: the number is zero or negative.
    /// - [`PriceError::OutOfRange`]: the number is positive but does not fit a
    ///   [`Decimal`] without becoming zero or overflowing.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        // `Decimal` accepts `1_000`; `f64` does not, and it reads `inf`/`NaN`.
        let approximate = trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| PriceError::NotANumber(trimmed.to_string()))?;

        // Judge the sign from the text: `f64` underflows `1e-400` to zero.
        let nonzero = trimmed
            .split(['e', 'E'])
            .next()
            .is_some_and(|mantissa| mantissa.contains(|ch| matches!(ch, '1'..='9')));

        if approximate.is_sign_negative() || !nonzero {
            return Err(PriceError::NotPositive);
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_plain| Decimal::from_scientific(trimmed))
            .ok()
            .filter(|value| !value.is_zero())
            .ok_or_else(|| PriceError::OutOfRange(trimmed.to_string()))?;

        Self::new(value.normalize())
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.value
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}
