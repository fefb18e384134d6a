//! Drafts
//!
//! Raw form input and its validation into values that may be written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{prices::Price, stores::StoreLabel};

/// Validation failures for form input. Nothing is written when validation fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// A required product field is blank.
    #[error("Por favor, complete todos los campos.")]
    MissingFields,

    /// The price is not a number greater than zero.
    #[error("Por favor, ingrese un precio válido.")]
    InvalidPrice,
}

/// Product form input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product name.
    pub name: String,

    /// Unit of measure, e.g. `"kg"` or `"1 L"`.
    pub unit: String,
}

/// A product ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    /// Trimmed, non-empty name.
    pub name: String,

    /// Trimmed, non-empty unit.
    pub unit: String,
}

impl ProductDraft {
    /// Creates a draft from the two form fields.
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingFields`] when either field is blank after trimming.
    pub fn validate(&self) -> Result<ValidProduct, DraftError> {
        let name = self.name.trim();
        let unit = self.unit.trim();

        if name.is_empty() || unit.is_empty() {
            return Err(DraftError::MissingFields);
        }

        Ok(ValidProduct {
            name: name.to_string(),
            unit: unit.to_string(),
        })
    }
}

/// Price form input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDraft {
    /// Price text.
    pub price: String,

    /// Optional store text; blank means no store.
    #[serde(default)]
    pub store: String,
}

/// A price observation ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPrice {
    /// Parsed price.
    pub price: Price,

    /// Store label, absent when the field was blank.
    pub store: Option<StoreLabel>,
}

impl PriceDraft {
    /// Creates a draft from the two form fields.
    pub fn new(price: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            store: store.into(),
        }
    }

    /// Validates the draft.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidPrice`] unless the price parses to a number above zero.
    pub fn validate(&self) -> Result<ValidPrice, DraftError> {
        let price = Price::parse(&self.price).map_err(|_error| DraftError::InvalidPrice)?;

        Ok(ValidPrice {
            price,
            store: StoreLabel::parse(&self.store),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_is_trimmed() -> TestResult {
        let valid = ProductDraft::new("  Arroz ", " kg ").validate()?;

        assert_eq!(valid.name, "Arroz");
        assert_eq!(valid.unit, "kg");

        Ok(())
    }

    #[test]
    fn product_with_blank_field_is_rejected() {
        assert_eq!(
            ProductDraft::new("   ", "kg").validate(),
            Err(DraftError::MissingFields)
        );
        assert_eq!(
            ProductDraft::new("Arroz", "").validate(),
            Err(DraftError::MissingFields)
        );
    }

    #[test]
    fn missing_fields_message() {
        assert_eq!(
            DraftError::MissingFields.to_string(),
            "Por favor, complete todos los campos."
        );
    }

    #[test]
    fn price_with_blank_store_has_no_store() -> TestResult {
        let valid = PriceDraft::new("4.50", "   ").validate()?;

        assert_eq!(valid.price.value(), Decimal::new(45, 1));
        assert_eq!(valid.store, None);

        Ok(())
    }

    #[test]
    fn price_store_is_trimmed() -> TestResult {
        let valid = PriceDraft::new("4", " Metro ").validate()?;

        assert_eq!(valid.store.as_ref().map(StoreLabel::as_str), Some("Metro"));

        Ok(())
    }

    #[test]
    fn invalid_prices_are_rejected() {
        for input in ["", "abc", "0", "-3"] {
            assert_eq!(
                PriceDraft::new(input, "Metro").validate(),
                Err(DraftError::InvalidPrice),
                "{input:?} should be rejected"
            );
        }

        assert_eq!(
            DraftError::InvalidPrice.to_string(),
            "Por favor, ingrese un precio válido."
        );
    }
}
