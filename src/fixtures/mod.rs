//! Fixtures
//!
//! Seed data for local development: a YAML list of products, each with an
//! optional list of observed prices.
//!
//! ```yaml
//! products:
//!   - name: Arroz Costeño
//!     unit: 5 kg
//!     prices:
//!       - price: "21.90"
//!         store: Plaza Vea
//!       - price: "19.50"
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::drafts::{DraftError, PriceDraft, ProductDraft, ValidPrice, ValidProduct};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product or price in the fixture does not validate
    #[error("Invalid fixture entry {index} ({name}): {source}")]
    Invalid {
        /// Position of the product in the file
        index: usize,

        /// Product name as written
        name: String,

        /// Validation failure
        source: DraftError,
    },
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    products: Vec<FixtureProduct>,
}

#[derive(Debug, Deserialize)]
struct FixtureProduct {
    #[serde(flatten)]
    draft: ProductDraft,

    #[serde(default)]
    prices: Vec<PriceDraft>,
}

/// A validated product with its seed prices, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedProduct {
    /// The product.
    pub product: ValidProduct,

    /// Its prices, oldest first.
    pub prices: Vec<ValidPrice>,
}

/// Validated seed data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixture {
    products: Vec<SeedProduct>,
}

impl Fixture {
    /// Reads and validates a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any entry is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parses and validates fixture YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any entry is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let file: FixtureFile = serde_norway::from_str(contents)?;

        let products = file
            .products
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let invalid = |source| FixtureError::Invalid {
                    index,
                    name: entry.draft.name.clone(),
                    source,
                };

                let product = entry.draft.validate().map_err(invalid)?;

                let prices = entry
                    .prices
                    .iter()
                    .map(PriceDraft::validate)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(invalid)?;

                Ok(SeedProduct { product, prices })
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(Self { products })
    }

    /// Seed products in file order.
    pub fn products(&self) -> &[SeedProduct] {
        &self.products
    }

    /// Total number of seed prices.
    pub fn price_count(&self) -> usize {
        self.products.iter().map(|seed| seed.prices.len()).sum()
    }
}
