//! Price observations

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{prices::Price, stores::StoreLabel};

/// A single reported price for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Observation identifier.
    pub uuid: Uuid,

    /// Where the price was seen, if reported.
    pub store: Option<StoreLabel>,

    /// The observed price.
    pub price: Price,

    /// When the observation was recorded.
    pub created_at: Timestamp,
}

/// Raised when observations are not in newest-first order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderingError {
    /// The observation at `index` is newer than the one before it.
    #[error("observation {index} is newer than the observation before it")]
    Unordered {
        /// Position of the first out-of-order observation.
        index: usize,
    },
}

/// Observations ordered by `created_at`, newest first.
///
/// The per-store reduction keeps the first observation it sees for each store, so
/// it relies on this ordering to pick the most recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewestFirst {
    observations: Vec<PriceObservation>,
}

impl NewestFirst {
    /// Wraps observations that are already ordered newest first.
    ///
    /// Equal timestamps are allowed in any order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Unordered`] pointing at the first observation
    /// that is newer than its predecessor.
    pub fn try_new(observations: Vec<PriceObservation>) -> Result<Self, OrderingError> {
        Self::check(&observations)?;

        Ok(Self { observations })
    }

    /// Checks that `observations` are newest first without taking them.
    ///
    /// # Errors
    ///
    /// Same as [`NewestFirst::try_new`].
    pub fn check(observations: &[PriceObservation]) -> Result<(), OrderingError> {
        let unordered = observations
            .windows(2)
            .position(|pair| matches!(pair, [newer, older] if older.created_at > newer.created_at));

        match unordered {
            Some(position) => Err(OrderingError::Unordered {
                index: position + 1,
            }),
            None => Ok(()),
        }
    }

    /// Sorts observations newest first. Ties keep their input order.
    pub fn sorted(mut observations: Vec<PriceObservation>) -> Self {
        observations.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self { observations }
    }

    /// The ordered observations.
    pub fn as_slice(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Consumes the wrapper, returning the ordered observations.
    pub fn into_inner(self) -> Vec<PriceObservation> {
        self.observations
    }
}

impl<'a> IntoIterator for &'a NewestFirst {
    type Item = &'a PriceObservation;
    type IntoIter = std::slice::Iter<'a, PriceObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
