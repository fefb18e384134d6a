//! Price comparison
//!
//! Reduces a product's price history to the most recent observation per store,
//! keeps at most [`MAX_STORES`] of them and ranks what is left from cheapest to
//! most expensive.

use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    observations::{NewestFirst, PriceObservation},
    stores::StoreKey,
};

pub mod table;

/// Maximum number of stores shown in a comparison.
pub const MAX_STORES: usize = 10;

/// Number of cheapest entries that are ranked and highlighted.
pub const HIGHLIGHTED: usize = 3;

/// One store's latest price within a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPrice {
    /// The latest observation for the store.
    pub observation: PriceObservation,

    /// Position among the cheapest entries, starting at 1.
    pub rank: Option<u8>,

    /// Whether the entry is one of the cheapest.
    pub highlighted: bool,
}

/// Latest price per store, cheapest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceComparison {
    entries: SmallVec<[RankedPrice; MAX_STORES]>,
}

impl PriceComparison {
    /// Entries in ascending price order.
    pub fn entries(&self) -> &[RankedPrice] {
        &self.entries
    }

    /// Number of stores shown.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to compare.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cheapest entry, if any.
    pub fn cheapest(&self) -> Option<&RankedPrice> {
        self.entries.first()
    }

    /// The observations in display order, for charting.
    pub fn observations(&self) -> Vec<PriceObservation> {
        self.entries
            .iter()
            .map(|entry| entry.observation.clone())
            .collect()
    }
}

/// Builds the comparison shown in a product's price history.
///
/// The first observation seen for each store wins, which is the most recent one
/// because the input is newest first. Observations without a store are grouped
/// together. The reduced set is truncated to [`MAX_STORES`] before being sorted
/// by price; the sort is stable, so equal prices keep their recency order.
pub fn compare(observations: &NewestFirst) -> PriceComparison {
    let mut seen = FxHashSet::default();

    let mut latest: SmallVec<[&PriceObservation; MAX_STORES]> = observations
        .into_iter()
        .filter(|observation| seen.insert(StoreKey::of(observation.store.as_ref())))
        .take(MAX_STORES)
        .collect();

    latest.sort_by_key(|observation| observation.price);

    let entries = latest
        .into_iter()
        .enumerate()
        .map(|(position, observation)| {
            let highlighted = position < HIGHLIGHTED;

            RankedPrice {
                observation: observation.clone(),
                rank: highlighted
                    .then(|| u8::try_from(position + 1).ok())
                    .flatten(),
                highlighted,
            }
        })
        .collect();

    PriceComparison { entries }
}
