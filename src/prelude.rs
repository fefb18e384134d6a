//! CuantoVale prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    chart::{DateFormat, DateLocale, LineChart},
    comparison::{HIGHLIGHTED, MAX_STORES, PriceComparison, RankedPrice, compare},
    drafts::{DraftError, PriceDraft, ProductDraft, ValidPrice, ValidProduct},
    fixtures::{Fixture, FixtureError, SeedProduct},
    observations::{NewestFirst, OrderingError, PriceObservation},
    prices::{Price, PriceError},
    search::{Named, SearchQuery},
    stores::{StoreKey, StoreLabel, distinct_stores, suggest},
};
