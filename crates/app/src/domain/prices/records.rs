//! Price Records

use cuantovale::{
    observations::{NewestFirst, PriceObservation},
    prices::Price,
    stores::StoreLabel,
};
use jiff::Timestamp;
use serde::Serialize;
use tracing::warn;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Price UUID
pub type PriceUuid = TypedUuid<PriceRecord>;

/// Price Record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub uuid: PriceUuid,
    pub product_uuid: ProductUuid,
    pub price: Price,
    pub store: Option<StoreLabel>,
    pub created_at: Timestamp,
}

impl From<PriceRecord> for PriceObservation {
    fn from(record: PriceRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            store: record.store,
            price: record.price,
            created_at: record.created_at,
        }
    }
}

/// Convert listed prices into observations ordered newest first.
///
/// Listings already arrive newest first; anything else is re-sorted with a
/// warning rather than rejected.
#[must_use]
pub fn newest_first(records: Vec<PriceRecord>) -> NewestFirst {
    let observations: Vec<PriceObservation> =
        records.into_iter().map(PriceObservation::from).collect();

    if let Err(error) = NewestFirst::check(&observations) {
        warn!("re-sorting price listing: {error}");
    }

    // Stable sort: an ordered listing is a single run and comes back unchanged.
    NewestFirst::sorted(observations)
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use super::*;

    fn record(price: &str, created_at: Timestamp) -> TestResult<PriceRecord> {
        Ok(PriceRecord {
            uuid: PriceUuid::new(),
            product_uuid: ProductUuid::new(),
            price: Price::parse(price)?,
            store: StoreLabel::parse("Metro"),
            created_at,
        })
    }

    #[test]
    fn out_of_order_listing_is_resorted() -> TestResult {
        let now = Timestamp::now();
        let older = record("5", now - 1.hour())?;
        let newer = record("4", now)?;

        let ordered = newest_first(vec![older.clone(), newer.clone()]);

        let uuids: Vec<_> = ordered.as_slice().iter().map(|obs| obs.uuid).collect();

        assert_eq!(uuids, [newer.uuid.into_uuid(), older.uuid.into_uuid()]);

        Ok(())
    }

    #[test]
    fn ordered_listing_keeps_tie_order() -> TestResult {
        let now = Timestamp::now();
        let first = record("3", now)?;
        let second = record("2", now)?;
        let oldest = record("1", now - 1.day())?;

        let ordered = newest_first(vec![first.clone(), second.clone(), oldest.clone()]);

        let uuids: Vec<_> = ordered.as_slice().iter().map(|obs| obs.uuid).collect();

        assert_eq!(
            uuids,
            [
                first.uuid.into_uuid(),
                second.uuid.into_uuid(),
                oldest.uuid.into_uuid()
            ]
        );

        Ok(())
    }
}
