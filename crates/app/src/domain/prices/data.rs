//! Prices Data

use cuantovale::{drafts::ValidPrice, prices::Price, stores::StoreLabel};

use crate::domain::{prices::records::PriceUuid, products::records::ProductUuid};

/// New Price Data
///
/// The creation time is assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    pub uuid: PriceUuid,
    pub product_uuid: ProductUuid,
    pub price: Price,
    pub store: Option<StoreLabel>,
}

impl NewPrice {
    /// Prepare a validated price observation for storage.
    #[must_use]
    pub fn from_valid(product_uuid: ProductUuid, price: ValidPrice) -> Self {
        Self {
            uuid: PriceUuid::new(),
            product_uuid,
            price: price.price,
            store: price.store,
        }
    }
}
