//! Products Data

use cuantovale::drafts::ValidProduct;
use jiff::Timestamp;

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub unit: String,

    /// Set by the caller at submit time, not by the database.
    pub created_at: Timestamp,
}

impl NewProduct {
    /// Prepare a validated product for storage, stamped with the current time.
    #[must_use]
    pub fn from_valid(product: ValidProduct) -> Self {
        Self {
            uuid: ProductUuid::new(),
            name: product.name,
            unit: product.unit,
            created_at: Timestamp::now(),
        }
    }
}
