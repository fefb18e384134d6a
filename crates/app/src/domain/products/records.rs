//! Product Records

use cuantovale::search::Named;
use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub unit: String,
    pub created_at: Timestamp,
}

impl Named for ProductRecord {
    fn name(&self) -> &str {
        &self.name
    }
}
