//! Price Handlers

use std::sync::Arc;

use cuantovale::comparison::{PriceComparison, compare};
use salvo::prelude::StatusError;
use uuid::Uuid;

use cuantovale_app::domain::{
    prices::records::{PriceRecord, newest_first},
    products::records::{ProductRecord, ProductUuid},
};

use crate::{products::errors::into_status_error, state::State};

pub(crate) mod chart;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod live;
pub(crate) mod stores;

/// Latest price per store, cheapest first.
pub(crate) fn comparison_of(prices: Vec<PriceRecord>) -> PriceComparison {
    compare(&newest_first(prices))
}

/// The product a price route refers to, or 404.
pub(crate) async fn find_product(state: &Arc<State>, uuid: Uuid) -> Result<ProductRecord, StatusError> {
    state
        .app
        .products
        .get_product(ProductUuid::from_uuid(uuid))
        .await
        .map_err(into_status_error)
}
