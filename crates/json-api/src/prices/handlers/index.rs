//! Price Comparison Handler

use std::sync::Arc;

use cuantovale::comparison::{PriceComparison, RankedPrice};
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    prices::{comparison_of, errors::into_status_error, find_product},
    state::State,
};

/// One store's latest price.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct RankedPriceResponse {
    /// Price observation identifier
    pub uuid: Uuid,

    /// Store the price was seen at, if reported
    pub store: Option<String>,

    /// Observed price
    pub price: String,

    /// When the price was recorded
    pub created_at: String,

    /// Position among the cheapest entries, starting at 1
    pub rank: Option<u8>,

    /// Whether the entry is one of the cheapest
    pub highlighted: bool,
}

impl From<&RankedPrice> for RankedPriceResponse {
    fn from(entry: &RankedPrice) -> Self {
        let observation = &entry.observation;

        RankedPriceResponse {
            uuid: observation.uuid,
            store: observation.store.as_ref().map(ToString::to_string),
            price: observation.price.to_string(),
            created_at: observation.created_at.to_string(),
            rank: entry.rank,
            highlighted: entry.highlighted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ComparisonResponse {
    /// The product being compared
    pub product: Uuid,

    /// Latest price per store, cheapest first
    pub entries: Vec<RankedPriceResponse>,
}

impl ComparisonResponse {
    pub(crate) fn new(product: Uuid, comparison: &PriceComparison) -> Self {
        Self {
            product,
            entries: comparison
                .entries()
                .iter()
                .map(RankedPriceResponse::from)
                .collect(),
        }
    }
}

/// Price Comparison Handler
///
/// Returns the latest price per store for a product, cheapest first. At most
/// ten stores are listed and the three cheapest are ranked.
#[endpoint(
    tags("prices"),
    summary = "Compare Prices",
    responses(
        (status_code = StatusCode::OK, description = "Price comparison"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ComparisonResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = find_product(state, product.into_inner()).await?;

    let prices = state
        .app
        .prices
        .list_prices(product.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ComparisonResponse::new(
        product.uuid.into_uuid(),
        &comparison_of(prices),
    )))
}
