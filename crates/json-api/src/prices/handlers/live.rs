//! Live Price Comparison Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use cuantovale_app::live::{Change, live_query};

use crate::{
    extensions::*,
    live,
    prices::{comparison_of, find_product, index::ComparisonResponse},
    state::State,
};

/// Event name of each comparison snapshot.
pub(crate) const EVENT: &str = "prices";

/// Live Price Comparison Handler
///
/// Streams the product's price comparison as server-sent events, once now and
/// again after every price recorded for it.
#[endpoint(
    tags("prices"),
    summary = "Follow Price Comparison",
    responses(
        (status_code = StatusCode::OK, description = "Event stream of price comparisons"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = find_product(state, product.into_inner()).await?.uuid;
    let prices = state.app.prices.clone();

    let subscription = live_query(
        &state.app.feed,
        move |change| *change == Change::Prices(product),
        move || {
            let prices = prices.clone();

            async move {
                prices.list_prices(product).await.map(|listed| {
                    ComparisonResponse::new(product.into_uuid(), &comparison_of(listed))
                })
            }
        },
    );

    live::stream(res, EVENT, subscription, state);

    Ok(())
}
