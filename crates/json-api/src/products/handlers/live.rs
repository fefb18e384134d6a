//! Live Products Handler

use std::sync::Arc;

use cuantovale::search::SearchQuery;
use salvo::{oapi::extract::QueryParam, prelude::*};

use cuantovale_app::live::{Change, live_query};

use crate::{extensions::*, live, products::index::ProductsResponse, state::State};

/// Event name of each product snapshot.
pub(crate) const EVENT: &str = "products";

/// Live Products Handler
///
/// Streams the products matching `q` as server-sent events, once now and again
/// after every product change.
#[endpoint(
    tags("products"),
    summary = "Follow Products",
    responses(
        (status_code = StatusCode::OK, description = "Event stream of product lists"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let search = SearchQuery::new(q.into_inner().as_deref().unwrap_or_default());
    let products = state.app.products.clone();

    let subscription = live_query(
        &state.app.feed,
        |change| *change == Change::Products,
        move || {
            let products = products.clone();
            let search = search.clone();

            async move {
                products
                    .list_products()
                    .await
                    .map(|all| ProductsResponse::matching(search.filter(&all)))
            }
        },
    );

    live::stream(res, EVENT, subscription, state);

    Ok(())
}
