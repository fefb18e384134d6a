//! Product Index Handler

use std::sync::Arc;

use cuantovale::search::SearchQuery;
use cuantovale_app::domain::products::records::ProductRecord;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products, newest first
    pub products: Vec<ProductResponse>,
}

impl ProductsResponse {
    pub(crate) fn matching<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductRecord>,
    {
        Self {
            products: products
                .into_iter()
                .cloned()
                .map(ProductResponse::from)
                .collect(),
        }
    }
}

/// Product Index Handler
///
/// Returns the products whose name contains `q`, ignoring case.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let search = SearchQuery::new(q.into_inner().as_deref().unwrap_or_default());

    let products = state
        .app
        .products
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(ProductsResponse::matching(search.filter(&products))))
}
