//! Store Suggestions Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cuantovale_app::{domain::products::records::ProductUuid, views::PriceForm};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoresResponse {
    /// Stores this product has been priced at that match the query
    pub stores: Vec<String>,
}

/// Store Suggestions Handler
///
/// Autocomplete for the store field of the price form. A failed lookup yields
/// no suggestions rather than an error.
#[endpoint(
    tags("prices"),
    summary = "Suggest Stores",
    responses(
        (status_code = StatusCode::OK, description = "Matching stores"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<StoresResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let mut form = PriceForm::new(
        state.app.prices.clone(),
        ProductUuid::from_uuid(product.into_inner()),
    );

    form.set_store(q.into_inner().unwrap_or_default());
    form.load_suggestions().await;

    Ok(Json(StoresResponse {
        stores: form
            .suggestions()
            .into_iter()
            .map(|store| store.as_str().to_owned())
            .collect(),
    }))
}
