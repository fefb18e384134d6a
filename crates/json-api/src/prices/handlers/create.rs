//! Create Price Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use cuantovale_app::{
    domain::{prices::records::PriceRecord, products::records::ProductUuid},
    views::{PriceForm, PriceFormOutcome},
};

use crate::{extensions::*, forms, state::State};

/// Create Price Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePriceRequest {
    /// Price as typed, e.g. "4.50"
    #[serde(default)]
    pub price: String,

    /// Store the price was seen at; blank or missing means none
    #[serde(default)]
    pub store: Option<String>,
}

/// Price Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceResponse {
    /// Price observation identifier
    pub uuid: Uuid,

    /// The product the price is for
    pub product: Uuid,

    /// Observed price
    pub price: String,

    /// Store the price was seen at
    pub store: Option<String>,

    /// When the price was recorded
    pub created_at: String,
}

impl From<PriceRecord> for PriceResponse {
    fn from(price: PriceRecord) -> Self {
        PriceResponse {
            uuid: price.uuid.into_uuid(),
            product: price.product_uuid.into_uuid(),
            price: price.price.to_string(),
            store: price.store.map(|store| store.as_str().to_owned()),
            created_at: price.created_at.to_string(),
        }
    }
}

/// Create Price Handler
#[endpoint(
    tags("prices"),
    summary = "Add Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Price recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Price is not a positive number"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreatePriceRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PriceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let product = ProductUuid::from_uuid(product.into_inner());
    let request = json.into_inner();

    let mut form = PriceForm::new(state.app.prices.clone(), product);

    form.set_price(request.price);
    form.set_store(request.store.unwrap_or_default());

    let PriceFormOutcome::Saved(price) = form.submit().await.map_err(forms::into_status_error)?
    else {
        return Err(StatusError::internal_server_error());
    };

    info!(user = %user.uuid, product = %product, price = %price.price, "price recorded over http");

    res.add_header(LOCATION, format!("/products/{product}/prices"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(price.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cuantovale_app::domain::{
        prices::{MockPricesService, PricesServiceError},
        products::MockProductsService,
    };

    use crate::test_helpers::{prices_service, signed_in_prices_service};

    use super::*;

    fn strict_products() -> MockProductsService {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();
        products.expect_get_product().never();
        products.expect_create_product().never();

        products
    }

    fn route() -> Router {
        Router::with_path("products/{product}/prices").post(handler)
    }

    #[tokio::test]
    async fn test_create_price_success() -> TestResult {
        let product = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices
            .expect_create_price()
            .once()
            .withf(move |new| {
                new.product_uuid == product
                    && new.price.to_string() == "4.50"
                    && new.store.as_ref().map(|s| s.as_str()) == Some("Metro")
            })
            .return_once(|new| {
                Ok(PriceRecord {
                    uuid: new.uuid,
                    product_uuid: new.product_uuid,
                    price: new.price,
                    store: new.store,
                    created_at: jiff::Timestamp::UNIX_EPOCH,
                })
            });

        prices.expect_list_prices().never();

        let mut res = TestClient::post(format!("http://example.com/products/{product}/prices"))
            .json(&json!({ "price": "4.50", "store": " Metro " }))
            .send(&signed_in_prices_service(strict_products(), prices, route()))
            .await;

        let body: PriceResponse = res.take_json().await?;
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{product}/prices")));
        assert_eq!(body.product, product.into_uuid());
        assert_eq!(body.price, "4.50");
        assert_eq!(body.store.as_deref(), Some("Metro"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_store_is_recorded_without_one() -> TestResult {
        let product = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices
            .expect_create_price()
            .once()
            .withf(|new| new.store.is_none())
            .return_once(|new| {
                Ok(PriceRecord {
                    uuid: new.uuid,
                    product_uuid: new.product_uuid,
                    price: new.price,
                    store: new.store,
                    created_at: jiff::Timestamp::UNIX_EPOCH,
                })
            });

        prices.expect_list_prices().never();

        let res = TestClient::post(format!("http://example.com/products/{product}/prices"))
            .json(&json!({ "price": "3" }))
            .send(&signed_in_prices_service(strict_products(), prices, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_positive_price_returns_400() -> TestResult {
        let product = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices.expect_create_price().never();
        prices.expect_list_prices().never();

        let mut res = TestClient::post(format!("http://example.com/products/{product}/prices"))
            .json(&json!({ "price": "0", "store": "Metro" }))
            .send(&signed_in_prices_service(strict_products(), prices, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string().await?.contains("ingrese un precio"),
            "validation message should be returned"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let product = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices
            .expect_create_price()
            .once()
            .return_once(|_| Err(PricesServiceError::ProductNotFound));

        prices.expect_list_prices().never();

        let res = TestClient::post(format!("http://example.com/products/{product}/prices"))
            .json(&json!({ "price": "2.10" }))
            .send(&signed_in_prices_service(strict_products(), prices, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_without_user_returns_401() -> TestResult {
        let product = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices.expect_create_price().never();
        prices.expect_list_prices().never();

        let res = TestClient::post(format!("http://example.com/products/{product}/prices"))
            .json(&json!({ "price": "2.10" }))
            .send(&prices_service(strict_products(), prices, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
