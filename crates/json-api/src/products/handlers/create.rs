//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use cuantovale_app::views::ProductForm;

use crate::{extensions::*, forms, products::get::ProductResponse, state::State};

/// Create Product Request
///
/// Fields are taken as typed; blank fields are rejected.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Product name
    #[serde(default)]
    pub name: String,

    /// Unit of measure
    #[serde(default)]
    pub unit: String,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "A field is blank"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let request = json.into_inner();

    let mut form = ProductForm::new(state.app.products.clone());

    form.set_name(request.name);
    form.set_unit(request.unit);

    let product = form.submit().await.map_err(forms::into_status_error)?;

    info!(user = %user.uuid, product = %product.uuid, "product created over http");

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cuantovale_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductRecord,
    };

    use crate::test_helpers::{products_service, signed_in_products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        signed_in_products_service(repo, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| new.name == "Arroz Costeño" && new.unit == "5 kg")
            .return_once(|new| {
                Ok(ProductRecord {
                    uuid: new.uuid,
                    name: new.name,
                    unit: new.unit,
                    created_at: new.created_at,
                })
            });

        repo.expect_get_product().never();
        repo.expect_list_products().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": " Arroz Costeño ", "unit": "5 kg" }))
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.uuid)));
        assert_eq!(body.name, "Arroz Costeño");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_blank_field_returns_400_with_message() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Arroz", "unit": "  " }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string()
                .await?
                .contains("Por favor, complete todos los campos."),
            "validation message should be returned"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_conflict_returns_409() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        repo.expect_get_product().never();
        repo.expect_list_products().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Arroz", "unit": "kg" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_user_returns_401() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();
        repo.expect_get_product().never();
        repo.expect_list_products().never();

        let service = products_service(repo, Router::with_path("products").post(handler));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Arroz", "unit": "kg" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
