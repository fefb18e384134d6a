//! Price Chart Handler

use std::sync::Arc;

use cuantovale::chart::LineChart;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    prices::{comparison_of, errors::into_status_error, find_product},
    state::State,
};

/// Price Chart Handler
///
/// Returns a chart.js line chart of the prices shown in the comparison,
/// oldest first.
#[endpoint(
    tags("prices"),
    summary = "Price Trend Chart",
    responses(
        (status_code = StatusCode::OK, description = "Line chart configuration"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found or no prices recorded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = find_product(state, product.into_inner()).await?;

    let prices = state
        .app
        .prices
        .list_prices(product.uuid)
        .await
        .map_err(into_status_error)?;

    let comparison = comparison_of(prices);

    let chart =
        LineChart::price_trend(&product.name, &comparison.observations(), &state.format)
            .ok_or_else(|| StatusError::not_found().brief("No prices recorded"))?;

    res.render(Json(chart));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use cuantovale_app::domain::{
        prices::MockPricesService,
        products::{MockProductsService, records::ProductUuid},
    };

    use crate::test_helpers::prices_service;

    use super::{
        super::tests::{make_price, make_product},
        *,
    };

    fn make_service(uuid: ProductUuid, prices: MockPricesService) -> Service {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(move |_| Ok(make_product(uuid)));

        products.expect_list_products().never();
        products.expect_create_product().never();

        prices_service(
            products,
            prices,
            Router::with_path("products/{product}/prices/chart").get(handler),
        )
    }

    #[tokio::test]
    async fn test_chart_plots_displayed_prices_oldest_first() -> TestResult {
        let uuid = ProductUuid::new();

        let listed = vec![
            make_price(uuid, "5", "Metro", 0)?,
            make_price(uuid, "9", "Metro", 30)?,
            make_price(uuid, "3", "Wong", 60)?,
        ];

        let mut prices = MockPricesService::new();

        prices
            .expect_list_prices()
            .once()
            .return_once(move |_| Ok(listed));

        prices.expect_create_price().never();

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}/prices/chart"))
            .send(&make_service(uuid, prices))
            .await;

        let chart: Value = res.take_json().await?;

        let series = chart
            .pointer("/data/datasets/0/data")
            .and_then(Value::as_array)
            .map(|points| points.iter().filter_map(Value::as_f64).collect::<Vec<_>>());

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(chart.get("type"), Some(&Value::from("line")));
        assert_eq!(series, Some(vec![3.0, 5.0]));

        Ok(())
    }

    #[tokio::test]
    async fn test_chart_without_prices_returns_404() -> TestResult {
        let uuid = ProductUuid::new();
        let mut prices = MockPricesService::new();

        prices
            .expect_list_prices()
            .once()
            .return_once(|_| Ok(Vec::new()));

        prices.expect_create_price().never();

        let res = TestClient::get(format!("http://example.com/products/{uuid}/prices/chart"))
            .send(&make_service(uuid, prices))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
