//! App Router

use salvo::Router;

use crate::{auth, healthcheck, menu, observability::metrics_handler, prices, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("menu").get(menu::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(products::create::handler),
                )
                .push(Router::with_path("live").get(products::live::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("stores").get(prices::stores::handler))
                        .push(
                            Router::with_path("prices")
                                .get(prices::index::handler)
                                .push(
                                    Router::new()
                                        .hoop(auth::middleware::handler)
                                        .post(prices::create::handler),
                                )
                                .push(Router::with_path("live").get(prices::live::handler))
                                .push(Router::with_path("chart").get(prices::chart::handler)),
                        ),
                ),
        )
}
