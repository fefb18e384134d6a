//! Test helpers.

use std::sync::Arc;

use cuantovale::chart::DateFormat;
use cuantovale_app::{
    auth::{MockAuthService, Session, User, UserUuid},
    context::AppContext,
    domain::{prices::MockPricesService, products::MockProductsService},
    live::ChangeFeed,
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_user() -> User {
    User {
        uuid: TEST_USER_UUID,
        name: "Rosa".to_owned(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();

    products
}

fn strict_prices_mock() -> MockPricesService {
    let mut prices = MockPricesService::new();

    prices.expect_list_prices().never();
    prices.expect_create_price().never();

    prices
}

pub(crate) fn state(
    products: MockProductsService,
    prices: MockPricesService,
    auth: MockAuthService,
) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        prices: Arc::new(prices),
        auth: Arc::new(auth),
        feed: ChangeFeed::new(),
        session: Session::anonymous(),
    };

    State::new(app, DateFormat::default()).into_shared()
}

/// State whose services must not be called.
pub(crate) fn idle_state() -> Arc<State> {
    state(strict_products_mock(), strict_prices_mock(), strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_products_mock(), strict_prices_mock(), auth)
}

pub(crate) fn products_state(products: MockProductsService) -> Arc<State> {
    state(products, strict_prices_mock(), strict_auth_mock())
}

pub(crate) fn prices_state(products: MockProductsService, prices: MockPricesService) -> Arc<State> {
    state(products, prices, strict_auth_mock())
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn signed_in_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(products_state(products), route)
}

pub(crate) fn signed_in_products_service(products: MockProductsService, route: Router) -> Service {
    signed_in_service(products_state(products), route)
}

pub(crate) fn prices_service(
    products: MockProductsService,
    prices: MockPricesService,
    route: Router,
) -> Service {
    service(prices_state(products, prices), route)
}

pub(crate) fn signed_in_prices_service(
    products: MockProductsService,
    prices: MockPricesService,
    route: Router,
) -> Service {
    signed_in_service(prices_state(products, prices), route)
}
