//! Test Helpers

use cuantovale::drafts::{PriceDraft, ProductDraft};
use jiff::Timestamp;
use testresult::TestResult;

use crate::{
    domain::{
        prices::data::NewPrice,
        products::{
            ProductsService, ProductsServiceError, data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

/// Now, truncated to the microsecond precision Postgres stores.
pub(crate) fn now_micros() -> Timestamp {
    Timestamp::from_microsecond(Timestamp::now().as_microsecond())
        .expect("current time is in range")
}

pub(crate) fn new_product(name: &str, unit: &str) -> NewProduct {
    let product = ProductDraft::new(name, unit)
        .validate()
        .expect("test product should be valid");

    NewProduct {
        created_at: now_micros(),
        ..NewProduct::from_valid(product)
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products.create_product(new_product(name, "kg")).await
}

pub(crate) fn new_price(product: ProductUuid, price: &str, store: &str) -> TestResult<NewPrice> {
    let valid = PriceDraft {
        price: price.to_string(),
        store: store.to_string(),
    }
    .validate()?;

    Ok(NewPrice::from_valid(product, valid))
}
