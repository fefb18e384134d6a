//! Prices Repository

use cuantovale::{prices::Price, stores::StoreLabel};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    prices::{
        data::NewPrice,
        records::{PriceRecord, PriceUuid},
    },
    products::records::ProductUuid,
};

const LIST_PRICES_SQL: &str = include_str!("sql/list_prices.sql");
const CREATE_PRICE_SQL: &str = include_str!("sql/create_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPricesRepository;

impl PgPricesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<PriceRecord>, sqlx::Error> {
        query_as::<Postgres, PriceRecord>(LIST_PRICES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        price: &NewPrice,
    ) -> Result<PriceRecord, sqlx::Error> {
        query_as::<Postgres, PriceRecord>(CREATE_PRICE_SQL)
            .bind(price.uuid.into_uuid())
            .bind(price.product_uuid.into_uuid())
            .bind(price.price.value())
            .bind(price.store.as_ref().map(StoreLabel::as_str))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PriceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = Price::new(row.try_get::<Decimal, _>("price")?).map_err(|error| {
            sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(error),
            }
        })?;

        Ok(Self {
            uuid: PriceUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            price,
            store: row
                .try_get::<Option<String>, _>("store")?
                .as_deref()
                .and_then(StoreLabel::parse),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
