//! Prices service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        prices::{
            data::NewPrice, errors::PricesServiceError, records::PriceRecord,
            repository::PgPricesRepository,
        },
        products::records::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgPricesService {
    db: Db,
    repository: PgPricesRepository,
}

impl PgPricesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPricesRepository::new(),
        }
    }
}

#[async_trait]
impl PricesService for PgPricesService {
    async fn list_prices(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PriceRecord>, PricesServiceError> {
        let mut tx = self.db.begin().await?;

        let prices = self.repository.list_prices(&mut tx, product).await?;

        tx.commit().await?;

        Ok(prices)
    }

    async fn create_price(&self, price: NewPrice) -> Result<PriceRecord, PricesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_price(&mut tx, &price).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait PricesService: Send + Sync {
    /// Retrieves a product's price observations, newest first.
    async fn list_prices(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PriceRecord>, PricesServiceError>;

    /// Records a price observation. The database assigns `created_at`.
    async fn create_price(&self, price: NewPrice) -> Result<PriceRecord, PricesServiceError>;
}
