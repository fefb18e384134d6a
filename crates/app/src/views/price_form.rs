//! Price creation form with store autocomplete.

use std::{fmt, sync::Arc};

use cuantovale::{
    drafts::PriceDraft,
    stores::{StoreLabel, distinct_stores, suggest},
};
use tracing::{info, warn};

use crate::{
    domain::{
        prices::{PricesService, data::NewPrice, records::PriceRecord},
        products::records::ProductUuid,
    },
    views::{FormError, FormMessage},
};

/// How a price form was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceFormOutcome {
    /// A price was stored; the product list should refresh.
    Saved(PriceRecord),

    /// Closed without saving.
    Cancelled,
}

/// Price entry for one product.
///
/// Only offered to signed-in users. Store suggestions come from the stores
/// the product has already been priced at.
pub struct PriceForm {
    prices: Arc<dyn PricesService>,
    product: ProductUuid,
    draft: PriceDraft,
    known_stores: Vec<StoreLabel>,
    message: Option<FormMessage>,
    saving: bool,
}

impl fmt::Debug for PriceForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceForm")
            .field("product", &self.product)
            .field("draft", &self.draft)
            .field("known_stores", &self.known_stores.len())
            .field("message", &self.message)
            .field("saving", &self.saving)
            .finish_non_exhaustive()
    }
}

impl PriceForm {
    /// An empty form for `product`. Call [`PriceForm::load_suggestions`] to
    /// fill the store autocomplete.
    #[must_use]
    pub fn new(prices: Arc<dyn PricesService>, product: ProductUuid) -> Self {
        Self {
            prices,
            product,
            draft: PriceDraft::default(),
            known_stores: Vec::new(),
            message: None,
            saving: false,
        }
    }

    /// The product being priced.
    #[must_use]
    pub fn product(&self) -> ProductUuid {
        self.product
    }

    #[must_use]
    pub fn draft(&self) -> &PriceDraft {
        &self.draft
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
    }

    pub fn set_store(&mut self, store: impl Into<String>) {
        self.draft.store = store.into();
    }

    /// Error from the last failed submission, if any.
    #[must_use]
    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Collect the stores this product has been priced at.
    ///
    /// A failed lookup leaves the suggestions empty.
    pub async fn load_suggestions(&mut self) {
        self.known_stores = match self.prices.list_prices(self.product).await {
            Ok(prices) => distinct_stores(prices.iter().map(|price| price.store.as_ref())),
            Err(error) => {
                warn!(product = %self.product, "failed to load store suggestions: {error}");

                Vec::new()
            }
        };
    }

    /// Known stores matching what has been typed so far.
    #[must_use]
    pub fn suggestions(&self) -> Vec<&StoreLabel> {
        suggest(&self.known_stores, &self.draft.store)
    }

    /// Replace the store input with a suggested label.
    pub fn choose_suggestion(&mut self, store: &StoreLabel) {
        self.draft.store = store.as_str().to_string();
    }

    /// Validate and store the price. The database stamps the time.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] without writing anything when the price
    /// is not a positive number, or [`FormError::Price`] when the write fails.
    /// The form stays open either way.
    pub async fn submit(&mut self) -> Result<PriceFormOutcome, FormError> {
        self.message = None;
        self.saving = true;

        let result = self.save().await;

        self.saving = false;

        match result {
            Ok(price) => {
                info!(product = %self.product, price = %price.price, "price added");

                self.draft = PriceDraft::default();

                Ok(PriceFormOutcome::Saved(price))
            }
            Err(error) => {
                self.message = Some(FormMessage::from(&error));

                Err(error)
            }
        }
    }

    /// Clear the inputs and close without saving.
    pub fn cancel(&mut self) -> PriceFormOutcome {
        self.draft = PriceDraft::default();
        self.message = None;

        PriceFormOutcome::Cancelled
    }

    async fn save(&self) -> Result<PriceRecord, FormError> {
        let price = self.draft.validate()?;

        self.prices
            .create_price(NewPrice::from_valid(self.product, price))
            .await
            .map_err(FormError::Price)
    }
}

#[cfg(test)]
mod tests {
    use cuantovale::prices::Price;
    use jiff::Timestamp;
    use mockall::predicate::{eq, function};
    use testresult::TestResult;

    use crate::domain::prices::{MockPricesService, PricesServiceError, records::PriceUuid};

    use super::*;

    fn record(product: ProductUuid, price: &str, store: &str) -> TestResult<PriceRecord> {
        Ok(PriceRecord {
            uuid: PriceUuid::new(),
            product_uuid: product,
            price: Price::parse(price)?,
            store: StoreLabel::parse(store),
            created_at: Timestamp::now(),
        })
    }

    #[tokio::test]
    async fn invalid_prices_write_nothing() {
        for input in ["0", "-5", "abc", ""] {
            let mut prices = MockPricesService::new();
            prices.expect_create_price().never();

            let mut form = PriceForm::new(Arc::new(prices), ProductUuid::new());
            form.set_price(input);

            let result = form.submit().await;

            assert!(
                matches!(result, Err(FormError::Invalid(_))),
                "{input:?} should be rejected, got {result:?}"
            );
            assert_eq!(
                form.message().map(FormMessage::text),
                Some("Por favor, ingrese un precio válido.")
            );
        }
    }

    #[tokio::test]
    async fn valid_price_is_saved_with_trimmed_store() -> TestResult {
        let product = ProductUuid::new();
        let saved = record(product, "12.50", "Metro")?;
        let returned = saved.clone();

        let mut prices = MockPricesService::new();
        prices
            .expect_create_price()
            .once()
            .with(function(move |new: &NewPrice| {
                new.product_uuid == product
                    && new.price.to_string() == "12.50"
                    && new.store.as_ref().map(StoreLabel::as_str) == Some("Metro")
            }))
            .returning(move |_| Ok(returned.clone()));

        let mut form = PriceForm::new(Arc::new(prices), product);
        form.set_price("12.50");
        form.set_store("  Metro ");

        let outcome = form.submit().await?;

        assert_eq!(outcome, PriceFormOutcome::Saved(saved));
        assert_eq!(form.draft(), &PriceDraft::default(), "inputs are reset");
        assert!(form.message().is_none(), "no message after saving");

        Ok(())
    }

    #[tokio::test]
    async fn blank_store_is_sent_as_absent() -> TestResult {
        let product = ProductUuid::new();
        let returned = record(product, "3", "")?;

        let mut prices = MockPricesService::new();
        prices
            .expect_create_price()
            .once()
            .with(function(|new: &NewPrice| new.store.is_none()))
            .returning(move |_| Ok(returned.clone()));

        let mut form = PriceForm::new(Arc::new(prices), product);
        form.set_price("3");
        form.set_store("   ");

        form.submit().await?;

        Ok(())
    }

    #[tokio::test]
    async fn backend_failure_keeps_the_form_open() {
        let mut prices = MockPricesService::new();
        prices
            .expect_create_price()
            .once()
            .returning(|_| Err(PricesServiceError::ProductNotFound));

        let mut form = PriceForm::new(Arc::new(prices), ProductUuid::new());
        form.set_price("4.20");

        let result = form.submit().await;

        assert!(
            matches!(result, Err(FormError::Price(PricesServiceError::ProductNotFound))),
            "expected a backend error, got {result:?}"
        );
        assert_eq!(
            form.message().map(FormMessage::text),
            Some("Error al agregar el precio: product not found")
        );
        assert_eq!(form.draft().price, "4.20", "inputs are kept");
    }

    #[tokio::test]
    async fn suggestions_are_distinct_and_filtered() -> TestResult {
        let product = ProductUuid::new();
        let listed = vec![
            record(product, "4", "Metro")?,
            record(product, "5", "Wong")?,
            record(product, "6", "Metro")?,
            record(product, "7", "")?,
            record(product, "8", "Plaza Vea")?,
        ];

        let mut prices = MockPricesService::new();
        prices
            .expect_list_prices()
            .once()
            .with(eq(product))
            .returning(move |_| Ok(listed.clone()));

        let mut form = PriceForm::new(Arc::new(prices), product);
        form.load_suggestions().await;

        let all: Vec<&str> = form.suggestions().into_iter().map(StoreLabel::as_str).collect();

        assert_eq!(all, ["Metro", "Wong", "Plaza Vea"]);

        form.set_store("w");

        let filtered: Vec<&str> = form.suggestions().into_iter().map(StoreLabel::as_str).collect();

        assert_eq!(filtered, ["Wong"]);

        let wong = form
            .suggestions()
            .first()
            .map(|store| (*store).clone())
            .ok_or("expected a suggestion")?;
        form.choose_suggestion(&wong);

        assert_eq!(form.draft().store, "Wong");

        Ok(())
    }

    #[tokio::test]
    async fn failed_suggestion_lookup_degrades_to_empty() {
        let mut prices = MockPricesService::new();
        prices
            .expect_list_prices()
            .once()
            .returning(|_| Err(PricesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut form = PriceForm::new(Arc::new(prices), ProductUuid::new());
        form.load_suggestions().await;

        assert!(form.suggestions().is_empty(), "no suggestions on failure");
        assert!(form.message().is_none(), "lookup failures are not shown");
    }

    #[test]
    fn cancel_resets_the_form() {
        let mut form = PriceForm::new(Arc::new(MockPricesService::new()), ProductUuid::new());
        form.set_price("4");

        assert_eq!(form.cancel(), PriceFormOutcome::Cancelled);
        assert_eq!(form.draft(), &PriceDraft::default());
    }
}
