//! Product registry.

use cuantovale::{chart::DateFormat, search::SearchQuery};
use tracing::{debug, info};

use crate::{
    context::AppContext,
    domain::products::{ProductsServiceError, records::ProductRecord},
    live::{Change, Subscription, live_query},
    views::{FormError, PriceForm, PriceFormOutcome, PriceHistory},
};

type ProductSnapshot = Result<Vec<ProductRecord>, ProductsServiceError>;

/// The live product list, filtered by the search box.
///
/// Price entry and price history are opened from here.
#[derive(Debug)]
pub struct ProductRegistry {
    context: AppContext,
    format: DateFormat,
    search: SearchQuery,
    products: Vec<ProductRecord>,
    loading: bool,
    error: Option<String>,
    subscription: Option<Subscription<Vec<ProductRecord>, ProductsServiceError>>,
    price_form: Option<PriceForm>,
    history: Option<PriceHistory>,
}

impl ProductRegistry {
    /// Start following the product list.
    #[must_use]
    pub fn mount(context: AppContext, search: &str, format: DateFormat) -> Self {
        let mut registry = Self {
            context,
            format,
            search: SearchQuery::new(search),
            products: Vec::new(),
            loading: true,
            error: None,
            subscription: None,
            price_form: None,
            history: None,
        };

        registry.refresh();

        registry
    }

    /// Drop the current subscription and start a new one.
    pub fn refresh(&mut self) {
        self.subscription = None;
        self.loading = true;

        let products = self.context.products.clone();

        self.subscription = Some(live_query(
            &self.context.feed,
            |change| *change == Change::Products,
            move || {
                let products = products.clone();

                async move { products.list_products().await }
            },
        ));

        debug!("product subscription started");
    }

    /// Change the filter; the list itself is not re-fetched.
    pub fn set_search(&mut self, search: &str) {
        self.search = SearchQuery::new(search);
    }

    /// Products matching the search, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&ProductRecord> {
        self.search.filter(&self.products)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last load error. Cleared by [`ProductRegistry::refresh`].
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Wait for the next product snapshot and apply it.
    ///
    /// Returns `false` once no more updates will arrive.
    pub async fn update(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };

        match subscription.next().await {
            Some(snapshot) => {
                self.apply(snapshot);

                self.subscription.is_some()
            }
            None => {
                self.subscription = None;

                false
            }
        }
    }

    fn apply(&mut self, snapshot: ProductSnapshot) {
        self.loading = false;

        match snapshot {
            Ok(products) => {
                self.products = products;
                self.error = None;
            }
            Err(error) => {
                self.error = Some(format!("Error loading products: {error}"));
                self.subscription = None;
            }
        }
    }

    /// Open price entry for a product. Only offered to signed-in users.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SignedOut`] when nobody is signed in.
    pub async fn open_add_price(
        &mut self,
        product: &ProductRecord,
    ) -> Result<&mut PriceForm, FormError> {
        if self.context.session.current().is_none() {
            return Err(FormError::SignedOut);
        }

        let mut form = PriceForm::new(self.context.prices.clone(), product.uuid);
        form.load_suggestions().await;

        Ok(self.price_form.insert(form))
    }

    #[must_use]
    pub fn price_form(&self) -> Option<&PriceForm> {
        self.price_form.as_ref()
    }

    pub fn price_form_mut(&mut self) -> Option<&mut PriceForm> {
        self.price_form.as_mut()
    }

    /// Submit the open price form. A saved price closes it and refreshes.
    ///
    /// # Errors
    ///
    /// Returns the form's error; the form stays open.
    pub async fn submit_price(&mut self) -> Result<Option<PriceFormOutcome>, FormError> {
        let Some(form) = self.price_form.as_mut() else {
            return Ok(None);
        };

        let outcome = form.submit().await?;

        self.close_price_form(&outcome);

        Ok(Some(outcome))
    }

    pub fn cancel_price(&mut self) {
        if let Some(outcome) = self.price_form.as_mut().map(PriceForm::cancel) {
            self.close_price_form(&outcome);
        }
    }

    fn close_price_form(&mut self, outcome: &PriceFormOutcome) {
        self.price_form = None;

        if let PriceFormOutcome::Saved(price) = outcome {
            info!(product = %price.product_uuid, "price saved, refreshing products");

            self.refresh();
        }
    }

    /// Open the price history of a product.
    pub fn open_history(&mut self, product: &ProductRecord) -> &mut PriceHistory {
        self.history.insert(PriceHistory::mount(
            &self.context,
            product.clone(),
            self.format.clone(),
        ))
    }

    #[must_use]
    pub fn history(&self) -> Option<&PriceHistory> {
        self.history.as_ref()
    }

    pub fn history_mut(&mut self) -> Option<&mut PriceHistory> {
        self.history.as_mut()
    }

    pub fn close_history(&mut self) {
        self.history = None;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use cuantovale::prices::Price;
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        auth::{MockAuthService, Session, User, UserUuid},
        domain::{
            prices::{MockPricesService, records::{PriceRecord, PriceUuid}},
            products::{MockProductsService, records::ProductUuid},
        },
        live::ChangeFeed,
    };

    use super::*;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            unit: "1 kg".to_string(),
            created_at: Timestamp::now(),
        }
    }

    fn rosa() -> User {
        User {
            uuid: UserUuid::new(),
            name: "Rosa".to_string(),
            created_at: Timestamp::now(),
        }
    }

    fn context(
        products: MockProductsService,
        prices: MockPricesService,
        session: Session,
    ) -> AppContext {
        AppContext {
            products: Arc::new(products),
            prices: Arc::new(prices),
            auth: Arc::new(MockAuthService::new()),
            feed: ChangeFeed::new(),
            session,
        }
    }

    async fn update_within(registry: &mut ProductRegistry) -> TestResult<bool> {
        Ok(tokio::time::timeout(Duration::from_secs(5), registry.update()).await?)
    }

    fn names(registry: &ProductRegistry) -> Vec<&str> {
        registry
            .visible()
            .into_iter()
            .map(|product| product.name.as_str())
            .collect()
    }

    #[tokio::test]
    async fn filters_the_live_list_by_search() -> TestResult {
        let listed = vec![product("Cebolla"), product("Papa")];

        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .returning(move || Ok(listed.clone()));

        let mut registry = ProductRegistry::mount(
            context(products, MockPricesService::new(), Session::anonymous()),
            "ceb",
            DateFormat::default(),
        );

        assert!(registry.is_loading(), "loading until the first snapshot");

        update_within(&mut registry).await?;

        assert_eq!(names(&registry), ["Cebolla"]);

        registry.set_search("");

        assert_eq!(names(&registry), ["Cebolla", "Papa"]);

        Ok(())
    }

    #[tokio::test]
    async fn new_products_arrive_through_the_feed() -> TestResult {
        let mut products = MockProductsService::new();
        let mut sequence = mockall::Sequence::new();
        products
            .expect_list_products()
            .once()
            .in_sequence(&mut sequence)
            .returning(|| Ok(vec![product("Papa")]));
        products
            .expect_list_products()
            .once()
            .in_sequence(&mut sequence)
            .returning(|| Ok(vec![product("Cebolla"), product("Papa")]));

        let context = context(products, MockPricesService::new(), Session::anonymous());
        let feed = context.feed.clone();
        let mut registry = ProductRegistry::mount(context, "", DateFormat::default());

        update_within(&mut registry).await?;
        assert_eq!(names(&registry), ["Papa"]);

        feed.publish(Change::Products);

        update_within(&mut registry).await?;
        assert_eq!(names(&registry), ["Cebolla", "Papa"]);

        Ok(())
    }

    #[tokio::test]
    async fn load_error_is_shown_until_refresh() -> TestResult {
        let mut products = MockProductsService::new();
        let mut sequence = mockall::Sequence::new();
        products
            .expect_list_products()
            .once()
            .in_sequence(&mut sequence)
            .returning(|| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));
        products
            .expect_list_products()
            .once()
            .in_sequence(&mut sequence)
            .returning(|| Ok(vec![product("Papa")]));

        let mut registry = ProductRegistry::mount(
            context(products, MockPricesService::new(), Session::anonymous()),
            "",
            DateFormat::default(),
        );

        assert!(!update_within(&mut registry).await?, "errors end the subscription");
        assert_eq!(registry.error(), Some("Error loading products: storage error"));
        assert!(!registry.is_live(), "no automatic retry");

        registry.refresh();
        update_within(&mut registry).await?;

        assert_eq!(registry.error(), None);
        assert_eq!(names(&registry), ["Papa"]);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_replaces_the_live_subscription() -> TestResult {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let mut products = MockProductsService::new();
        products.expect_list_products().returning(move || {
            counted.fetch_add(1, Ordering::SeqCst);

            Ok(vec![product("Papa")])
        });

        let context = context(products, MockPricesService::new(), Session::anonymous());
        let feed = context.feed.clone();
        let mut registry = ProductRegistry::mount(context, "", DateFormat::default());

        update_within(&mut registry).await?;

        registry.refresh();

        tokio::time::timeout(Duration::from_secs(5), async {
            while feed.subscriber_count() != 1 {
                tokio::task::yield_now().await;
            }
        })
        .await?;

        update_within(&mut registry).await?;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        feed.publish(Change::Products);

        update_within(&mut registry).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "only the current subscription re-fetches"
        );
        assert_eq!(feed.subscriber_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn price_entry_requires_a_user() -> TestResult {
        let mut products = MockProductsService::new();
        products.expect_list_products().returning(|| Ok(Vec::new()));

        let mut prices = MockPricesService::new();
        prices.expect_list_prices().never();

        let mut registry = ProductRegistry::mount(
            context(products, prices, Session::anonymous()),
            "",
            DateFormat::default(),
        );

        let result = registry.open_add_price(&product("Papa")).await;

        assert!(
            matches!(result, Err(FormError::SignedOut)),
            "anonymous users cannot add prices"
        );
        assert!(registry.price_form().is_none(), "form stays closed");

        Ok(())
    }

    #[tokio::test]
    async fn saved_price_closes_the_form_and_refreshes() -> TestResult {
        let papa = product("Papa");
        let papa_uuid = papa.uuid;

        let mut products = MockProductsService::new();
        products.expect_list_products().times(2).returning(|| Ok(Vec::new()));

        let mut prices = MockPricesService::new();
        prices.expect_list_prices().once().returning(|_| Ok(Vec::new()));
        prices.expect_create_price().once().returning(move |new| {
            Ok(PriceRecord {
                uuid: PriceUuid::new(),
                product_uuid: papa_uuid,
                price: new.price,
                store: new.store,
                created_at: Timestamp::now(),
            })
        });

        let mut registry = ProductRegistry::mount(
            context(products, prices, Session::signed_in(rosa())),
            "",
            DateFormat::default(),
        );

        update_within(&mut registry).await?;

        registry.open_add_price(&papa).await?.set_price("2.40");

        let outcome = registry.submit_price().await?;
        let expected = Price::parse("2.40")?;

        assert!(
            matches!(outcome, Some(PriceFormOutcome::Saved(ref saved)) if saved.price == expected),
            "expected a saved price, got {outcome:?}"
        );
        assert!(registry.price_form().is_none(), "form closes after saving");
        assert!(registry.is_loading(), "list is refreshing");

        update_within(&mut registry).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_price_keeps_the_form_open() -> TestResult {
        let mut products = MockProductsService::new();
        products.expect_list_products().returning(|| Ok(Vec::new()));

        let mut prices = MockPricesService::new();
        prices.expect_list_prices().once().returning(|_| Ok(Vec::new()));
        prices.expect_create_price().never();

        let mut registry = ProductRegistry::mount(
            context(products, prices, Session::signed_in(rosa())),
            "",
            DateFormat::default(),
        );

        registry.open_add_price(&product("Papa")).await?.set_price("0");

        let result = registry.submit_price().await;

        assert!(
            matches!(result, Err(FormError::Invalid(_))),
            "zero is not a price"
        );
        assert!(registry.price_form().is_some(), "form stays open");

        registry.cancel_price();
        assert!(registry.price_form().is_none(), "cancel closes the form");

        Ok(())
    }

    #[tokio::test]
    async fn history_opens_and_closes() -> TestResult {
        let mut products = MockProductsService::new();
        products.expect_list_products().returning(|| Ok(Vec::new()));

        let mut prices = MockPricesService::new();
        prices.expect_list_prices().returning(|_| Ok(Vec::new()));

        let mut registry = ProductRegistry::mount(
            context(products, prices, Session::anonymous()),
            "",
            DateFormat::default(),
        );

        let papa = product("Papa");
        let history = registry.open_history(&papa);

        tokio::time::timeout(Duration::from_secs(5), history.update()).await?;

        assert_eq!(history.product().uuid, papa.uuid);
        assert!(history.comparison().is_empty(), "no prices yet");

        registry.close_history();
        assert!(registry.history().is_none(), "history closed");

        Ok(())
    }
}
