//! Price history and store comparison for one product.

use cuantovale::{
    chart::DateFormat,
    comparison::{PriceComparison, compare},
};
use tracing::debug;

use crate::{
    context::AppContext,
    domain::{
        prices::{
            PricesServiceError,
            records::{PriceRecord, newest_first},
        },
        products::records::ProductRecord,
    },
    live::{Change, Subscription, live_query},
    views::PriceTrend,
};

type PriceSnapshot = Result<Vec<PriceRecord>, PricesServiceError>;

/// A product's latest price per store, cheapest first, kept live.
///
/// Dropping the view ends its subscription.
#[derive(Debug)]
pub struct PriceHistory {
    product: ProductRecord,
    format: DateFormat,
    comparison: PriceComparison,
    loading: bool,
    error: Option<String>,
    subscription: Option<Subscription<Vec<PriceRecord>, PricesServiceError>>,
    trend: Option<PriceTrend>,
}

impl PriceHistory {
    /// Start following the prices of `product`.
    #[must_use]
    pub fn mount(context: &AppContext, product: ProductRecord, format: DateFormat) -> Self {
        let prices = context.prices.clone();
        let product_uuid = product.uuid;

        let subscription = live_query(
            &context.feed,
            move |change| *change == Change::Prices(product_uuid),
            move || {
                let prices = prices.clone();

                async move { prices.list_prices(product_uuid).await }
            },
        );

        Self {
            product,
            format,
            comparison: PriceComparison::default(),
            loading: true,
            error: None,
            subscription: Some(subscription),
            trend: None,
        }
    }

    #[must_use]
    pub fn product(&self) -> &ProductRecord {
        &self.product
    }

    #[must_use]
    pub fn comparison(&self) -> &PriceComparison {
        &self.comparison
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether updates are still arriving.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }

    /// Wait for the next snapshot and apply it.
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

    /// Apply whatever snapshots have already arrived.
    pub fn apply_pending(&mut self) {
        while let Some(snapshot) = self
            .subscription
            .as_mut()
            .and_then(Subscription::try_next)
        {
            self.apply(snapshot);
        }
    }

    fn apply(&mut self, snapshot: PriceSnapshot) {
        self.loading = false;

        match snapshot {
            Ok(records) => {
                self.comparison = compare(&newest_first(records));
                self.error = None;

                debug!(
                    product = %self.product.uuid,
                    stores = self.comparison.len(),
                    "price comparison updated"
                );
            }
            Err(error) => {
                self.error = Some(format!("Error loading prices: {error}"));
                self.subscription = None;
            }
        }
    }

    /// Open the trend chart over the entries currently shown.
    pub fn open_chart(&mut self) -> &PriceTrend {
        self.trend.insert(PriceTrend::new(
            &self.product.name,
            &self.comparison.observations(),
            &self.format,
        ))
    }

    #[must_use]
    pub fn chart(&self) -> Option<&PriceTrend> {
        self.trend.as_ref()
    }

    pub fn close_chart(&mut self) {
        self.trend = None;
    }
}
