//! Price trend chart.

use cuantovale::{
    chart::{DateFormat, LineChart},
    observations::PriceObservation,
};

/// The trend chart opened from a product's price history.
#[derive(Debug, Clone)]
pub struct PriceTrend {
    product_name: String,
    chart: Option<LineChart>,
}

impl PriceTrend {
    /// Plot `observations` oldest first, whatever order they arrive in.
    #[must_use]
    pub fn new(product_name: &str, observations: &[PriceObservation], format: &DateFormat) -> Self {
        Self {
            product_name: product_name.to_string(),
            chart: LineChart::price_trend(product_name, observations, format),
        }
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// `None` when there was nothing to plot.
    #[must_use]
    pub fn chart(&self) -> Option<&LineChart> {
        self.chart.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use cuantovale::{prices::Price, stores::StoreLabel};
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn plots_chronologically_regardless_of_input_order() -> TestResult {
        let start = Timestamp::UNIX_EPOCH + 100.hours();
        let observation = |price: &str, hours: i64| -> TestResult<PriceObservation> {
            Ok(PriceObservation {
                uuid: Uuid::now_v7(),
                store: StoreLabel::parse("Metro"),
                price: Price::parse(price)?,
                created_at: start + hours.hours(),
            })
        };

        let by_price = [
            observation("3", 48)?,
            observation("5", 0)?,
            observation("8", 24)?,
        ];

        let trend = PriceTrend::new("Arroz", &by_price, &DateFormat::default());
        let chart = trend.chart().ok_or("chart expected")?;

        assert_eq!(chart.series(), [5.0, 8.0, 3.0]);
        assert_eq!(trend.product_name(), "Arroz");

        Ok(())
    }

    #[test]
    fn nothing_to_plot() {
        let trend = PriceTrend::new("Arroz", &[], &DateFormat::default());

        assert!(trend.chart().is_none(), "empty history has no chart");
    }
}
