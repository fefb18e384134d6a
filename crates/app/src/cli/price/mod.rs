use clap::{Args, Subcommand};
use cuantovale::{
    chart::{DateFormat, DateLocale},
    observations::NewestFirst,
};
use cuantovale_app::domain::{
    prices::{PgPricesService, PricesService, records::newest_first},
    products::{PgProductsService, ProductsService, records::{ProductRecord, ProductUuid}},
};
use jiff::tz::TimeZone;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

mod add;
mod chart;
mod compare;

#[derive(Debug, Args)]
pub(crate) struct PriceCommand {
    #[command(subcommand)]
    command: PriceSubcommand,
}

#[derive(Debug, Subcommand)]
enum PriceSubcommand {
    Add(add::AddPriceArgs),
    Compare(compare::ComparePricesArgs),
    Chart(chart::ChartArgs),
}

pub(crate) async fn run(command: PriceCommand) -> Result<(), String> {
    match command.command {
        PriceSubcommand::Add(args) => add::run(args).await,
        PriceSubcommand::Compare(args) => compare::run(args).await,
        PriceSubcommand::Chart(args) => chart::run(args).await,
    }
}

/// How dates are shown.
#[derive(Debug, Args)]
pub(crate) struct DisplayArgs {
    /// Date locale, e.g. `es-PE` or `en-US`
    #[arg(long, env = "CUANTOVALE_LOCALE", default_value = "es")]
    locale: DateLocale,

    /// IANA time zone dates are shown in
    #[arg(long, env = "CUANTOVALE_TIME_ZONE", default_value = "UTC")]
    time_zone: String,
}

impl DisplayArgs {
    pub(crate) fn date_format(&self) -> Result<DateFormat, String> {
        let time_zone = TimeZone::get(&self.time_zone)
            .map_err(|error| format!("invalid time zone {}: {error}", self.time_zone))?;

        Ok(DateFormat::new(self.locale, time_zone))
    }
}

/// A product and its prices, newest first.
pub(crate) async fn load_history(
    db: &DatabaseArgs,
    product: Uuid,
) -> Result<(ProductRecord, NewestFirst), String> {
    let db = db.connect().await?;
    let product = ProductUuid::from_uuid(product);

    let record = PgProductsService::new(db.clone())
        .get_product(product)
        .await
        .map_err(|error| format!("failed to load product {product}: {error}"))?;

    let prices = PgPricesService::new(db)
        .list_prices(product)
        .await
        .map_err(|error| format!("failed to load prices: {error}"))?;

    Ok((record, newest_first(prices)))
}
