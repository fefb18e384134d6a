use clap::Args;
use cuantovale::{chart::LineChart, comparison::compare};
use uuid::Uuid;

use super::DisplayArgs;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ChartArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Product to chart
    #[arg(long)]
    product: Uuid,

    #[command(flatten)]
    display: DisplayArgs,
}

/// Prints the trend chart of the compared prices as chart.js JSON.
pub(crate) async fn run(args: ChartArgs) -> Result<(), String> {
    let format = args.display.date_format()?;
    let (product, history) = super::load_history(&args.db, args.product).await?;

    let Some(chart) =
        LineChart::price_trend(&product.name, &compare(&history).observations(), &format)
    else {
        println!("No hay precios registrados.");
        return Ok(());
    };

    let json = serde_json::to_string_pretty(&chart)
        .map_err(|error| format!("failed to serialise chart: {error}"))?;

    println!("{json}");

    Ok(())
}
