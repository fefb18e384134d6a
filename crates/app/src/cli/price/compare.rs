use std::io;

use clap::Args;
use cuantovale::comparison::compare;
use uuid::Uuid;

use super::DisplayArgs;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ComparePricesArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Product to compare prices for
    #[arg(long)]
    product: Uuid,

    #[command(flatten)]
    display: DisplayArgs,
}

pub(crate) async fn run(args: ComparePricesArgs) -> Result<(), String> {
    let format = args.display.date_format()?;
    let (product, history) = super::load_history(&args.db, args.product).await?;

    println!("Precios para {} ({})", product.name, product.unit);

    compare(&history)
        .write_to(io::stdout().lock(), &format)
        .map_err(|error| format!("failed to print comparison: {error}"))
}
