use clap::Args;
use cuantovale::search::SearchQuery;
use cuantovale_app::domain::products::{PgProductsService, ProductsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Only show products whose name contains this text
    #[arg(long, default_value = "")]
    search: String,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let db = args.db.connect().await?;

    let products = PgProductsService::new(db)
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let visible = SearchQuery::new(&args.search).filter(&products);

    if visible.is_empty() {
        println!("No hay productos registrados.");
        return Ok(());
    }

    for product in visible {
        println!("{}  {} ({})", product.uuid, product.name, product.unit);
    }

    Ok(())
}
