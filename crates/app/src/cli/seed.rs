use std::path::PathBuf;

use clap::Args;
use cuantovale::fixtures::Fixture;
use cuantovale_app::domain::{
    prices::{PgPricesService, PricesService, data::NewPrice},
    products::{PgProductsService, ProductsService, data::NewProduct},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// YAML file of products and their prices
    #[arg(long)]
    file: PathBuf,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let fixture = Fixture::from_path(&args.file)
        .map_err(|error| format!("failed to load {}: {error}", args.file.display()))?;

    let db = args.db.connect().await?;
    let products = PgProductsService::new(db.clone());
    let prices = PgPricesService::new(db);

    for seed in fixture.products() {
        let product = products
            .create_product(NewProduct::from_valid(seed.product.clone()))
            .await
            .map_err(|error| format!("failed to create {}: {error}", seed.product.name))?;

        for price in &seed.prices {
            prices
                .create_price(NewPrice::from_valid(product.uuid, price.clone()))
                .await
                .map_err(|error| format!("failed to add price for {}: {error}", product.name))?;
        }

        println!("{}  {} ({} prices)", product.uuid, product.name, seed.prices.len());
    }

    println!(
        "seeded {} products and {} prices",
        fixture.products().len(),
        fixture.price_count()
    );

    Ok(())
}
