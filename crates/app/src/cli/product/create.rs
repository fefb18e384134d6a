use clap::Args;
use cuantovale::drafts::ProductDraft;
use cuantovale_app::domain::products::{PgProductsService, ProductsService, data::NewProduct};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Product name, e.g. "Cebolla"
    #[arg(long)]
    name: String,

    /// Unit the product is sold in, e.g. "1 kg"
    #[arg(long)]
    unit: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let product = ProductDraft::new(args.name, args.unit)
        .validate()
        .map_err(|error| error.to_string())?;

    let db = args.db.connect().await?;

    let created = PgProductsService::new(db)
        .create_product(NewProduct::from_valid(product))
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", created.uuid);
    println!("product_name: {}", created.name);
    println!("product_unit: {}", created.unit);

    Ok(())
}
