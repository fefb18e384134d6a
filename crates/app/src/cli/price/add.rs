use clap::Args;
use cuantovale::drafts::PriceDraft;
use cuantovale_app::domain::{
    prices::{PgPricesService, PricesService, data::NewPrice},
    products::records::ProductUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct AddPriceArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Product the price was seen for
    #[arg(long)]
    product: Uuid,

    /// Observed price, e.g. 4.50
    #[arg(long)]
    price: String,

    /// Store the price was seen at
    #[arg(long, default_value = "")]
    store: String,
}

pub(crate) async fn run(args: AddPriceArgs) -> Result<(), String> {
    let price = PriceDraft::new(args.price, args.store)
        .validate()
        .map_err(|error| error.to_string())?;

    let db = args.db.connect().await?;

    let created = PgPricesService::new(db)
        .create_price(NewPrice::from_valid(ProductUuid::from_uuid(args.product), price))
        .await
        .map_err(|error| format!("failed to add price: {error}"))?;

    println!("price_uuid: {}", created.uuid);
    println!("price: {}", created.price);
    if let Some(store) = created.store {
        println!("store: {store}");
    }
    println!("created_at: {}", created.created_at);

    Ok(())
}
