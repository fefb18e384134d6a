use clap::Args;
use cuantovale_app::auth::PgAuthService;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Display name
    #[arg(long)]
    name: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let db = args.db.connect().await?;

    let user = PgAuthService::new(db.pool().clone())
        .create_user(&args.name)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);

    Ok(())
}
