use clap::Args;
use cuantovale_app::auth::PgAuthService;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Token to revoke, as shown by `token list`
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let db = args.db.connect().await?;

    let was_active = PgAuthService::new(db.pool().clone())
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token {}: {error}", args.token_uuid))?;

    println!(
        "{} {}",
        args.token_uuid,
        if was_active { "revoked" } else { "was already inactive" }
    );

    Ok(())
}
