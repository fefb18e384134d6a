use clap::Args;
use cuantovale_app::auth::{PgAuthService, UserUuid};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Owner of the token, as printed by `user create`
    #[arg(long)]
    user_uuid: Uuid,

    /// Expiry as an RFC 3339 timestamp; tokens never expire by default
    #[arg(long)]
    token_expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if args
        .token_expires_at
        .is_some_and(|expires_at| expires_at <= Timestamp::now())
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let db = args.db.connect().await?;

    let issued = PgAuthService::new(db.pool().clone())
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    let expires = issued
        .metadata
        .expires_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    println!("token {} for user {}", issued.metadata.uuid, issued.metadata.user_uuid);
    println!("expires {expires}");
    println!();
    println!("Authorization: Bearer {}", issued.token);
    println!();
    println!("The secret is not stored; copy it now.");

    Ok(())
}
