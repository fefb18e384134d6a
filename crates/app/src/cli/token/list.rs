use clap::Args;
use cuantovale_app::auth::{ApiTokenMetadata, PgAuthService, UserUuid};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Owner of the tokens
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let db = args.db.connect().await?;

    let tokens = PgAuthService::new(db.pool().clone())
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("user {} has no tokens", args.user_uuid);
        return Ok(());
    }

    let now = Timestamp::now();

    for token in &tokens {
        println!("{}", describe(token, now));
    }

    Ok(())
}

fn describe(token: &ApiTokenMetadata, now: Timestamp) -> String {
    let last_used = token
        .last_used_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    let expires = token
        .expires_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    format!(
        "{}  v{}  {:<7}  created {}  last used {}  expires {}",
        token.uuid,
        token.version.as_i16(),
        token.status(now).as_str(),
        token.created_at,
        last_used,
        expires,
    )
}
