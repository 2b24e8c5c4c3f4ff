use clap::Args;
use jiff::Timestamp;
use optical_store_app::{auth::PgAuthService, domain::users::models::UserId};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User whose tokens should be listed
    #[arg(long)]
    user_id: i64,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let tokens = PgAuthService::new(db.clone())
        .list_api_tokens(UserId::from_i64(args.user_id))
        .await;

    db.close().await;

    let tokens = tokens.map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_id);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", or_label(token.last_used_at, "never"));
        println!("expires_at: {}", or_label(token.expires_at, "none"));
        println!("revoked_at: {}", or_label(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}

fn or_label(value: Option<Timestamp>, label: &str) -> String {
    value.map_or_else(|| label.to_string(), |value| value.to_string())
}
