use clap::Args;
use jiff::Timestamp;
use optical_store_app::{auth::PgAuthService, domain::users::models::UserId};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User that should own the token
    #[arg(long)]
    user_id: i64,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let user = UserId::from_i64(args.user_id);

    if !user.is_well_formed() {
        return Err("user-id must be positive".to_string());
    }

    if let Some(expires_at) = args.expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;

    let issued = PgAuthService::new(db.clone())
        .issue_api_token(user, args.expires_at)
        .await;

    db.close().await;

    let issued = issued.map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_id: {}", issued.metadata.user_id);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
