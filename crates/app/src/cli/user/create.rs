use clap::Args;
use optical_store_app::domain::users::{
    PgUsersService, UsersService,
    models::{NewUser, UserRole},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login email address
    #[arg(long)]
    email: String,

    /// Account role (customer or admin)
    #[arg(long, default_value_t = UserRole::Customer)]
    role: UserRole,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let service = PgUsersService::new(db.clone());

    let created = service
        .create_user(NewUser {
            email: args.email,
            role: args.role,
        })
        .await;

    db.close().await;

    let user = created.map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
