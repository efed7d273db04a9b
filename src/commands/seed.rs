//! Seed command - Registers the administrative account.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{CreateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection());
    seed_admin(&services, args).await?;

    Ok(())
}

/// Register the account unless its email is already taken.
///
/// Returns the created user, or `None` if it already existed.
pub async fn seed_admin(services: &dyn ServiceContainer, args: SeedArgs) -> AppResult<Option<User>> {
    let email = args.email.clone();
    let created = services
        .users()
        .register(CreateUser {
            name: args.name,
            email: args.email,
            password: args.password,
            photo: Some(" ".to_string()),
        })
        .await?;

    match &created {
        Some(user) => tracing::info!(user_id = user.id, email = %email, "Administrative account created"),
        None => tracing::info!(email = %email, "Administrative account already exists"),
    }

    Ok(created)
}
