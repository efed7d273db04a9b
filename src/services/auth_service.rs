//! Authentication service - Basic credential verification and login.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::BASIC_TOKEN_PREFIX;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Login result returned to the client.
///
/// `token` is a ready-to-use `Authorization` header value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserLogin {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Root")]
    pub nome: String,
    #[schema(example = "root@root.com")]
    pub usuario: String,
    /// Always empty in responses
    #[schema(example = "")]
    pub senha: String,
    pub foto: Option<String>,
    #[schema(example = "Basic cm9vdEByb290LmNvbToxMjM0NTY3OA==")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check basic credentials and return the matching user
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    /// Check credentials and issue a Basic token
    async fn login(&self, email: String, password: String) -> AppResult<UserLogin>;
}

/// Build the `Authorization` header value for a pair of credentials.
pub fn basic_token(email: &str, password: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{}:{}", email, password));
    format!("{}{}", BASIC_TOKEN_PREFIX, encoded)
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.repo.find_by_email(email).await?;

        // Verify even when the email is unknown so both failure paths cost the same
        let stored = user
            .as_ref()
            .map(|u| Password::from_hash(u.password_hash.as_str()))
            .unwrap_or_else(Password::dummy);
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => Ok(user),
            _ => {
                tracing::debug!(email = %email, "Credential check failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn login(&self, email: String, password: String) -> AppResult<UserLogin> {
        let user = self.authenticate(&email, &password).await?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(UserLogin {
            id: user.id,
            nome: user.name,
            usuario: user.email,
            senha: String::new(),
            foto: user.photo,
            token: basic_token(&email, &password),
        })
    }
}
