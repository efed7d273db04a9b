//! User service - Handles user-related business logic.
//!
//! Email uniqueness is enforced here before anything reaches the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateUser, Password, UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user.
    ///
    /// Returns `Ok(None)` when the email is already registered; nothing is
    /// written in that case.
    async fn register(&self, input: CreateUser) -> AppResult<Option<User>>;

    /// Replace the fields of an existing user, keeping its identifier.
    async fn update_user(&self, input: UpdateUser) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, input: CreateUser) -> AppResult<Option<User>> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            tracing::info!(email = %input.email, "Registration rejected, email already registered");
            return Ok(None);
        }

        let password_hash = Password::new(&input.password)?.into_string();

        match self
            .repo
            .create(input.name, input.email, password_hash, input.photo)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(Some(user))
            }
            // Lost a race against a concurrent registration
            Err(AppError::EmailTaken) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_user(&self, input: UpdateUser) -> AppResult<User> {
        let mut user = self.repo.find_by_id(input.id).await?.ok_or_not_found()?;

        if let Some(owner) = self.repo.find_by_email(&input.email).await? {
            if owner.id != user.id {
                tracing::info!(user_id = user.id, "Update rejected, email belongs to another user");
                return Err(AppError::EmailTaken);
            }
        }

        let password_hash = Password::new(&input.password)?.into_string();
        user.apply(input, password_hash);

        let updated = self.repo.update(user).await?;
        tracing::info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    fn stored_user(id: i64, email: &str) -> User {
        User {
            id,
            name: "Maria da Silva".to_string(),
            email: email.to_string(),
            password_hash: "stored-hash".to_string(),
            photo: Some("-".to_string()),
        }
    }

    fn create_input(email: &str) -> CreateUser {
        CreateUser {
            name: "Maria da Silva".to_string(),
            email: email.to_string(),
            password: "13465278".to_string(),
            photo: Some("-".to_string()),
        }
    }

    fn update_input(id: i64, email: &str) -> UpdateUser {
        UpdateUser {
            id,
            name: "Juliana Andrews Ramos".to_string(),
            email: email.to_string(),
            password: "juliana123".to_string(),
            photo: Some("-".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_returns_stored_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|name, email, hash, photo| {
                name == "Maria da Silva"
                    && email == "maria_silva@email.com.br"
                    && hash != "13465278"
                    && Password::from_hash(hash.as_str()).verify("13465278")
                    && photo.as_deref() == Some("-")
            })
            .times(1)
            .returning(|name, email, password_hash, photo| {
                Ok(User {
                    id: 1,
                    name,
                    email,
                    password_hash,
                    photo,
                })
            });

        let service = UserManager::new(Arc::new(repo));
        let user = service
            .register(create_input("maria_silva@email.com.br"))
            .await
            .unwrap()
            .expect("registration should succeed");

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_none_without_writing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("maria_silva@email.com.br"))
            .returning(|email| Ok(Some(stored_user(5, email))));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .register(create_input("maria_silva@email.com.br"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_register_unique_violation_race_returns_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_, _, _, _| Err(AppError::EmailTaken));

        let service = UserManager::new(Arc::new(repo));
        let result = service.register(create_input("race@email.com")).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_register_short_password_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let mut input = create_input("short@email.com");
        input.password = "123".to_string();

        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_keeps_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(3_i64))
            .returning(|id| Ok(Some(stored_user(id, "juliana_andrews@email.com.br"))));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update().times(1).returning(Ok);

        let service = UserManager::new(Arc::new(repo));
        let user = service
            .update_user(update_input(3, "juliana_ramos@email.com.br"))
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Juliana Andrews Ramos");
        assert_eq!(user.email, "juliana_ramos@email.com.br");
        assert!(Password::from_hash(user.password_hash).verify("juliana123"));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "same@email.com"))));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(3, email))));
        repo.expect_update().returning(Ok);

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_user(update_input(3, "same@email.com")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_user(update_input(42, "ghost@email.com")).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_to_email_of_other_user_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "juliana_andrews@email.com.br"))));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(8, email))));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_user(update_input(3, "root@root.com")).await;

        assert!(matches!(result, Err(AppError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                stored_user(1, "sabrina_sanches@email.com.br"),
                stored_user(2, "ricardo_marques@email.com.br"),
            ])
        });

        let service = UserManager::new(Arc::new(repo));
        let users = service.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));

        assert!(matches!(service.get_user(9).await, Err(AppError::NotFound)));
    }
}
