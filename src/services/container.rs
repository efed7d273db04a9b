//! Service Container - Centralized service access.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::infra::{UserRepository, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get the user repository shared by the services
    fn user_repository(&self) -> Arc<dyn UserRepository>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    user_repository: Arc<dyn UserRepository>,
}

impl Services {
    /// Wire every service on top of a single repository
    pub fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(user_repository.clone())),
            user_service: Arc::new(UserManager::new(user_repository.clone())),
            user_repository,
        }
    }

    /// Create service container from database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::from_repository(Arc::new(UserStore::new(db)))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }
}
