//! Service container - wires store, hasher and services together.

use std::sync::Arc;

use domain::{Argon2Hasher, CredentialHasher};

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};

/// Shared handles to every service, cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
    pub repository: Arc<dyn UserRepository>,
    pub database: Database,
}

impl Services {
    /// Build all services on top of a connected database.
    pub fn from_database(database: Database) -> Self {
        let repository: Arc<dyn UserRepository> =
            Arc::new(UserStore::new(database.get_connection()));
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher);

        Self {
            users: Arc::new(UserManager::new(repository.clone(), hasher.clone())),
            auth: Arc::new(Authenticator::new(repository.clone(), hasher)),
            repository,
            database,
        }
    }
}
