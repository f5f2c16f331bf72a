//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::service::{AuthService, UserService};
use user_service_lib::{Database, Services};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
    pub database: Database,
}

impl From<Services> for AppState {
    fn from(services: Services) -> Self {
        Self {
            users: services.users,
            auth: services.auth,
            database: services.database,
        }
    }
}
