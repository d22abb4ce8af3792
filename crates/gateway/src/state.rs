//! Application state for dependency injection.

use std::sync::Arc;

use account_service_lib::infra::Database;
use account_service_lib::service::Services;
use account_service_lib::{AccountService, AuthService, ProfileService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountService>,
    pub profiles: Arc<dyn ProfileService>,
    /// Present when serving over PostgreSQL; used by the health check
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, database: Option<Arc<Database>>) -> Self {
        Self {
            auth: services.auth,
            accounts: services.accounts,
            profiles: services.profiles,
            database,
        }
    }
}
