//! Service container - wires repositories, token issuer and services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::JwtConfig;

use super::{
    AccountManager, AccountService, AuthService, Authenticator, JwtTokenIssuer, ProfileManager,
    ProfileService, TokenIssuer,
};
use crate::repository::{AccountRepository, AccountStore, ProfileRepository, ProfileStore};

/// All account services, shared behind `Arc<dyn Trait>`.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountService>,
    pub profiles: Arc<dyn ProfileService>,
}

impl Services {
    /// Build the services over any repository implementation.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            auth: Arc::new(Authenticator::new(accounts.clone(), tokens)),
            accounts: Arc::new(AccountManager::new(accounts.clone())),
            profiles: Arc::new(ProfileManager::new(accounts, profiles)),
        }
    }

    /// Build the services over the SeaORM stores.
    pub fn from_connection(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        Self::new(
            Arc::new(AccountStore::new(db.clone())),
            Arc::new(ProfileStore::new(db)),
            Arc::new(JwtTokenIssuer::new(jwt)),
        )
    }
}
