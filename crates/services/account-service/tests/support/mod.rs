//! Shared fixtures for account service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use account_service_lib::repository::InMemoryStore;
use account_service_lib::service::{AuthSession, JwtTokenIssuer, RegisterAccount, Services};
use common::JwtConfig;
use domain::{Caller, Role};

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub services: Services,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(JwtTokenIssuer::new(JwtConfig::new(SECRET).unwrap()));
        let services = Services::new(store.clone(), store.clone(), tokens);
        Self { store, services }
    }

    pub async fn register(&self, email: &str, password: &str, role: Role) -> AuthSession {
        self.services
            .auth
            .register(registration(email, password, password, role))
            .await
            .unwrap()
    }

    /// Register and resolve the access token to a caller.
    pub async fn caller(&self, email: &str, role: Role) -> (AuthSession, Caller) {
        let session = self.register(email, "p1", role).await;
        let caller = self.services.auth.authenticate(&session.access).await.unwrap();
        (session, caller)
    }
}

pub fn registration(email: &str, password: &str, confirm: &str, role: Role) -> RegisterAccount {
    RegisterAccount {
        email: email.to_string(),
        password: password.to_string(),
        password_confirm: confirm.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role,
        phone: String::new(),
        address: String::new(),
    }
}
