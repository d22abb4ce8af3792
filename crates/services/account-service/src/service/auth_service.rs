//! Authentication service - registration, login, tokens and bootstrap.
//!
//! Registration and superuser bootstrap both create the account and its
//! profile through one atomic repository call.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;

use common::{AppError, AppResult};
use domain::{
    normalize_email, Account, AccountResponse, Caller, NewAccount, NewProfile, Password,
    Principal, Role, PASSWORD_MISMATCH_MESSAGE,
};

use super::ensure_email_available;
use super::token::{TokenIssuer, TokenKind};
use crate::repository::AccountRepository;

/// Hash checked when the email is unknown, so a miss costs the same as a
/// wrong password.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("dummy-password-never-matches")
        .map(Password::into_string)
        .unwrap_or_default()
});

/// Registration input.
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
}

/// Bootstrap superuser input.
#[derive(Debug, Clone)]
pub struct NewSuperuser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Account data plus a fresh token pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AccountResponse,
    pub access: String,
    pub refresh: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with its profile and issue tokens
    async fn register(&self, input: RegisterAccount) -> AppResult<AuthSession>;

    /// Exchange email + password for tokens
    async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> AppResult<String>;

    /// Resolve an access token to the caller it identifies
    async fn authenticate(&self, access_token: &str) -> AppResult<Caller>;

    /// Create an admin account with superuser flags (CLI bootstrap)
    async fn create_superuser(&self, input: NewSuperuser) -> AppResult<Account>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl Authenticator {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { accounts, tokens }
    }

    fn session(&self, account: &Account) -> AppResult<AuthSession> {
        let pair = self.tokens.issue_pair(account)?;
        Ok(AuthSession {
            user: AccountResponse::from(account),
            access: pair.access,
            refresh: pair.refresh,
        })
    }

    /// Checks shared by every account-creating path, then the atomic insert.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        account: impl FnOnce(String, String) -> NewAccount + Send,
    ) -> AppResult<Account> {
        let email = normalize_email(email)?;
        ensure_email_available(self.accounts.as_ref(), &email, None).await?;

        let password_hash = Password::new(password)?.into_string();
        let new_account = account(email, password_hash);
        let new_profile = NewProfile::for_role(new_account.role, new_account.date_joined);

        let (account, profile) = self
            .accounts
            .create_with_profile(new_account, new_profile)
            .await?;

        tracing::info!(
            account_id = account.id,
            role = %account.role,
            profile = ?profile.kind(),
            "Account created"
        );
        Ok(account)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegisterAccount) -> AppResult<AuthSession> {
        if input.password != input.password_confirm {
            return Err(AppError::field("password_confirm", PASSWORD_MISMATCH_MESSAGE));
        }

        let RegisterAccount {
            email,
            password,
            first_name,
            last_name,
            role,
            phone,
            address,
            ..
        } = input;

        let account = self
            .create_account(&email, &password, move |email, password_hash| NewAccount {
                email,
                password_hash,
                first_name,
                last_name,
                role,
                phone,
                address,
                is_staff: false,
                is_superuser: false,
                date_joined: Utc::now(),
            })
            .await?;

        self.session(&account)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email).map_err(|_| AppError::InvalidCredentials)?;
        let account = self.accounts.find_by_email(&email).await?;

        // Verify even when the account is missing, against a hash that
        // never matches
        let hash = account
            .as_ref()
            .map(|a| a.password_hash.as_str())
            .unwrap_or(DUMMY_HASH.as_str());
        let password_valid = Password::from_hash(hash).verify(password);

        match account {
            Some(account) if password_valid && account.is_active => {
                tracing::info!(account_id = account.id, "Login succeeded");
                self.session(&account)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;

        // Issue from current account data, not the stale claims
        let account = self
            .accounts
            .find_by_id(claims.sub)
            .await?
            .filter(|a| a.is_active)
            .ok_or(AppError::Unauthorized)?;

        self.tokens.issue_access(&account)
    }

    async fn authenticate(&self, access_token: &str) -> AppResult<Caller> {
        let claims = self.tokens.verify(access_token, TokenKind::Access)?;

        let account = self
            .accounts
            .find_by_id(claims.sub)
            .await?
            .filter(|a| a.is_active)
            .ok_or(AppError::Unauthorized)?;

        Ok(Caller::authenticated(Principal::from(&account)))
    }

    async fn create_superuser(&self, input: NewSuperuser) -> AppResult<Account> {
        let NewSuperuser {
            email,
            password,
            first_name,
            last_name,
        } = input;

        self.create_account(&email, &password, move |email, password_hash| NewAccount {
            email,
            password_hash,
            first_name,
            last_name,
            role: Role::Admin,
            phone: String::new(),
            address: String::new(),
            is_staff: true,
            is_superuser: true,
            date_joined: Utc::now(),
        })
        .await
    }
}
