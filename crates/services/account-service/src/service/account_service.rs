//! Account service - self lookup, administration and password change.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{
    is_admin_or_manager, is_self_or_admin, Account, AccountChanges, AccountId, Caller, Password,
    PASSWORD_MISMATCH_MESSAGE,
};

use super::ensure_email_available;
use crate::repository::AccountRepository;

/// Password change input.
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// The caller's own account
    async fn me(&self, caller: &Caller) -> AppResult<Account>;

    /// All accounts (admin/manager)
    async fn list_accounts(&self, caller: &Caller) -> AppResult<Vec<Account>>;

    /// One account (self or admin/manager)
    async fn get_account(&self, caller: &Caller, id: AccountId) -> AppResult<Account>;

    /// Update contact fields (self or admin/manager)
    async fn update_account(
        &self,
        caller: &Caller,
        id: AccountId,
        changes: AccountChanges,
    ) -> AppResult<Account>;

    /// Delete an account and its profile (admin/manager, never oneself)
    async fn delete_account(&self, caller: &Caller, id: AccountId) -> AppResult<()>;

    /// Replace the password after re-verifying the old one (self or admin/manager)
    async fn change_password(
        &self,
        caller: &Caller,
        id: AccountId,
        input: ChangePassword,
    ) -> AppResult<()>;
}

/// Concrete implementation of AccountService using repository.
pub struct AccountManager {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountManager {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Load a target account and check the caller may act on it.
    async fn load_for(&self, caller: &Caller, id: AccountId) -> AppResult<Account> {
        caller.require_authenticated()?;
        let account = self.accounts.find_by_id(id).await?.ok_or_not_found()?;
        caller.require(is_self_or_admin(caller, &account))?;
        Ok(account)
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn me(&self, caller: &Caller) -> AppResult<Account> {
        let principal = caller.require_authenticated()?;
        self.accounts.find_by_id(principal.id).await?.ok_or_not_found()
    }

    async fn list_accounts(&self, caller: &Caller) -> AppResult<Vec<Account>> {
        caller.require(is_admin_or_manager(caller))?;
        self.accounts.list().await
    }

    async fn get_account(&self, caller: &Caller, id: AccountId) -> AppResult<Account> {
        self.load_for(caller, id).await
    }

    async fn update_account(
        &self,
        caller: &Caller,
        id: AccountId,
        changes: AccountChanges,
    ) -> AppResult<Account> {
        self.load_for(caller, id).await?;

        let changes = changes.normalized()?;
        if let Some(ref email) = changes.email {
            ensure_email_available(self.accounts.as_ref(), email, Some(id)).await?;
        }

        let account = self.accounts.update(id, changes).await?;
        tracing::info!(account_id = id, "Account updated");
        Ok(account)
    }

    async fn delete_account(&self, caller: &Caller, id: AccountId) -> AppResult<()> {
        caller.require(is_admin_or_manager(caller))?;
        if caller.principal().map(|p| p.id) == Some(id) {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        self.accounts.delete(id).await?;
        tracing::info!(account_id = id, "Account deleted");
        Ok(())
    }

    async fn change_password(
        &self,
        caller: &Caller,
        id: AccountId,
        input: ChangePassword,
    ) -> AppResult<()> {
        let account = self.load_for(caller, id).await?;

        if input.new_password != input.new_password_confirm {
            return Err(AppError::field(
                "new_password_confirm",
                PASSWORD_MISMATCH_MESSAGE,
            ));
        }

        if !Password::from_hash(account.password_hash.as_str()).verify(&input.old_password) {
            return Err(AppError::IncorrectPassword);
        }

        let password_hash = Password::new(&input.new_password)?.into_string();
        self.accounts.set_password_hash(id, password_hash).await?;

        tracing::info!(account_id = id, "Password changed");
        Ok(())
    }
}
