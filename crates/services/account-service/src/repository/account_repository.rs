//! Account repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::account::{self, Entity as AccountEntity};
use super::entities::{guest_profile, staff_profile};
use super::map_unique_email;
use crate::infra::execute_transaction;
use common::{AppError, AppResult};
use domain::{
    employee_id_for, Account, AccountChanges, AccountId, NewAccount, NewProfile, Preferences,
    Profile,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Find account by (already normalized) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// List all accounts, oldest first
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Insert an account and its single profile atomically.
    ///
    /// A duplicate email fails with a field error on `email` and leaves
    /// no rows behind.
    async fn create_with_profile(
        &self,
        account: NewAccount,
        profile: NewProfile,
    ) -> AppResult<(Account, Profile)>;

    /// Update account-side fields
    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account>;

    /// Replace the stored password hash
    async fn set_password_hash(&self, id: AccountId, password_hash: String) -> AppResult<()>;

    /// Delete an account; its profile goes with it
    async fn delete(&self, id: AccountId) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository over SeaORM.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        find_account(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        AccountEntity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn create_with_profile(
        &self,
        account: NewAccount,
        profile: NewProfile,
    ) -> AppResult<(Account, Profile)> {
        execute_transaction(&self.db, move |txn| {
            Box::pin(async move { insert_account_with_profile(txn, account, profile).await })
        })
        .await
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        update_account(&self.db, id, changes).await
    }

    async fn set_password_hash(&self, id: AccountId, password_hash: String) -> AppResult<()> {
        let result = AccountEntity::update_many()
            .col_expr(account::Column::PasswordHash, Expr::value(password_hash))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        let result = AccountEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

// =============================================================================
// Connection-generic helpers (shared with transactional callers)
// =============================================================================

pub(crate) async fn find_account<C: ConnectionTrait>(
    conn: &C,
    id: AccountId,
) -> AppResult<Option<Account>> {
    AccountEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(Account::try_from)
        .transpose()
}

pub(crate) async fn update_account<C: ConnectionTrait>(
    conn: &C,
    id: AccountId,
    changes: AccountChanges,
) -> AppResult<Account> {
    let model = AccountEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    if changes.is_empty() {
        return Account::try_from(model);
    }

    let mut active: account::ActiveModel = model.into();

    if let Some(first_name) = changes.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = changes.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(phone) = changes.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = changes.address {
        active.address = Set(address);
    }
    if let Some(picture) = changes.profile_picture {
        active.profile_picture = Set(picture);
    }

    let model = active.update(conn).await.map_err(map_unique_email)?;
    Account::try_from(model)
}

async fn insert_account_with_profile<C: ConnectionTrait>(
    conn: &C,
    new_account: NewAccount,
    new_profile: NewProfile,
) -> AppResult<(Account, Profile)> {
    let model = account::ActiveModel {
        email: Set(new_account.email),
        password_hash: Set(new_account.password_hash),
        first_name: Set(new_account.first_name),
        last_name: Set(new_account.last_name),
        role: Set(new_account.role.as_str().to_string()),
        phone: Set(new_account.phone),
        address: Set(new_account.address),
        profile_picture: Set(None),
        is_active: Set(true),
        is_staff: Set(new_account.is_staff),
        is_superuser: Set(new_account.is_superuser),
        date_joined: Set(new_account.date_joined),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(map_unique_email)?;

    let account = Account::try_from(model)?;

    let profile = match new_profile {
        NewProfile::Staff {
            department,
            position,
            hire_date,
        } => {
            let model = staff_profile::ActiveModel {
                account_id: Set(account.id),
                employee_id: Set(employee_id_for(account.id)),
                department: Set(department),
                position: Set(position),
                hire_date: Set(hire_date),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            Profile::Staff(model.into())
        }
        NewProfile::Guest => {
            let model = guest_profile::ActiveModel {
                account_id: Set(account.id),
                nationality: Set(String::new()),
                passport_number: Set(String::new()),
                id_number: Set(String::new()),
                date_of_birth: Set(None),
                preferences: Set(serde_json::Value::Object(Preferences::new())),
                ..Default::default()
            }
            .insert(conn)
            .await?;
            Profile::Guest(model.into())
        }
    };

    Ok((account, profile))
}
