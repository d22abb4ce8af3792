//! Staff and guest profile repository implementation.
//!
//! Lookups return the profile together with its owning account, since every
//! projection of a profile embeds account fields.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::account_repository::update_account;
use super::entities::account;
use super::entities::guest_profile::{self, Entity as GuestEntity};
use super::entities::staff_profile::{self, Entity as StaffEntity};
use crate::infra::execute_transaction;
use common::{AppError, AppResult};
use domain::{
    Account, AccountId, GuestProfile, GuestProfileChanges, ProfileUpdate, StaffProfile,
    StaffProfileChanges,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find staff profile by its own ID
    async fn find_staff(&self, id: i64) -> AppResult<Option<(StaffProfile, Account)>>;

    /// Find the staff profile owned by an account
    async fn find_staff_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(StaffProfile, Account)>>;

    /// List all staff profiles
    async fn list_staff(&self) -> AppResult<Vec<(StaffProfile, Account)>>;

    /// Find guest profile by its own ID
    async fn find_guest(&self, id: i64) -> AppResult<Option<(GuestProfile, Account)>>;

    /// Find the guest profile owned by an account
    async fn find_guest_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(GuestProfile, Account)>>;

    /// List all guest profiles
    async fn list_guests(&self) -> AppResult<Vec<(GuestProfile, Account)>>;

    /// Write account-side and staff-side changes in one transaction
    async fn update_staff(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<StaffProfileChanges>,
    ) -> AppResult<(StaffProfile, Account)>;

    /// Write account-side and guest-side changes in one transaction
    async fn update_guest(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<(GuestProfile, Account)>;
}

/// Concrete implementation of ProfileRepository over SeaORM.
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn staff_pair(
    (profile, account): (staff_profile::Model, Option<account::Model>),
) -> AppResult<(StaffProfile, Account)> {
    let account = account.ok_or_else(|| {
        AppError::internal(format!("Staff profile {} has no account", profile.id))
    })?;
    Ok((profile.into(), Account::try_from(account)?))
}

fn guest_pair(
    (profile, account): (guest_profile::Model, Option<account::Model>),
) -> AppResult<(GuestProfile, Account)> {
    let account = account.ok_or_else(|| {
        AppError::internal(format!("Guest profile {} has no account", profile.id))
    })?;
    Ok((profile.into(), Account::try_from(account)?))
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_staff(&self, id: i64) -> AppResult<Option<(StaffProfile, Account)>> {
        StaffEntity::find_by_id(id)
            .find_also_related(account::Entity)
            .one(&self.db)
            .await?
            .map(staff_pair)
            .transpose()
    }

    async fn find_staff_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(StaffProfile, Account)>> {
        StaffEntity::find()
            .filter(staff_profile::Column::AccountId.eq(account_id))
            .find_also_related(account::Entity)
            .one(&self.db)
            .await?
            .map(staff_pair)
            .transpose()
    }

    async fn list_staff(&self) -> AppResult<Vec<(StaffProfile, Account)>> {
        StaffEntity::find()
            .find_also_related(account::Entity)
            .order_by_asc(staff_profile::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(staff_pair)
            .collect()
    }

    async fn find_guest(&self, id: i64) -> AppResult<Option<(GuestProfile, Account)>> {
        GuestEntity::find_by_id(id)
            .find_also_related(account::Entity)
            .one(&self.db)
            .await?
            .map(guest_pair)
            .transpose()
    }

    async fn find_guest_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(GuestProfile, Account)>> {
        GuestEntity::find()
            .filter(guest_profile::Column::AccountId.eq(account_id))
            .find_also_related(account::Entity)
            .one(&self.db)
            .await?
            .map(guest_pair)
            .transpose()
    }

    async fn list_guests(&self) -> AppResult<Vec<(GuestProfile, Account)>> {
        GuestEntity::find()
            .find_also_related(account::Entity)
            .order_by_asc(guest_profile::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(guest_pair)
            .collect()
    }

    async fn update_staff(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<StaffProfileChanges>,
    ) -> AppResult<(StaffProfile, Account)> {
        execute_transaction(&self.db, move |txn| {
            Box::pin(async move {
                let account = update_account(txn, account_id, update.account).await?;
                let profile = update_staff_row(txn, account_id, update.profile).await?;
                Ok((profile, account))
            })
        })
        .await
    }

    async fn update_guest(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<(GuestProfile, Account)> {
        execute_transaction(&self.db, move |txn| {
            Box::pin(async move {
                let account = update_account(txn, account_id, update.account).await?;
                let profile = update_guest_row(txn, account_id, update.profile).await?;
                Ok((profile, account))
            })
        })
        .await
    }
}

async fn update_staff_row<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    changes: StaffProfileChanges,
) -> AppResult<StaffProfile> {
    let model = StaffEntity::find()
        .filter(staff_profile::Column::AccountId.eq(account_id))
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: staff_profile::ActiveModel = model.clone().into();

    if let Some(department) = changes.department {
        active.department = Set(department);
    }
    if let Some(position) = changes.position {
        active.position = Set(position);
    }
    if let Some(hire_date) = changes.hire_date {
        active.hire_date = Set(hire_date);
    }

    let model = if active.is_changed() {
        active.update(conn).await?
    } else {
        model
    };

    Ok(model.into())
}

async fn update_guest_row<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    changes: GuestProfileChanges,
) -> AppResult<GuestProfile> {
    let model = GuestEntity::find()
        .filter(guest_profile::Column::AccountId.eq(account_id))
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: guest_profile::ActiveModel = model.clone().into();

    if let Some(nationality) = changes.nationality {
        active.nationality = Set(nationality);
    }
    if let Some(passport_number) = changes.passport_number {
        active.passport_number = Set(passport_number);
    }
    if let Some(id_number) = changes.id_number {
        active.id_number = Set(id_number);
    }
    if let Some(date_of_birth) = changes.date_of_birth {
        active.date_of_birth = Set(date_of_birth);
    }
    if let Some(preferences) = changes.preferences {
        active.preferences = Set(serde_json::Value::Object(preferences));
    }

    let model = if active.is_changed() {
        active.update(conn).await?
    } else {
        model
    };

    Ok(model.into())
}
