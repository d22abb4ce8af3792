//! Profile service - self-service and administrative profile access.
//!
//! Self endpoints check the caller's role category first, so a staff member
//! asking for a guest profile gets a validation error on `role` rather than
//! a not-found.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{
    is_admin_or_manager, is_self_or_admin, Account, AccountChanges, AccountId, Caller,
    GuestProfile, GuestProfileChanges, GuestProfileResponse, GuestProfileView, Principal,
    ProfileUpdate, StaffProfileChanges, StaffProfileResponse, StaffProfileView,
};

use super::ensure_email_available;
use crate::repository::{AccountRepository, ProfileRepository};

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The caller's own guest profile, flattened with account fields
    async fn my_guest_profile(&self, caller: &Caller) -> AppResult<GuestProfileView>;

    /// Update the caller's own account and guest profile together
    async fn update_my_guest_profile(
        &self,
        caller: &Caller,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<GuestProfileView>;

    /// The caller's own staff profile, flattened with account fields
    async fn my_staff_profile(&self, caller: &Caller) -> AppResult<StaffProfileView>;

    /// Update the caller's own account and staff profile together.
    /// The hire date is not writable by the owner.
    async fn update_my_staff_profile(
        &self,
        caller: &Caller,
        update: ProfileUpdate<StaffProfileChanges>,
    ) -> AppResult<StaffProfileView>;

    /// All staff profiles (admin/manager)
    async fn list_staff_profiles(&self, caller: &Caller) -> AppResult<Vec<StaffProfileResponse>>;

    /// One staff profile (self or admin/manager)
    async fn get_staff_profile(&self, caller: &Caller, id: i64) -> AppResult<StaffProfileResponse>;

    /// Administrative staff profile update (admin/manager)
    async fn update_staff_profile(
        &self,
        caller: &Caller,
        id: i64,
        changes: StaffProfileChanges,
    ) -> AppResult<StaffProfileResponse>;

    /// All guest profiles (admin/manager)
    async fn list_guest_profiles(&self, caller: &Caller) -> AppResult<Vec<GuestProfileResponse>>;

    /// One guest profile (self or admin/manager)
    async fn get_guest_profile(&self, caller: &Caller, id: i64) -> AppResult<GuestProfileResponse>;

    /// Guest profile update by id (self or admin/manager)
    async fn update_guest_profile(
        &self,
        caller: &Caller,
        id: i64,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<GuestProfileResponse>;
}

/// Concrete implementation of ProfileService using repositories.
pub struct ProfileManager {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileManager {
    pub fn new(accounts: Arc<dyn AccountRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { accounts, profiles }
    }

    fn require_guest(caller: &Caller) -> AppResult<&Principal> {
        let principal = caller.require_authenticated()?;
        if !principal.role.is_guest() {
            return Err(AppError::field("role", "Not a guest"));
        }
        Ok(principal)
    }

    fn require_staff(caller: &Caller) -> AppResult<&Principal> {
        let principal = caller.require_authenticated()?;
        if !principal.role.is_staff_member() {
            return Err(AppError::field("role", "Not a staff member"));
        }
        Ok(principal)
    }

    /// Normalize a changed email and make sure nobody else holds it.
    async fn prepare_account_changes(
        &self,
        account_id: AccountId,
        changes: AccountChanges,
    ) -> AppResult<AccountChanges> {
        let changes = changes.normalized()?;
        if let Some(ref email) = changes.email {
            ensure_email_available(self.accounts.as_ref(), email, Some(account_id)).await?;
        }
        Ok(changes)
    }

    async fn write_guest(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<(GuestProfile, Account)> {
        let account = self.prepare_account_changes(account_id, update.account).await?;
        let result = self
            .profiles
            .update_guest(
                account_id,
                ProfileUpdate {
                    account,
                    profile: update.profile,
                },
            )
            .await?;

        tracing::info!(account_id, "Guest profile updated");
        Ok(result)
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn my_guest_profile(&self, caller: &Caller) -> AppResult<GuestProfileView> {
        let principal = Self::require_guest(caller)?;
        let (profile, account) = self
            .profiles
            .find_guest_by_account(principal.id)
            .await?
            .ok_or_not_found()?;
        Ok(GuestProfileView::new(profile, &account))
    }

    async fn update_my_guest_profile(
        &self,
        caller: &Caller,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<GuestProfileView> {
        let principal = Self::require_guest(caller)?;
        let (profile, account) = self.write_guest(principal.id, update).await?;
        Ok(GuestProfileView::new(profile, &account))
    }

    async fn my_staff_profile(&self, caller: &Caller) -> AppResult<StaffProfileView> {
        let principal = Self::require_staff(caller)?;
        let (profile, account) = self
            .profiles
            .find_staff_by_account(principal.id)
            .await?
            .ok_or_not_found()?;
        Ok(StaffProfileView::new(profile, &account))
    }

    async fn update_my_staff_profile(
        &self,
        caller: &Caller,
        update: ProfileUpdate<StaffProfileChanges>,
    ) -> AppResult<StaffProfileView> {
        let principal = Self::require_staff(caller)?;
        let account = self.prepare_account_changes(principal.id, update.account).await?;
        let profile = StaffProfileChanges {
            hire_date: None,
            ..update.profile
        };

        let (profile, account) = self
            .profiles
            .update_staff(principal.id, ProfileUpdate { account, profile })
            .await?;

        tracing::info!(account_id = principal.id, "Staff profile updated by owner");
        Ok(StaffProfileView::new(profile, &account))
    }

    async fn list_staff_profiles(&self, caller: &Caller) -> AppResult<Vec<StaffProfileResponse>> {
        caller.require(is_admin_or_manager(caller))?;
        Ok(self
            .profiles
            .list_staff()
            .await?
            .into_iter()
            .map(|(profile, account)| StaffProfileResponse::new(profile, &account))
            .collect())
    }

    async fn get_staff_profile(&self, caller: &Caller, id: i64) -> AppResult<StaffProfileResponse> {
        caller.require_authenticated()?;
        let (profile, account) = self.profiles.find_staff(id).await?.ok_or_not_found()?;
        caller.require(is_self_or_admin(caller, &profile))?;
        Ok(StaffProfileResponse::new(profile, &account))
    }

    async fn update_staff_profile(
        &self,
        caller: &Caller,
        id: i64,
        changes: StaffProfileChanges,
    ) -> AppResult<StaffProfileResponse> {
        caller.require(is_admin_or_manager(caller))?;
        let (profile, _) = self.profiles.find_staff(id).await?.ok_or_not_found()?;

        let (profile, account) = self
            .profiles
            .update_staff(
                profile.account_id,
                ProfileUpdate {
                    account: AccountChanges::default(),
                    profile: changes,
                },
            )
            .await?;

        tracing::info!(account_id = profile.account_id, "Staff profile updated");
        Ok(StaffProfileResponse::new(profile, &account))
    }

    async fn list_guest_profiles(&self, caller: &Caller) -> AppResult<Vec<GuestProfileResponse>> {
        caller.require(is_admin_or_manager(caller))?;
        Ok(self
            .profiles
            .list_guests()
            .await?
            .into_iter()
            .map(|(profile, account)| GuestProfileResponse::new(profile, &account))
            .collect())
    }

    async fn get_guest_profile(&self, caller: &Caller, id: i64) -> AppResult<GuestProfileResponse> {
        caller.require_authenticated()?;
        let (profile, account) = self.profiles.find_guest(id).await?.ok_or_not_found()?;
        caller.require(is_self_or_admin(caller, &profile))?;
        Ok(GuestProfileResponse::new(profile, &account))
    }

    async fn update_guest_profile(
        &self,
        caller: &Caller,
        id: i64,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<GuestProfileResponse> {
        caller.require_authenticated()?;
        let (profile, _) = self.profiles.find_guest(id).await?.ok_or_not_found()?;
        caller.require(is_self_or_admin(caller, &profile))?;

        let (profile, account) = self.write_guest(profile.account_id, update).await?;
        Ok(GuestProfileResponse::new(profile, &account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    use crate::repository::{MockAccountRepository, MockProfileRepository};

    fn service(profiles: MockProfileRepository) -> ProfileManager {
        ProfileManager::new(Arc::new(MockAccountRepository::new()), Arc::new(profiles))
    }

    fn caller(role: Role) -> Caller {
        Caller::authenticated(Principal {
            id: 5,
            email: "five@hotel.test".to_string(),
            role,
        })
    }

    #[tokio::test]
    async fn test_staff_on_guest_endpoint_is_role_mismatch() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_guest_by_account().never();

        let err = service(profiles)
            .my_guest_profile(&caller(Role::Receptionist))
            .await
            .unwrap_err();
        assert_eq!(err.field_name(), Some("role"));
        assert_eq!(err.user_message(), "Not a guest");
    }

    #[tokio::test]
    async fn test_guest_on_staff_endpoint_is_role_mismatch() {
        let err = service(MockProfileRepository::new())
            .update_my_staff_profile(&caller(Role::Guest), ProfileUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.field_name(), Some("role"));
        assert_eq!(err.user_message(), "Not a staff member");
    }

    #[tokio::test]
    async fn test_anonymous_self_profile_is_unauthorized() {
        let result = service(MockProfileRepository::new())
            .my_staff_profile(&Caller::Anonymous)
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_admin_update_forbidden_for_receptionist() {
        let mut profiles = MockProfileRepository::new();
        profiles.expect_update_staff().never();

        let result = service(profiles)
            .update_staff_profile(&caller(Role::Receptionist), 1, StaffProfileChanges::default())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
