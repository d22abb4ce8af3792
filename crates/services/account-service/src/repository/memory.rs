//! In-memory store for workflow tests.
//!
//! Implements both repository traits over a single mutex-guarded state, so
//! every multi-row write is applied all-or-nothing and email uniqueness is
//! checked under the same lock as the insert.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{AccountRepository, ProfileRepository};
use common::{AppError, AppResult};
use domain::{
    employee_id_for, Account, AccountChanges, AccountId, GuestProfile, GuestProfileChanges,
    NewAccount, NewProfile, Preferences, Profile, ProfileUpdate, StaffProfile,
    StaffProfileChanges, DUPLICATE_EMAIL_MESSAGE,
};

/// Row counts, for asserting what a workflow left behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub accounts: usize,
    pub staff_profiles: usize,
    pub guest_profiles: usize,
}

#[derive(Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    staff: BTreeMap<i64, StaffProfile>,
    guests: BTreeMap<i64, GuestProfile>,
    last_account_id: AccountId,
    last_staff_id: i64,
    last_guest_id: i64,
    fail_profile_inserts: bool,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    fn account(&self, id: AccountId) -> AppResult<Account> {
        self.accounts.get(&id).cloned().ok_or(AppError::NotFound)
    }

    fn staff_by_account(&self, account_id: AccountId) -> Option<&StaffProfile> {
        self.staff.values().find(|p| p.account_id == account_id)
    }

    fn guest_by_account(&self, account_id: AccountId) -> Option<&GuestProfile> {
        self.guests.values().find(|p| p.account_id == account_id)
    }

    /// Validate account changes against current state without applying them.
    fn check_account_changes(&self, id: AccountId, changes: &AccountChanges) -> AppResult<()> {
        if !self.accounts.contains_key(&id) {
            return Err(AppError::NotFound);
        }
        if let Some(ref email) = changes.email {
            if self.email_taken(email, Some(id)) {
                return Err(AppError::field("email", DUPLICATE_EMAIL_MESSAGE));
            }
        }
        Ok(())
    }

    fn apply_account_changes(&mut self, id: AccountId, changes: &AccountChanges) -> AppResult<Account> {
        let account = self.accounts.get_mut(&id).ok_or(AppError::NotFound)?;
        changes.apply_to(account);
        Ok(account.clone())
    }
}

/// Mutex-guarded in-memory implementation of both repositories.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("In-memory store lock poisoned"))
    }

    /// Current row counts per table.
    pub fn counts(&self) -> StoreCounts {
        self.lock()
            .map(|state| StoreCounts {
                accounts: state.accounts.len(),
                staff_profiles: state.staff.len(),
                guest_profiles: state.guests.len(),
            })
            .unwrap_or_default()
    }

    /// Make every following profile insert fail, to exercise rollback.
    pub fn fail_profile_inserts(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_profile_inserts = fail;
        }
    }

    /// Flip an account's active flag.
    pub fn set_active(&self, id: AccountId, active: bool) -> AppResult<()> {
        let mut state = self.lock()?;
        let account = state.accounts.get_mut(&id).ok_or(AppError::NotFound)?;
        account.is_active = active;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.lock()?.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        Ok(self.lock()?.accounts.values().cloned().collect())
    }

    async fn create_with_profile(
        &self,
        new_account: NewAccount,
        new_profile: NewProfile,
    ) -> AppResult<(Account, Profile)> {
        let mut state = self.lock()?;

        if state.email_taken(&new_account.email, None) {
            return Err(AppError::field("email", DUPLICATE_EMAIL_MESSAGE));
        }
        if state.fail_profile_inserts {
            return Err(AppError::internal("Profile insert failed"));
        }

        let id = state.last_account_id + 1;
        let account = Account {
            id,
            email: new_account.email,
            password_hash: new_account.password_hash,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            role: new_account.role,
            phone: new_account.phone,
            address: new_account.address,
            profile_picture: None,
            is_active: true,
            is_staff: new_account.is_staff,
            is_superuser: new_account.is_superuser,
            date_joined: new_account.date_joined,
        };

        let profile = match new_profile {
            NewProfile::Staff {
                department,
                position,
                hire_date,
            } => {
                let profile = StaffProfile {
                    id: state.last_staff_id + 1,
                    account_id: id,
                    employee_id: employee_id_for(id),
                    department,
                    position,
                    hire_date,
                };
                state.last_staff_id = profile.id;
                state.staff.insert(profile.id, profile.clone());
                Profile::Staff(profile)
            }
            NewProfile::Guest => {
                let profile = GuestProfile {
                    id: state.last_guest_id + 1,
                    account_id: id,
                    nationality: String::new(),
                    passport_number: String::new(),
                    id_number: String::new(),
                    date_of_birth: None,
                    preferences: Preferences::new(),
                };
                state.last_guest_id = profile.id;
                state.guests.insert(profile.id, profile.clone());
                Profile::Guest(profile)
            }
        };

        state.last_account_id = id;
        state.accounts.insert(id, account.clone());
        Ok((account, profile))
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        let mut state = self.lock()?;
        state.check_account_changes(id, &changes)?;
        state.apply_account_changes(id, &changes)
    }

    async fn set_password_hash(&self, id: AccountId, password_hash: String) -> AppResult<()> {
        let mut state = self.lock()?;
        let account = state.accounts.get_mut(&id).ok_or(AppError::NotFound)?;
        account.password_hash = password_hash;
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<()> {
        let mut state = self.lock()?;
        if state.accounts.remove(&id).is_none() {
            return Err(AppError::NotFound);
        }
        state.staff.retain(|_, p| p.account_id != id);
        state.guests.retain(|_, p| p.account_id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_staff(&self, id: i64) -> AppResult<Option<(StaffProfile, Account)>> {
        let state = self.lock()?;
        state
            .staff
            .get(&id)
            .map(|p| state.account(p.account_id).map(|a| (p.clone(), a)))
            .transpose()
    }

    async fn find_staff_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(StaffProfile, Account)>> {
        let state = self.lock()?;
        state
            .staff_by_account(account_id)
            .map(|p| state.account(account_id).map(|a| (p.clone(), a)))
            .transpose()
    }

    async fn list_staff(&self) -> AppResult<Vec<(StaffProfile, Account)>> {
        let state = self.lock()?;
        state
            .staff
            .values()
            .map(|p| state.account(p.account_id).map(|a| (p.clone(), a)))
            .collect()
    }

    async fn find_guest(&self, id: i64) -> AppResult<Option<(GuestProfile, Account)>> {
        let state = self.lock()?;
        state
            .guests
            .get(&id)
            .map(|p| state.account(p.account_id).map(|a| (p.clone(), a)))
            .transpose()
    }

    async fn find_guest_by_account(
        &self,
        account_id: AccountId,
    ) -> AppResult<Option<(GuestProfile, Account)>> {
        let state = self.lock()?;
        state
            .guest_by_account(account_id)
            .map(|p| state.account(account_id).map(|a| (p.clone(), a)))
            .transpose()
    }

    async fn list_guests(&self) -> AppResult<Vec<(GuestProfile, Account)>> {
        let state = self.lock()?;
        state
            .guests
            .values()
            .map(|p| state.account(p.account_id).map(|a| (p.clone(), a)))
            .collect()
    }

    async fn update_staff(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<StaffProfileChanges>,
    ) -> AppResult<(StaffProfile, Account)> {
        let mut state = self.lock()?;
        state.check_account_changes(account_id, &update.account)?;
        let profile_id = state
            .staff_by_account(account_id)
            .map(|p| p.id)
            .ok_or(AppError::NotFound)?;

        let account = state.apply_account_changes(account_id, &update.account)?;
        let profile = state.staff.get_mut(&profile_id).ok_or(AppError::NotFound)?;
        update.profile.apply_to(profile);
        Ok((profile.clone(), account))
    }

    async fn update_guest(
        &self,
        account_id: AccountId,
        update: ProfileUpdate<GuestProfileChanges>,
    ) -> AppResult<(GuestProfile, Account)> {
        let mut state = self.lock()?;
        state.check_account_changes(account_id, &update.account)?;
        let profile_id = state
            .guest_by_account(account_id)
            .map(|p| p.id)
            .ok_or(AppError::NotFound)?;

        let account = state.apply_account_changes(account_id, &update.account)?;
        let profile = state.guests.get_mut(&profile_id).ok_or(AppError::NotFound)?;
        update.profile.apply_to(profile);
        Ok((profile.clone(), account))
    }
}
