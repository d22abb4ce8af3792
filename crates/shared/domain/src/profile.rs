//! Role-category profile records attached to accounts.
//!
//! Every account owns exactly one profile. Staff roles get a
//! [`StaffProfile`], guests get a [`GuestProfile`]; the variant is chosen
//! once at creation from [`Role::profile_kind`] and never changes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::account::{Account, AccountChanges, AccountId, AccountResponse};
use crate::constants::{EMPLOYEE_ID_DIGITS, EMPLOYEE_ID_PREFIX};
use crate::role::{ProfileKind, Role};

/// Free-form guest preferences. String keys, arbitrary JSON values.
pub type Preferences = serde_json::Map<String, serde_json::Value>;

/// Employee identifier derived from the account id, e.g. `EMP000042`.
pub fn employee_id_for(account_id: AccountId) -> String {
    format!(
        "{}{:0width$}",
        EMPLOYEE_ID_PREFIX,
        account_id,
        width = EMPLOYEE_ID_DIGITS
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: i64,
    pub account_id: AccountId,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestProfile {
    pub id: i64,
    pub account_id: AccountId,
    pub nationality: String,
    pub passport_number: String,
    pub id_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub preferences: Preferences,
}

impl Owned for StaffProfile {
    fn owner_id(&self) -> AccountId {
        self.account_id
    }
}

impl Owned for GuestProfile {
    fn owner_id(&self) -> AccountId {
        self.account_id
    }
}

/// The single profile owned by an account.
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Staff(StaffProfile),
    Guest(GuestProfile),
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Staff(_) => ProfileKind::Staff,
            Profile::Guest(_) => ProfileKind::Guest,
        }
    }

    pub fn account_id(&self) -> AccountId {
        match self {
            Profile::Staff(p) => p.account_id,
            Profile::Guest(p) => p.account_id,
        }
    }
}

impl Owned for Profile {
    fn owner_id(&self) -> AccountId {
        self.account_id()
    }
}

/// Profile contents decided before the account row exists.
///
/// The staff employee id depends on the account id, so the store fills it in
/// with [`employee_id_for`] once the account row is inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum NewProfile {
    Staff {
        department: String,
        position: String,
        hire_date: NaiveDate,
    },
    Guest,
}

impl NewProfile {
    /// Profile seed for a freshly created account.
    ///
    /// Department and position default to the role label until staff
    /// administration assigns real values.
    pub fn for_role(role: Role, date_joined: DateTime<Utc>) -> Self {
        match role.profile_kind() {
            ProfileKind::Staff => NewProfile::Staff {
                department: role.label().to_string(),
                position: role.label().to_string(),
                hire_date: date_joined.date_naive(),
            },
            ProfileKind::Guest => NewProfile::Guest,
        }
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            NewProfile::Staff { .. } => ProfileKind::Staff,
            NewProfile::Guest => ProfileKind::Guest,
        }
    }
}

// =============================================================================
// Changes
// =============================================================================

/// Guest-side fields of a profile update. `Some(None)` clears the birth date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestProfileChanges {
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub preferences: Option<Preferences>,
}

impl GuestProfileChanges {
    pub fn apply_to(&self, profile: &mut GuestProfile) {
        if let Some(ref nationality) = self.nationality {
            profile.nationality = nationality.clone();
        }
        if let Some(ref passport_number) = self.passport_number {
            profile.passport_number = passport_number.clone();
        }
        if let Some(ref id_number) = self.id_number {
            profile.id_number = id_number.clone();
        }
        if let Some(date_of_birth) = self.date_of_birth {
            profile.date_of_birth = date_of_birth;
        }
        if let Some(ref preferences) = self.preferences {
            profile.preferences = preferences.clone();
        }
    }
}

/// Staff-side fields of a profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffProfileChanges {
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

impl StaffProfileChanges {
    pub fn apply_to(&self, profile: &mut StaffProfile) {
        if let Some(ref department) = self.department {
            profile.department = department.clone();
        }
        if let Some(ref position) = self.position {
            profile.position = position.clone();
        }
        if let Some(hire_date) = self.hire_date {
            profile.hire_date = hire_date;
        }
    }
}

/// A flattened update touching both the account and its profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate<P> {
    pub account: AccountChanges,
    pub profile: P,
}

// =============================================================================
// Projections
// =============================================================================

/// Staff profile with its account nested under `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StaffProfileResponse {
    pub id: i64,
    pub user: AccountResponse,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
}

impl StaffProfileResponse {
    pub fn new(profile: StaffProfile, account: &Account) -> Self {
        Self {
            id: profile.id,
            user: AccountResponse::from(account),
            employee_id: profile.employee_id,
            department: profile.department,
            position: profile.position,
            hire_date: profile.hire_date,
        }
    }
}

/// Guest profile with its account nested under `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GuestProfileResponse {
    pub id: i64,
    pub user: AccountResponse,
    pub nationality: String,
    pub passport_number: String,
    pub id_number: String,
    pub date_of_birth: Option<NaiveDate>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub preferences: Preferences,
}

impl GuestProfileResponse {
    pub fn new(profile: GuestProfile, account: &Account) -> Self {
        Self {
            id: profile.id,
            user: AccountResponse::from(account),
            nationality: profile.nationality,
            passport_number: profile.passport_number,
            id_number: profile.id_number,
            date_of_birth: profile.date_of_birth,
            preferences: profile.preferences,
        }
    }
}

/// Self-service view: account contact fields flattened beside guest fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GuestProfileView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub nationality: String,
    pub passport_number: String,
    pub id_number: String,
    pub date_of_birth: Option<NaiveDate>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub preferences: Preferences,
}

impl GuestProfileView {
    pub fn new(profile: GuestProfile, account: &Account) -> Self {
        Self {
            id: profile.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            address: account.address.clone(),
            nationality: profile.nationality,
            passport_number: profile.passport_number,
            id_number: profile.id_number,
            date_of_birth: profile.date_of_birth,
            preferences: profile.preferences,
        }
    }
}

/// Self-service view: account contact fields flattened beside staff fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StaffProfileView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub employee_id: String,
    pub department: String,
    pub position: String,
    pub hire_date: NaiveDate,
}

impl StaffProfileView {
    pub fn new(profile: StaffProfile, account: &Account) -> Self {
        Self {
            id: profile.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            address: account.address.clone(),
            employee_id: profile.employee_id,
            department: profile.department,
            position: profile.position,
            hire_date: profile.hire_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_employee_id_is_zero_padded() {
        assert_eq!(employee_id_for(1), "EMP000001");
        assert_eq!(employee_id_for(123456), "EMP123456");
    }

    #[test]
    fn test_employee_id_grows_past_width() {
        assert_eq!(employee_id_for(1234567), "EMP1234567");
    }

    #[test]
    fn test_new_profile_for_guest() {
        assert_eq!(NewProfile::for_role(Role::Guest, Utc::now()), NewProfile::Guest);
    }

    #[test]
    fn test_new_profile_for_staff_uses_role_label_and_join_date() {
        let joined = Utc.with_ymd_and_hms(2024, 3, 9, 22, 15, 0).unwrap();
        let seed = NewProfile::for_role(Role::Receptionist, joined);

        assert_eq!(
            seed,
            NewProfile::Staff {
                department: "Receptionist".to_string(),
                position: "Receptionist".to_string(),
                hire_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            }
        );
    }

    #[test]
    fn test_every_role_seeds_matching_kind() {
        for role in Role::ALL {
            assert_eq!(NewProfile::for_role(role, Utc::now()).kind(), role.profile_kind());
        }
    }

    #[test]
    fn test_guest_changes_leave_unset_fields() {
        let mut profile = GuestProfile {
            id: 1,
            account_id: 2,
            nationality: "FR".to_string(),
            passport_number: String::new(),
            id_number: String::new(),
            date_of_birth: None,
            preferences: Preferences::new(),
        };

        let mut preferences = Preferences::new();
        preferences.insert("pillow".to_string(), serde_json::json!("firm"));
        GuestProfileChanges {
            passport_number: Some("X123".to_string()),
            preferences: Some(preferences.clone()),
            ..Default::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.nationality, "FR");
        assert_eq!(profile.passport_number, "X123");
        assert_eq!(profile.preferences, preferences);
    }

    #[test]
    fn test_guest_birth_date_can_be_cleared() {
        let mut profile = GuestProfile {
            id: 1,
            account_id: 2,
            nationality: String::new(),
            passport_number: String::new(),
            id_number: String::new(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1),
            preferences: Preferences::new(),
        };

        GuestProfileChanges::default().apply_to(&mut profile);
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 1));

        GuestProfileChanges {
            date_of_birth: Some(None),
            ..Default::default()
        }
        .apply_to(&mut profile);
        assert_eq!(profile.date_of_birth, None);
    }
}
