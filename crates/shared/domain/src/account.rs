//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::Owned;
use crate::error::{DomainError, DomainResult};
use crate::role::Role;

/// Numeric account identifier.
pub type AccountId = i64;

/// Account domain entity. The email is the login identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    pub fn is_receptionist(&self) -> bool {
        self.role.is_receptionist()
    }

    pub fn is_housekeeping(&self) -> bool {
        self.role.is_housekeeping()
    }

    pub fn is_guest(&self) -> bool {
        self.role.is_guest()
    }

    pub fn is_staff_member(&self) -> bool {
        self.role.is_staff_member()
    }
}

impl Owned for Account {
    fn owner_id(&self) -> AccountId {
        self.id
    }
}

/// Normalize an email address: trim it and lower-case the domain part.
///
/// The local part is kept as given, since mail servers may treat it
/// case-sensitively.
pub fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::field("email", "Email is required"));
    }

    Ok(match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    })
}

/// Everything needed to insert an account row (password already hashed).
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

/// Partial update of account-side fields. `None` leaves a field untouched;
/// `Some(None)` clears the picture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<Option<String>>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        *self == AccountChanges::default()
    }

    /// Normalize the email, if one is being set.
    pub fn normalized(mut self) -> DomainResult<Self> {
        if let Some(email) = self.email.take() {
            self.email = Some(normalize_email(&email)?);
        }
        Ok(self)
    }

    /// Apply the changes to an in-memory account.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(ref first_name) = self.first_name {
            account.first_name = first_name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            account.last_name = last_name.clone();
        }
        if let Some(ref email) = self.email {
            account.email = email.clone();
        }
        if let Some(ref phone) = self.phone {
            account.phone = phone.clone();
        }
        if let Some(ref address) = self.address {
            account.address = address.clone();
        }
        if let Some(ref picture) = self.profile_picture {
            account.profile_picture = picture.clone();
        }
    }
}

/// Account projection (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    pub id: AccountId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub profile_picture: Option<String>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
            phone: account.phone.clone(),
            address: account.address.clone(),
            profile_picture: account.profile_picture.clone(),
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            phone: account.phone,
            address: account.address,
            profile_picture: account.profile_picture,
        }
    }
}
