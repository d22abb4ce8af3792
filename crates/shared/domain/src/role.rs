//! Role model and derived capability predicates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Account roles. The set is closed: every role must be classified as staff
/// or guest in [`Role::is_staff_member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Receptionist,
    Housekeeping,
    Guest,
}

/// Which profile record a role category carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Staff,
    Guest,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Manager,
        Role::Receptionist,
        Role::Housekeeping,
        Role::Guest,
    ];

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_manager(self) -> bool {
        self == Role::Manager
    }

    pub fn is_receptionist(self) -> bool {
        self == Role::Receptionist
    }

    pub fn is_housekeeping(self) -> bool {
        self == Role::Housekeeping
    }

    pub fn is_guest(self) -> bool {
        self == Role::Guest
    }

    /// True for the four staff roles. A new role must be classified here
    /// before the match compiles.
    pub fn is_staff_member(self) -> bool {
        match self {
            Role::Admin | Role::Manager | Role::Receptionist | Role::Housekeeping => true,
            Role::Guest => false,
        }
    }

    /// Profile record created alongside an account with this role.
    pub fn profile_kind(self) -> ProfileKind {
        if self.is_staff_member() {
            ProfileKind::Staff
        } else {
            ProfileKind::Guest
        }
    }

    /// Wire and storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Receptionist => "receptionist",
            Role::Housekeeping => "housekeeping",
            Role::Guest => "guest",
        }
    }

    /// Capitalized display name, e.g. "Receptionist".
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Receptionist => "Receptionist",
            Role::Housekeeping => "Housekeeping",
            Role::Guest => "Guest",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Guest
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::field("role", format!("\"{}\" is not a valid role", s)))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
