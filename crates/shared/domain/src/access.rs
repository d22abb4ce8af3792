//! Caller identity and access-control predicates.
//!
//! Every operation receives the caller explicitly. Predicates are pure
//! functions; [`Caller::require`] turns a denial into the matching error.

use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountId};
use crate::error::{DomainError, DomainResult};
use crate::role::Role;

/// Identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn authenticated(principal: Principal) -> Self {
        Caller::Authenticated(principal)
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }

    /// The caller's principal, or `Unauthorized` for anonymous callers.
    pub fn require_authenticated(&self) -> DomainResult<&Principal> {
        self.principal().ok_or(DomainError::Unauthorized)
    }

    /// Map a predicate outcome to an error: anonymous callers are
    /// `Unauthorized`, authenticated ones are `Forbidden`.
    pub fn require(&self, allowed: bool) -> DomainResult<()> {
        match (allowed, self) {
            (true, _) => Ok(()),
            (false, Caller::Anonymous) => Err(DomainError::Unauthorized),
            (false, Caller::Authenticated(_)) => Err(DomainError::Forbidden),
        }
    }
}

/// Anything that belongs to exactly one account.
pub trait Owned {
    fn owner_id(&self) -> AccountId;
}

fn has_role(caller: &Caller, check: impl Fn(Role) -> bool) -> bool {
    caller.role().map(check).unwrap_or(false)
}

/// Admins and managers.
pub fn is_admin_or_manager(caller: &Caller) -> bool {
    has_role(caller, |role| role.is_admin() || role.is_manager())
}

/// Admins, managers and receptionists.
pub fn is_receptionist_or_above(caller: &Caller) -> bool {
    has_role(caller, |role| {
        role.is_admin() || role.is_manager() || role.is_receptionist()
    })
}

/// Admins, managers and housekeeping.
pub fn is_housekeeping_or_above(caller: &Caller) -> bool {
    has_role(caller, |role| {
        role.is_admin() || role.is_manager() || role.is_housekeeping()
    })
}

/// Admins and managers may touch anything; everyone else only what they own.
pub fn is_self_or_admin<T: Owned + ?Sized>(caller: &Caller, target: &T) -> bool {
    match caller {
        Caller::Anonymous => false,
        Caller::Authenticated(principal) => {
            is_admin_or_manager(caller) || target.owner_id() == principal.id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner(AccountId);

    impl Owned for Owner {
        fn owner_id(&self) -> AccountId {
            self.0
        }
    }

    fn caller(id: AccountId, role: Role) -> Caller {
        Caller::authenticated(Principal {
            id,
            email: format!("user{}@example.com", id),
            role,
        })
    }

    #[test]
    fn test_anonymous_passes_no_predicate() {
        let anon = Caller::Anonymous;
        assert!(!is_admin_or_manager(&anon));
        assert!(!is_receptionist_or_above(&anon));
        assert!(!is_housekeeping_or_above(&anon));
        assert!(!is_self_or_admin(&anon, &Owner(1)));
    }

    #[test]
    fn test_admin_or_manager() {
        assert!(is_admin_or_manager(&caller(1, Role::Admin)));
        assert!(is_admin_or_manager(&caller(1, Role::Manager)));
        assert!(!is_admin_or_manager(&caller(1, Role::Receptionist)));
        assert!(!is_admin_or_manager(&caller(1, Role::Guest)));
    }

    #[test]
    fn test_receptionist_or_above() {
        assert!(is_receptionist_or_above(&caller(1, Role::Receptionist)));
        assert!(is_receptionist_or_above(&caller(1, Role::Manager)));
        assert!(!is_receptionist_or_above(&caller(1, Role::Housekeeping)));
        assert!(!is_receptionist_or_above(&caller(1, Role::Guest)));
    }

    #[test]
    fn test_housekeeping_or_above() {
        assert!(is_housekeeping_or_above(&caller(1, Role::Housekeeping)));
        assert!(is_housekeeping_or_above(&caller(1, Role::Admin)));
        assert!(!is_housekeeping_or_above(&caller(1, Role::Receptionist)));
        assert!(!is_housekeeping_or_above(&caller(1, Role::Guest)));
    }

    #[test]
    fn test_self_or_admin_for_unprivileged_roles() {
        for role in [Role::Guest, Role::Receptionist, Role::Housekeeping] {
            assert!(is_self_or_admin(&caller(1, role), &Owner(1)));
            assert!(!is_self_or_admin(&caller(1, role), &Owner(2)));
        }
    }

    #[test]
    fn test_self_or_admin_for_privileged_roles() {
        for role in [Role::Admin, Role::Manager] {
            assert!(is_self_or_admin(&caller(1, role), &Owner(2)));
        }
    }

    #[test]
    fn test_require_maps_denials() {
        assert_eq!(Caller::Anonymous.require(false), Err(DomainError::Unauthorized));
        assert_eq!(caller(1, Role::Guest).require(false), Err(DomainError::Forbidden));
        assert_eq!(caller(1, Role::Guest).require(true), Ok(()));
    }
}
