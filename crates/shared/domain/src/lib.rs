//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the role model, accounts and their profiles, password hashing, and the
//! access-control predicates shared by every service.

pub mod access;
pub mod account;
pub mod constants;
pub mod error;
pub mod password;
pub mod profile;
pub mod role;

pub use access::{
    is_admin_or_manager, is_housekeeping_or_above, is_receptionist_or_above, is_self_or_admin,
    Caller, Owned, Principal,
};
pub use account::{normalize_email, Account, AccountChanges, AccountId, AccountResponse, NewAccount};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use profile::{
    employee_id_for, GuestProfile, GuestProfileChanges, GuestProfileResponse, GuestProfileView,
    NewProfile, Preferences, Profile, ProfileUpdate, StaffProfile, StaffProfileChanges,
    StaffProfileResponse, StaffProfileView,
};
pub use role::{ProfileKind, Role};
