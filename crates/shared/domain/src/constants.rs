//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Staff profiles
// =============================================================================

/// Prefix of generated employee identifiers
pub const EMPLOYEE_ID_PREFIX: &str = "EMP";

/// Zero-padded width of the numeric part of an employee identifier
pub const EMPLOYEE_ID_DIGITS: usize = 6;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 1;

/// Maximum stored length of a phone number
pub const MAX_PHONE_LENGTH: usize = 15;

/// Maximum stored length of profile text fields (nationality, passport, ...)
pub const MAX_PROFILE_FIELD_LENGTH: usize = 50;

/// Message attached to the `email` field when the address is taken
pub const DUPLICATE_EMAIL_MESSAGE: &str = "An account with this email already exists";

/// Message attached to a confirmation field that differs from its password
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match";

// =============================================================================
// Authentication
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 60;

/// Default refresh token lifetime in days
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
