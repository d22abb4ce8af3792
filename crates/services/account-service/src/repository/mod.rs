//! Repository layer for data access.

mod account_repository;
pub mod entities;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod profile_repository;

use sea_orm::{DbErr, SqlErr};

use common::AppError;
use domain::DUPLICATE_EMAIL_MESSAGE;

pub use account_repository::{AccountRepository, AccountStore};
pub use profile_repository::{ProfileRepository, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryStore, StoreCounts};
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;

/// A unique violation on the accounts table can only come from the email
/// column, so it is reported as a duplicate email on that field.
pub(crate) fn map_unique_email(err: DbErr) -> AppError {
    let violation = err.sql_err();
    classify_account_write_error(err, violation)
}

fn classify_account_write_error(err: DbErr, violation: Option<SqlErr>) -> AppError {
    match violation {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Unique constraint violated on account write");
            AppError::field("email", DUPLICATE_EMAIL_MESSAGE)
        }
        _ => AppError::from(err),
    }
}
