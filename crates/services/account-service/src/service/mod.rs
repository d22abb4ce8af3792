//! Service layer - account workflows gated by the caller's identity.

mod account_service;
mod auth_service;
mod container;
mod profile_service;
pub mod token;

use common::{AppError, AppResult};
use domain::{AccountId, DUPLICATE_EMAIL_MESSAGE};

use crate::repository::AccountRepository;

pub use account_service::{AccountManager, AccountService, ChangePassword};
pub use auth_service::{AuthService, AuthSession, Authenticator, NewSuperuser, RegisterAccount};
pub use container::Services;
pub use profile_service::{ProfileManager, ProfileService};
pub use token::{Claims, JwtTokenIssuer, TokenIssuer, TokenKind, TokenPair};

/// Fail with a field error on `email` if another account already uses it.
///
/// The store enforces the same rule; this check gives the common case a
/// clean error before any write is attempted.
pub(crate) async fn ensure_email_available(
    accounts: &dyn AccountRepository,
    email: &str,
    except: Option<AccountId>,
) -> AppResult<()> {
    match accounts.find_by_email(email).await? {
        Some(existing) if Some(existing.id) != except => {
            Err(AppError::field("email", DUPLICATE_EMAIL_MESSAGE))
        }
        _ => Ok(()),
    }
}
