//! JWT access/refresh token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult, JwtConfig};
use domain::{Account, AccountId, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Which of the pair a token is. Carried in the claims so one kind can never
/// stand in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    pub email: String,
    pub role: Role,
    pub token_type: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token collaborator trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a fresh access + refresh pair for an account
    fn issue_pair(&self, account: &Account) -> AppResult<TokenPair>;

    /// Issue a single access token for an account
    fn issue_access(&self, account: &Account) -> AppResult<String>;

    /// Verify signature, expiry and token kind
    fn verify(&self, token: &str, kind: TokenKind) -> AppResult<Claims>;
}

/// HS256 implementation of TokenIssuer.
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => Duration::minutes(self.config.access_ttl_minutes),
            TokenKind::Refresh => Duration::days(self.config.refresh_ttl_days),
        }
    }

    fn issue(&self, account: &Account, kind: TokenKind) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            token_type: kind,
            iat: now.timestamp(),
            exp: (now + self.lifetime(kind)).timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )?)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_pair(&self, account: &Account) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.issue(account, TokenKind::Access)?,
            refresh: self.issue(account, TokenKind::Refresh)?,
        })
    }

    fn issue_access(&self, account: &Account) -> AppResult<String> {
        self.issue(account, TokenKind::Access)
    }

    fn verify(&self, token: &str, kind: TokenKind) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )?;

        if token_data.claims.token_type != kind {
            tracing::debug!(
                expected = ?kind,
                actual = ?token_data.claims.token_type,
                "Token of the wrong kind presented"
            );
            return Err(AppError::Unauthorized);
        }

        Ok(token_data.claims)
    }
}
