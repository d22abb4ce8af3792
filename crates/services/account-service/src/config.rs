//! Account service configuration.

use common::{AppResult, DatabaseConfig, JwtConfig};

/// Account service configuration.
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `JWT_SECRET` is missing or too short.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
        })
    }
}
