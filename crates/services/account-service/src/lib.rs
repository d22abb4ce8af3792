//! Account Service Library
//!
//! This crate provides hotel account management: accounts with a role,
//! exactly one staff or guest profile per account, registration, tokens,
//! password change and caller-gated administration. The gateway embeds it
//! in-process; the binary covers migrations and superuser bootstrap.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use common::DatabaseConfig;
use domain::Account;

use crate::config::AccountServiceConfig;
use crate::infra::Database;
use crate::service::{NewSuperuser, Services};

pub use service::{AccountService, AuthService, ProfileService};

/// Connect, apply migrations and build the services (for embedding).
pub async fn connect(
    config: AccountServiceConfig,
) -> Result<(Database, Services), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let services = Services::from_connection(db.get_connection(), config.jwt);
    Ok((db, services))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env();
    let db = Database::connect_without_migrations(&config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Create the bootstrap administrator (for CLI commands).
pub async fn create_superuser(input: NewSuperuser) -> Result<Account, Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env()?;
    let (_db, services) = connect(config).await?;

    let account = services.auth.create_superuser(input).await?;
    info!(account_id = account.id, "Superuser created");
    Ok(account)
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
