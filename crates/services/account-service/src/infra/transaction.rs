//! Transaction helper.
//!
//! Multi-row writes (account + profile) go through [`execute_transaction`],
//! which commits when the closure succeeds and rolls back when it fails.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};

use common::{AppError, AppResult};

/// Run `f` inside a ReadCommitted read-write transaction.
///
/// # Example
/// ```ignore
/// let account = execute_transaction(&db, |txn| {
///     Box::pin(async move { insert_account(txn, new_account).await })
/// })
/// .await?;
/// ```
pub async fn execute_transaction<F, T>(db: &DatabaseConnection, f: F) -> AppResult<T>
where
    F: for<'a> FnOnce(
            &'a DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
        + Send,
    T: Send,
{
    let txn = db
        .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
        .await
        .map_err(AppError::from)?;

    match f(&txn).await {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn logged_sql(db: DatabaseConnection) -> Vec<String> {
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_success_commits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = execute_transaction(&db, |_txn| Box::pin(async { Ok(7) })).await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(logged_sql(db), vec!["BEGIN", "COMMIT"]);
    }

    #[tokio::test]
    async fn test_failure_rolls_back_and_keeps_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result: AppResult<()> = execute_transaction(&db, |_txn| {
            Box::pin(async { Err(AppError::field("email", "taken")) })
        })
        .await;

        assert_eq!(result.unwrap_err().field_name(), Some("email"));
        assert_eq!(logged_sql(db), vec!["BEGIN", "ROLLBACK"]);
    }
}
