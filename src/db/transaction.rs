//! Scoped transaction execution.
//!
//! `with_transaction` opens a transaction on a resolved connection
//! reference, invokes a caller-supplied unit of work with the transaction
//! handle, and guarantees that exactly one of commit or rollback happens on
//! every exit path. The `BEGIN`/`END` log pair brackets the success path;
//! an aborted transaction logs only `BEGIN`, which lets log inspection tell
//! completed transactions apart from aborted ones.

use crate::db::pool::DbPool;
use crate::error::{DbError, DbResult};
use crate::models::ConnectionReference;
use futures_util::future::BoxFuture;
use sqlx::{MySql, Postgres, Sqlite, Transaction};
use tracing::{info, warn};

/// Database-specific transaction wrapper.
pub enum DbTransaction {
    MySql(Transaction<'static, MySql>),
    Postgres(Transaction<'static, Postgres>),
    Sqlite(Transaction<'static, Sqlite>),
}

impl DbTransaction {
    /// Execute a statement within the transaction, returning affected rows.
    pub async fn execute(&mut self, sql: &str) -> DbResult<u64> {
        let rows_affected = match self {
            DbTransaction::MySql(tx) => sqlx::query(sql)
                .execute(&mut **tx)
                .await
                .map_err(DbError::from)?
                .rows_affected(),
            DbTransaction::Postgres(tx) => sqlx::query(sql)
                .execute(&mut **tx)
                .await
                .map_err(DbError::from)?
                .rows_affected(),
            DbTransaction::Sqlite(tx) => sqlx::query(sql)
                .execute(&mut **tx)
                .await
                .map_err(DbError::from)?
                .rows_affected(),
        };
        Ok(rows_affected)
    }

    /// Commit the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self {
            DbTransaction::MySql(tx) => tx.commit().await.map_err(DbError::from),
            DbTransaction::Postgres(tx) => tx.commit().await.map_err(DbError::from),
            DbTransaction::Sqlite(tx) => tx.commit().await.map_err(DbError::from),
        }
    }

    /// Rollback the transaction.
    pub async fn rollback(self) -> DbResult<()> {
        match self {
            DbTransaction::MySql(tx) => tx.rollback().await.map_err(DbError::from),
            DbTransaction::Postgres(tx) => tx.rollback().await.map_err(DbError::from),
            DbTransaction::Sqlite(tx) => tx.rollback().await.map_err(DbError::from),
        }
    }
}

async fn begin(pool: &DbPool) -> DbResult<DbTransaction> {
    match pool {
        DbPool::MySql(pool) => Ok(DbTransaction::MySql(pool.begin().await?)),
        DbPool::Postgres(pool) => Ok(DbTransaction::Postgres(pool.begin().await?)),
        DbPool::Sqlite(pool) => Ok(DbTransaction::Sqlite(pool.begin().await?)),
    }
}

/// Run a callback function within a transaction.
///
/// The transaction is committed when `work` returns `Ok` and rolled back
/// when it returns `Err`; the work's error propagates to the caller
/// unchanged, with no retries. A rollback failure is logged but never masks
/// the original error.
pub async fn with_transaction<T, F>(reference: &ConnectionReference, work: F) -> DbResult<T>
where
    F: for<'t> FnOnce(&'t mut DbTransaction) -> BoxFuture<'t, DbResult<T>>,
{
    let mut tx = begin(reference.connection.pool()).await?;
    let tx_tag = generate_transaction_tag();

    info!(
        connection_id = %reference.id,
        transaction = %tx_tag,
        "BEGIN: transaction"
    );

    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            info!(
                connection_id = %reference.id,
                transaction = %tx_tag,
                "END: transaction"
            );
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(
                    connection_id = %reference.id,
                    transaction = %tx_tag,
                    error = %rollback_err,
                    "Rollback failed after work error"
                );
            }
            Err(err)
        }
    }
}

/// Generate a unique transaction tag for log correlation.
fn generate_transaction_tag() -> String {
    format!("tx_{}", uuid::Uuid::new_v4().simple())
}
