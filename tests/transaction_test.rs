//! Integration tests for scoped transaction execution.

use dbforge::db::{DbPool, DbTransaction, resolve, with_transaction};
use dbforge::error::{DbError, DbResult};
use dbforge::models::{ConnectionReference, ConnectionSettings};

async fn sqlite_reference(dir: &tempfile::TempDir) -> ConnectionReference {
    let settings =
        ConnectionSettings::sqlite(dir.path().join("tx.db").to_string_lossy().into_owned());
    let mut refs = resolve(settings).expect("should resolve");
    let reference = refs.remove(0);

    with_transaction(&reference, |tx: &mut DbTransaction| {
        Box::pin(async move {
            tx.execute("CREATE TABLE tx_test (id INTEGER PRIMARY KEY, name TEXT)")
                .await
        })
    })
    .await
    .expect("table creation should commit");

    reference
}

async fn count_rows(reference: &ConnectionReference) -> i64 {
    let DbPool::Sqlite(pool) = reference.connection.pool().clone() else {
        panic!("expected sqlite pool");
    };
    sqlx::query_scalar("SELECT COUNT(*) FROM tx_test")
        .fetch_one(&pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_commit_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let reference = sqlite_reference(&dir).await;

    let inserted = with_transaction(&reference, |tx: &mut DbTransaction| {
        Box::pin(async move {
            tx.execute("INSERT INTO tx_test (id, name) VALUES (1, 'commit_test')")
                .await
        })
    })
    .await
    .expect("work should commit");

    assert_eq!(inserted, 1);
    assert_eq!(count_rows(&reference).await, 1);
}

#[tokio::test]
async fn test_rollback_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let reference = sqlite_reference(&dir).await;

    let result: DbResult<u64> = with_transaction(&reference, |tx: &mut DbTransaction| {
        Box::pin(async move {
            tx.execute("INSERT INTO tx_test (id, name) VALUES (2, 'rollback_test')")
                .await?;
            Err(DbError::database("work unit failed", Some("TEST".into())))
        })
    })
    .await;

    // The error surfaces to the caller unmodified.
    match result {
        Err(DbError::Database { message, sql_state }) => {
            assert_eq!(message, "work unit failed");
            assert_eq!(sql_state.as_deref(), Some("TEST"));
        }
        other => panic!("expected the work error, got {:?}", other.map(|_| ())),
    }

    // The insert was rolled back.
    assert_eq!(count_rows(&reference).await, 0);
}

#[tokio::test]
async fn test_work_result_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let reference = sqlite_reference(&dir).await;

    let value = with_transaction(&reference, |_tx: &mut DbTransaction| {
        Box::pin(async move { Ok("done".to_string()) })
    })
    .await
    .expect("work should commit");

    assert_eq!(value, "done");
}

#[tokio::test]
async fn test_independent_transactions_per_reference() {
    // Each reference wraps an independent pool; a rollback on one target
    // leaves a commit on another untouched.
    let dir = tempfile::tempdir().unwrap();
    let kept = sqlite_reference(&dir).await;

    let other_dir = tempfile::tempdir().unwrap();
    let dropped = sqlite_reference(&other_dir).await;

    with_transaction(&kept, |tx: &mut DbTransaction| {
        Box::pin(async move {
            tx.execute("INSERT INTO tx_test (id, name) VALUES (1, 'kept')")
                .await
        })
    })
    .await
    .expect("work should commit");

    let result: DbResult<u64> = with_transaction(&dropped, |tx: &mut DbTransaction| {
        Box::pin(async move {
            tx.execute("INSERT INTO tx_test (id, name) VALUES (1, 'dropped')")
                .await?;
            Err(DbError::database("abort", None))
        })
    })
    .await;
    assert!(result.is_err());

    assert_eq!(count_rows(&kept).await, 1);
    assert_eq!(count_rows(&dropped).await, 0);
}
