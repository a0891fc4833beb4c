//! Connection instances and the pool factory.
//!
//! This module wraps database-specific sqlx pools (PgPool, MySqlPool,
//! SqlitePool) in a single enum and pairs them with the settings they were
//! opened with, so identity can be computed for instances the caller
//! already owns without touching the live connection.

use crate::error::{DbError, DbResult};
use crate::models::{ClientKind, ConnectionSettings};
use sqlx::{
    MySqlPool, PgPool, SqlitePool, mysql::MySqlConnectOptions, mysql::MySqlPoolOptions,
    postgres::PgConnectOptions, postgres::PgPoolOptions, sqlite::SqliteConnectOptions,
    sqlite::SqlitePoolOptions,
};
use std::time::Duration;
use tracing::debug;

/// Database-specific connection pool.
#[derive(Debug, Clone)]
pub enum DbPool {
    MySql(MySqlPool),
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    /// Get the client kind for this pool.
    pub fn client_kind(&self) -> ClientKind {
        match self {
            DbPool::MySql(_) => ClientKind::MySql,
            DbPool::Postgres(_) => ClientKind::Postgres,
            DbPool::Sqlite(_) => ClientKind::Sqlite,
        }
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        match self {
            DbPool::MySql(pool) => pool.close().await,
            DbPool::Postgres(pool) => pool.close().await,
            DbPool::Sqlite(pool) => pool.close().await,
        }
    }

    /// Check whether the pool has been closed.
    pub fn is_closed(&self) -> bool {
        match self {
            DbPool::MySql(pool) => pool.is_closed(),
            DbPool::Postgres(pool) => pool.is_closed(),
            DbPool::Sqlite(pool) => pool.is_closed(),
        }
    }
}

/// An already-usable handle to a database: a pool together with the
/// effective settings it was opened with.
///
/// Cloning is cheap; clones share the underlying pool. Ownership of the
/// pool's lifecycle stays with whoever created the instance - the resolver
/// never closes instances it did not create.
#[derive(Debug, Clone)]
pub struct ConnectionInstance {
    pool: DbPool,
    settings: ConnectionSettings,
}

impl ConnectionInstance {
    /// Wrap an existing pool together with the settings it was opened with.
    ///
    /// Fails with `UnsupportedInstance` when the declared client kind does
    /// not match the pool variant, or when the client tag is not one we
    /// recognize at all.
    pub fn attach(pool: DbPool, settings: ConnectionSettings) -> DbResult<Self> {
        let Some(kind) = settings.client_kind() else {
            return Err(DbError::unsupported_instance(format!(
                "unrecognized client tag '{}'",
                settings.client
            )));
        };
        if kind != pool.client_kind() {
            return Err(DbError::unsupported_instance(format!(
                "pool is {} but settings declare {}",
                pool.client_kind(),
                kind
            )));
        }
        Ok(Self { pool, settings })
    }

    /// The effective connection settings (metadata-only read).
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Get the client kind for this instance.
    pub fn client_kind(&self) -> ClientKind {
        self.pool.client_kind()
    }

    /// Close the underlying pool. Only the owner of an instance should do this.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Check whether the underlying pool has been closed.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Create a new pooled connection instance for the given settings.
///
/// Pools are built lazily: no network resources are established here, so a
/// bad host or bad credentials is not detected until first use. Fails with
/// `UnsupportedClient` when the client tag names an engine we cannot drive;
/// nothing is created in that case.
pub fn create_instance(settings: &ConnectionSettings) -> DbResult<ConnectionInstance> {
    let kind = settings
        .client_kind()
        .ok_or_else(|| DbError::unsupported_client(&settings.client))?;

    let pool_opts = &settings.pool_options;
    let acquire_timeout = Duration::from_secs(pool_opts.acquire_timeout_or_default());
    let idle_timeout = Some(Duration::from_secs(pool_opts.idle_timeout_or_default()));
    let max_connections = pool_opts.max_connections_or_default(kind == ClientKind::Sqlite);
    let min_connections = pool_opts.min_connections_or_default();

    let pool = match kind {
        ClientKind::Postgres => {
            let mut options = PgConnectOptions::new()
                .host(settings.host_or_default())
                .database(&settings.database);
            if let Some(port) = settings.port {
                options = options.port(port);
            }
            if let Some(username) = &settings.username {
                options = options.username(username);
            }
            if let Some(password) = &settings.password {
                options = options.password(password);
            }

            DbPool::Postgres(
                PgPoolOptions::new()
                    .min_connections(min_connections)
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .idle_timeout(idle_timeout)
                    .connect_lazy_with(options),
            )
        }
        ClientKind::MySql => {
            let mut options = MySqlConnectOptions::new()
                .host(settings.host_or_default())
                .database(&settings.database)
                .charset("utf8mb4");
            if let Some(port) = settings.port {
                options = options.port(port);
            }
            if let Some(username) = &settings.username {
                options = options.username(username);
            }
            if let Some(password) = &settings.password {
                options = options.password(password);
            }

            DbPool::MySql(
                MySqlPoolOptions::new()
                    .min_connections(min_connections)
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .idle_timeout(idle_timeout)
                    .connect_lazy_with(options),
            )
        }
        ClientKind::Sqlite => {
            let options = SqliteConnectOptions::new()
                .filename(&settings.database)
                .create_if_missing(true);

            DbPool::Sqlite(
                SqlitePoolOptions::new()
                    .min_connections(min_connections)
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .idle_timeout(idle_timeout)
                    .connect_lazy_with(options),
            )
        }
    };

    debug!(
        client = %kind,
        database = %settings.database,
        "Created lazy connection pool"
    );

    Ok(ConnectionInstance {
        pool,
        settings: settings.clone(),
    })
}
