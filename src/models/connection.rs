//! Connection-related data models.
//!
//! This module defines the value types flowing through the connection
//! resolution layer: client kinds, connection settings, the tagged input
//! union, and the resolved reference unit.

use crate::config::PoolOptions;
use crate::db::pool::ConnectionInstance;
use serde::{Deserialize, Serialize};

/// Database engines this tool can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Postgres,
    /// Includes MariaDB
    MySql,
    Sqlite,
}

impl ClientKind {
    /// Parse a client kind from the open tag carried by connection settings.
    ///
    /// Accepts the tag spellings commonly used by migration tooling
    /// ("pg", "mysql2", "sqlite3", ...). Returns `None` for engines we do
    /// not support; the factory turns that into an `UnsupportedClient` error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Some(Self::Postgres),
            "mysql" | "mysql2" | "mariadb" => Some(Self::MySql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Canonical tag used for identity computation and display.
    pub fn canonical_tag(&self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Get the display name for this client kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::MySql => "MySQL",
            Self::Sqlite => "SQLite",
        }
    }

    /// Get the default port for this client kind.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::Postgres => Some(5432),
            Self::MySql => Some(3306),
            Self::Sqlite => None,
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Settings describing how to reach one database.
///
/// Immutable once constructed; supplied by the caller or carried by a live
/// instance. The `client` tag is an open string so that settings naming an
/// engine we do not drive can still be represented (and rejected by the
/// factory with a precise error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Client tag, e.g. "pg", "mysql", "sqlite3".
    pub client: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name, or the file path for SQLite.
    pub database: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Contains sensitive data - never serialized or logged.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Connection pool configuration options.
    #[serde(default)]
    pub pool_options: PoolOptions,
}

impl ConnectionSettings {
    /// Create settings for a network database (PostgreSQL/MySQL).
    pub fn new(
        client: impl Into<String>,
        host: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            client: client.into(),
            host: Some(host.into()),
            port: None,
            database: database.into(),
            username: None,
            password: None,
            pool_options: PoolOptions::default(),
        }
    }

    /// Create settings for a SQLite database file.
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            client: "sqlite3".to_string(),
            host: None,
            port: None,
            database: path.into(),
            username: None,
            password: None,
            pool_options: PoolOptions::default(),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Resolve the client kind from the open tag.
    pub fn client_kind(&self) -> Option<ClientKind> {
        ClientKind::from_tag(&self.client)
    }

    /// The effective host, defaulting to localhost for network engines.
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or("localhost")
    }

    /// The effective port, falling back to the engine default.
    pub fn port_or_default(&self) -> Option<u16> {
        self.port
            .or_else(|| self.client_kind().and_then(|k| k.default_port()))
    }
}

/// An element of the resolver input: either raw settings to open a new
/// connection from, or an already-live instance supplied by the caller.
///
/// The tag is explicit by construction; callers never rely on structural
/// inference to tell the two shapes apart.
#[derive(Debug)]
pub enum ConnectionInput {
    Config(ConnectionSettings),
    Instance(ConnectionInstance),
}

impl From<ConnectionSettings> for ConnectionInput {
    fn from(settings: ConnectionSettings) -> Self {
        Self::Config(settings)
    }
}

impl From<ConnectionInstance> for ConnectionInput {
    fn from(instance: ConnectionInstance) -> Self {
        Self::Instance(instance)
    }
}

/// The resolved output unit: a deduplication identity plus the connection
/// it belongs to.
///
/// `owned` records provenance: `true` when the resolver created the
/// instance, `false` when the caller supplied it. Disposal decisions belong
/// to whoever owns the instance; the resolver never closes instances it did
/// not create.
#[derive(Debug)]
pub struct ConnectionReference {
    /// Deterministic identity of the logical target. Duplicate logical
    /// targets in the input produce multiple references sharing this id.
    pub id: String,
    pub connection: ConnectionInstance,
    pub owned: bool,
}
