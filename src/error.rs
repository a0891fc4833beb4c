//! Error types for dbforge.
//!
//! All failures in the connection resolution layer and the file scaffolding
//! commands are expressed as `DbError` variants via `thiserror`. Caller work
//! units running inside a transaction return `DbError` as well, so their
//! failures propagate through `with_transaction` unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// An input element is neither a well-formed connection config nor a
    /// recognizable connection instance.
    #[error("Malformed connection input: {message}")]
    MalformedConnectionInput { message: String },

    /// A live instance whose shape cannot be reconciled with its declared
    /// client kind (or whose kind is unknown entirely).
    #[error("Unsupported connection instance: {message}")]
    UnsupportedInstance { message: String },

    /// The client tag names a database engine this tool cannot drive.
    #[error("Unsupported client kind: {client}")]
    UnsupportedClient { client: String },

    /// The `make` command was asked for a file type that is not implemented.
    #[error("Unsupported file type {file_type}.")]
    UnsupportedFileType { file_type: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// Create a malformed connection input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedConnectionInput {
            message: message.into(),
        }
    }

    /// Create an unsupported instance error.
    pub fn unsupported_instance(message: impl Into<String>) -> Self {
        Self::UnsupportedInstance {
            message: message.into(),
        }
    }

    /// Create an unsupported client error.
    pub fn unsupported_client(client: impl Into<String>) -> Self {
        Self::UnsupportedClient {
            client: client.into(),
        }
    }

    /// Create an unsupported file type error.
    pub fn unsupported_file_type(file_type: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            file_type: file_type.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DbError::connection(
                msg.to_string(),
                "Check the connection parameters and credentials",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::database(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut => DbError::connection(
                "Timed out acquiring a connection from the pool",
                "Check that the database server is running and accessible",
            ),
            sqlx::Error::PoolClosed => {
                DbError::connection("Connection pool is closed", "Reconnect to the database")
            }
            sqlx::Error::Io(io_err) => DbError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and database server status",
            ),
            sqlx::Error::Tls(tls_err) => DbError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Protocol(msg) => DbError::connection(
                format!("Protocol error: {}", msg),
                "Check database server compatibility",
            ),
            other => DbError::database(other.to_string(), None),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
