//! Connection resolution.
//!
//! Turns a heterogeneous set of connection inputs - raw settings, live
//! instances, singletons or lists - into a uniform, order-preserving list of
//! identified connection references.

use crate::config::connection_id;
use crate::db::pool::{ConnectionInstance, create_instance};
use crate::error::{DbError, DbResult};
use crate::models::{ConnectionInput, ConnectionReference, ConnectionSettings};
use tracing::info;

/// Database connections given by the user or the CLI frontend.
///
/// A single settings value, a list of settings, a single live instance, a
/// list of instances, or pre-tagged inputs are all accepted interchangeably
/// at the same call site via `From`.
#[derive(Debug)]
pub enum DatabaseConnections {
    Single(ConnectionInput),
    Many(Vec<ConnectionInput>),
}

impl DatabaseConnections {
    /// Normalize to a sequence, preserving input order.
    fn into_inputs(self) -> Vec<ConnectionInput> {
        match self {
            Self::Single(input) => vec![input],
            Self::Many(inputs) => inputs,
        }
    }
}

impl From<ConnectionSettings> for DatabaseConnections {
    fn from(settings: ConnectionSettings) -> Self {
        Self::Single(settings.into())
    }
}

impl From<ConnectionInstance> for DatabaseConnections {
    fn from(instance: ConnectionInstance) -> Self {
        Self::Single(instance.into())
    }
}

impl From<ConnectionInput> for DatabaseConnections {
    fn from(input: ConnectionInput) -> Self {
        Self::Single(input)
    }
}

impl From<Vec<ConnectionSettings>> for DatabaseConnections {
    fn from(list: Vec<ConnectionSettings>) -> Self {
        Self::Many(list.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<ConnectionInstance>> for DatabaseConnections {
    fn from(list: Vec<ConnectionInstance>) -> Self {
        Self::Many(list.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<ConnectionInput>> for DatabaseConnections {
    fn from(list: Vec<ConnectionInput>) -> Self {
        Self::Many(list)
    }
}

/// Map user provided connection(s) to identified connection references.
///
/// Output order matches input order; no identity-based merging is performed,
/// so duplicate logical targets yield multiple references sharing an id.
/// Resolution is fail-fast: the first malformed, unsupported or uncreatable
/// element aborts the whole call. Lazy pools already created for earlier
/// elements are not torn down here; they remain the caller's to reason about.
pub fn resolve(connections: impl Into<DatabaseConnections>) -> DbResult<Vec<ConnectionReference>> {
    connections
        .into()
        .into_inputs()
        .into_iter()
        .map(resolve_input)
        .collect()
}

fn resolve_input(input: ConnectionInput) -> DbResult<ConnectionReference> {
    match input {
        ConnectionInput::Instance(instance) => {
            let settings = instance.settings().clone();
            let id = connection_id(&settings);

            info!(
                database = %settings.database,
                "Received connection instance to database"
            );

            Ok(ConnectionReference {
                id,
                connection: instance,
                owned: false,
            })
        }
        ConnectionInput::Config(settings) => {
            validate_settings(&settings)?;
            let id = connection_id(&settings);

            info!(
                host = %settings.host_or_default(),
                database = %settings.database,
                "Creating a connection to database"
            );

            let connection = create_instance(&settings)?;

            Ok(ConnectionReference {
                id,
                connection,
                owned: true,
            })
        }
    }
}

/// Reject settings that cannot describe any database target.
fn validate_settings(settings: &ConnectionSettings) -> DbResult<()> {
    if settings.client.trim().is_empty() {
        return Err(DbError::malformed("connection settings without a client tag"));
    }
    if settings.database.trim().is_empty() {
        return Err(DbError::malformed(
            "connection settings without a database name",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_empty_database() {
        let mut settings = ConnectionSettings::new("pg", "localhost", "app");
        settings.database = String::new();
        let result = resolve(settings);
        assert!(matches!(
            result,
            Err(DbError::MalformedConnectionInput { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_client_tag() {
        let mut settings = ConnectionSettings::sqlite("test.db");
        settings.client = "  ".to_string();
        let result = resolve(settings);
        assert!(matches!(
            result,
            Err(DbError::MalformedConnectionInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_singleton_config() {
        let settings = ConnectionSettings::sqlite("test.db");
        let refs = resolve(settings.clone()).expect("should resolve");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, connection_id(&settings));
        assert!(refs[0].owned);
    }

    #[tokio::test]
    async fn test_resolve_fail_fast_on_unsupported_client() {
        let inputs = vec![
            ConnectionSettings::sqlite("one.db"),
            ConnectionSettings::new("mssql", "localhost", "legacy"),
            ConnectionSettings::sqlite("two.db"),
        ];
        let result = resolve(inputs);
        assert!(matches!(result, Err(DbError::UnsupportedClient { .. })));
    }
}
