//! dbforge library
//!
//! Scaffolds SQL migration files and resolves heterogeneous database
//! connection inputs - raw settings or already-open instances - into
//! uniform identified references, with a scoped-transaction primitive
//! around each resolved connection.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use db::{ConnectionInstance, DbPool, DbTransaction, create_instance, resolve, with_transaction};
pub use error::{DbError, DbResult};
pub use models::{ConnectionInput, ConnectionReference, ConnectionSettings};
