//! Data models for the connection resolution layer.

pub mod connection;

pub use connection::{ClientKind, ConnectionInput, ConnectionReference, ConnectionSettings};
