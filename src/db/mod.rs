//! Database abstraction layer.
//!
//! This module provides the connection resolution and transactional
//! execution layer:
//! - Connection instances and the pool factory
//! - Resolution of heterogeneous connection inputs into references
//! - Scoped transaction execution

pub mod pool;
pub mod resolver;
pub mod transaction;

pub use pool::{ConnectionInstance, DbPool, create_instance};
pub use resolver::{DatabaseConnections, resolve};
pub use transaction::{DbTransaction, with_transaction};
