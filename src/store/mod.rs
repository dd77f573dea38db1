//! Persistence layer — libSQL-backed rejection counter.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{CounterEntry, CounterStore};
