//! SQLite storage for the Picfeed data model.
//!
//! `db::Database` owns the connection pool and the schema; each repository
//! in `db::repositories` wraps a cloned pool and maps rows to the record
//! types from `picfeed_types`. Relationships are followed by querying on
//! foreign keys, never by holding references between records.

pub mod config;
pub mod db;

pub use db::{Database, StoreError, StoreResult};
