//! Persistence layer: the SQLite-backed entry store.
//!
//! [`EntryStore`] owns a `sqlx::SqlitePool` and issues one statement per
//! operation, so every write is atomic at the row level without explicit
//! transactions. [`Schema`] selects between the two supported table
//! naming schemes.

pub mod schema;
pub mod sqlite;

pub use schema::Schema;
pub use sqlite::EntryStore;
