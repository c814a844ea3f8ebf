//! SQLite persistence layer for the game store.
//!
//! Provides schema creation and migration, per-entity row operations, eager
//! detail queries, and the transactional [`Store`] handle on top of them
//! (via rusqlite with bundled feature).

pub mod error;
pub mod operations;
pub mod queries;
pub mod record;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use queries::StoreCounts;
pub use record::Record;
pub use schema::{open_database, open_memory, SchemaError, CURRENT_VERSION};
pub use store::Store;
