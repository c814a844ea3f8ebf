use game_store_core::{EntityKind, Id};
use thiserror::Error;

use crate::schema::SchemaError;

/// Errors returned by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A lookup or update by id matched no row
    #[error("Entity not found: {kind} with id {id}")]
    NotFound { kind: EntityKind, id: Id },

    /// A query that needs at least one row found none (e.g. latest ticket)
    #[error("No {0} stored yet")]
    Empty(EntityKind),

    /// A delete was rejected because other rows still reference the entity
    #[error("Cannot delete {kind}: it is still referenced by another table")]
    ReferentialIntegrity { kind: EntityKind },
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: Id) -> Self {
        Self::NotFound { kind, id }
    }

    /// True for both flavours of "expected a row, found none".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Empty(_))
    }
}

/// Whether `err` is SQLite rejecting a statement on a foreign-key constraint.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
