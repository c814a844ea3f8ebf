use game_store_core::{CoreError, EntityKind, Id};
use game_store_db::StoreError;
use thiserror::Error;

use crate::cart::CartError;
use crate::roster::RosterError;

/// Errors surfaced by the [`crate::Shop`] facade.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Form input could not be turned into an entity; nothing was stored
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A delete was blocked because another row still references the entity
    #[error("Cannot delete {kind}: it is linked to another table")]
    ReferentialIntegrity { kind: EntityKind },

    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: Id },

    /// Every ticket code up to Z999 has been issued
    #[error("Ticket code sequence exhausted")]
    ExhaustedSequence,

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl ShopError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the user can fix the problem and retry.
    ///
    /// Storage failures and an exhausted code sequence are not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::ExhaustedSequence)
    }

    /// A message fit to show to the person using the front end.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::ReferentialIntegrity { kind } => format!(
                "Cannot delete this {kind} because it is linked to another table. \
                 Remove that link before deleting the {kind}."
            ),
            Self::NotFound { kind, id } => format!("There is no {kind} with id {id}."),
            Self::ExhaustedSequence => {
                "No more ticket codes are available after Z999.".to_string()
            }
            Self::Storage(e) => format!("The database reported an error: {e}"),
            Self::Cart(e) => e.to_string(),
            Self::Roster(e) => e.to_string(),
        }
    }
}

impl From<StoreError> for ShopError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ReferentialIntegrity { kind } => Self::ReferentialIntegrity { kind },
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Storage(other),
        }
    }
}

impl From<CoreError> for ShopError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ExhaustedSequence => Self::ExhaustedSequence,
            other => Self::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
