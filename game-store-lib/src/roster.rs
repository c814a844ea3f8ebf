//! The list of developers attached to a game while it is being edited.

use game_store_core::{Developer, GameDetail, Id};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("{name} is already in the list")]
    Duplicate { name: String },

    #[error("No developer at position {index} (the list has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Developers chosen for a game, in the order they were added.
///
/// Nothing here touches storage; the roster's ids are written when the game
/// is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeveloperRoster {
    developers: Vec<Developer>,
}

impl DeveloperRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the developers already linked to a stored game.
    pub fn from_game(detail: &GameDetail) -> Self {
        Self {
            developers: detail.developers.clone(),
        }
    }

    /// Append `developer`, rejecting one whose id is already present.
    pub fn add(&mut self, developer: Developer) -> Result<(), RosterError> {
        if self.contains(developer.id) {
            return Err(RosterError::Duplicate {
                name: developer.name,
            });
        }
        self.developers.push(developer);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Developer, RosterError> {
        if index >= self.developers.len() {
            return Err(RosterError::OutOfRange {
                index,
                len: self.developers.len(),
            });
        }
        Ok(self.developers.remove(index))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.developers.iter().any(|d| d.id == id)
    }

    pub fn ids(&self) -> Vec<Id> {
        self.developers.iter().map(|d| d.id).collect()
    }

    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }

    pub fn len(&self) -> usize {
        self.developers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.developers.is_empty()
    }

    pub fn clear(&mut self) {
        self.developers.clear();
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
