//! Pending ticket lines collected before a ticket is saved.
//!
//! A cart moves through four states:
//!
//! ```text
//! Empty --add--> Accumulating --commit--> Committed
//!   ^                 |   \
//!   +--remove last----+    +--cancel--> Abandoned
//! ```
//!
//! `Committed` and `Abandoned` are closed: every edit is rejected until
//! [`Cart::reset`] puts the cart back to `Empty`.

use std::fmt;

use game_store_core::{line_total, Decimal, Game, Id, TicketDetail, TicketLine};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    Empty,
    Accumulating,
    Committed,
    Abandoned,
}

impl CartState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Empty | Self::Accumulating)
    }
}

impl fmt::Display for CartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Accumulating => "accumulating",
            Self::Committed => "committed",
            Self::Abandoned => "abandoned",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("The cart is {0}; start a new one before editing")]
    Closed(CartState),

    #[error("No cart line at position {index} (the cart has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Add at least one game before saving the ticket")]
    NoLines,

    #[error("Too many copies of one game in the cart (at most {max})", max = u32::MAX)]
    QuantityTooLarge,

    #[error("Ticket total too large")]
    TotalTooLarge,
}

/// One pending game and how many copies of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub game: Game,
    pub quantity: u32,
}

impl CartLine {
    pub fn total(&self) -> Result<Decimal, CartError> {
        line_total(self.game.price, self.quantity).map_err(|_| CartError::TotalTooLarge)
    }
}

#[derive(Debug, Clone)]
pub struct Cart {
    state: CartState,
    lines: Vec<CartLine>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            state: CartState::Empty,
            lines: Vec::new(),
        }
    }

    /// Load the lines of a stored ticket for editing.
    pub fn from_ticket(detail: &TicketDetail) -> Self {
        let mut cart = Self::new();
        for line in &detail.lines {
            if let Err(e) = cart.merge(&line.game, line.line.quantity) {
                log::warn!("Skipping line {} of ticket {}: {e}", line.line.id, detail.ticket);
            }
        }
        cart
    }

    pub fn state(&self) -> CartState {
        self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the line totals, or `TotalTooLarge` if it cannot be represented.
    pub fn total(&self) -> Result<Decimal, CartError> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.total()?).ok_or(CartError::TotalTooLarge)
        })
    }

    fn ensure_open(&self) -> Result<(), CartError> {
        if self.state.is_open() {
            Ok(())
        } else {
            Err(CartError::Closed(self.state))
        }
    }

    /// Add `quantity` to the line for `game`. Nothing changes if the merged
    /// quantity or its price overflows.
    fn merge(&mut self, game: &Game, quantity: u32) -> Result<(), CartError> {
        let existing = self.lines.iter().position(|l| l.game.id == game.id);
        let current = existing.map_or(0, |i| self.lines[i].quantity);
        let merged = current
            .checked_add(quantity)
            .ok_or(CartError::QuantityTooLarge)?;
        let line = CartLine {
            game: game.clone(),
            quantity: merged,
        };
        line.total()?;

        match existing {
            Some(i) => self.lines[i] = line,
            None => self.lines.push(line),
        }
        self.state = CartState::Accumulating;
        Ok(())
    }

    /// Add `quantity` copies of `game`. A game already in the cart has its
    /// quantity increased instead of getting a second line.
    pub fn add(&mut self, game: &Game, quantity: u32) -> Result<(), CartError> {
        self.ensure_open()?;
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        self.merge(game, quantity)
    }

    /// Remove the line at `index`. Removing the last line empties the cart.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        self.ensure_open()?;
        if index >= self.lines.len() {
            return Err(CartError::OutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        let line = self.lines.remove(index);
        if self.lines.is_empty() {
            self.state = CartState::Empty;
        }
        Ok(line)
    }

    /// Remove the line for `game_id`, if there is one.
    pub fn remove_game(&mut self, game_id: Id) -> Result<Option<CartLine>, CartError> {
        self.ensure_open()?;
        match self.lines.iter().position(|l| l.game.id == game_id) {
            Some(index) => self.remove(index).map(Some),
            None => Ok(None),
        }
    }

    /// Drop every pending line without storing anything.
    pub fn cancel(&mut self) -> Result<(), CartError> {
        self.ensure_open()?;
        self.lines.clear();
        self.state = CartState::Abandoned;
        Ok(())
    }

    /// Back to an empty, editable cart from any state.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.state = CartState::Empty;
    }

    /// Priced, unsaved ticket lines for the current contents.
    pub fn ticket_lines(&self) -> Result<Vec<TicketLine>, CartError> {
        self.ensure_open()?;
        if self.lines.is_empty() {
            return Err(CartError::NoLines);
        }
        self.lines
            .iter()
            .map(|l| {
                TicketLine::priced(&l.game, l.quantity).map_err(|_| CartError::TotalTooLarge)
            })
            .collect()
    }

    /// Mark the contents as stored. Called once the ticket save succeeded.
    pub(crate) fn mark_committed(&mut self) {
        self.state = CartState::Committed;
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
