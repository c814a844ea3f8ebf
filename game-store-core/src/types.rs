//! Entity types for the store.
//!
//! Each entity is a plain record whose fields mirror its database row.
//! Equality is structural over every field, including the id. Related
//! collections are not part of the entity; they travel in the `*Detail`
//! types returned by list queries.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::category::{DeveloperType, Genre, PaymentMethod, Platform};
use crate::error::CoreError;
use crate::ticket_code::TicketCode;

/// Row identifier assigned by the store on insert.
pub type Id = i64;

/// Id carried by an entity that has not been persisted yet.
pub const UNSAVED_ID: Id = 0;

// ── Developer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Years of experience.
    pub experience: u32,
    pub kind: DeveloperType,
}

impl Developer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        experience: u32,
        kind: DeveloperType,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            email: email.into(),
            experience,
            kind,
        }
    }
}

impl fmt::Display for Developer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game on sale.
///
/// The game owns its side of the developer link: `developer_ids` is written
/// to the join table whenever the game is saved or updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: Id,
    pub title: String,
    pub genre: Genre,
    pub price: Decimal,
    pub platform: Platform,
    pub release_date: NaiveDate,
    pub developer_ids: Vec<Id>,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        genre: Genre,
        price: Decimal,
        platform: Platform,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            genre,
            price,
            platform,
            release_date,
            developer_ids: Vec::new(),
        }
    }

    pub fn with_developers(mut self, ids: impl IntoIterator<Item = Id>) -> Self {
        self.developer_ids = ids.into_iter().collect();
        self
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.platform)
    }
}

// ── Rating ──────────────────────────────────────────────────────────────────

/// A review score for a game from some outlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: Id,
    pub game_id: Id,
    pub source: String,
    pub score: Decimal,
    pub date: NaiveDate,
}

impl Rating {
    pub fn new(game_id: Id, source: impl Into<String>, score: Decimal, date: NaiveDate) -> Self {
        Self {
            id: UNSAVED_ID,
            game_id,
            source: source.into(),
            score,
            date,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.score)
    }
}

// ── Customer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Id,
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        national_id: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            surname: surname.into(),
            national_id: national_id.into(),
            address: address.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

// ── Ticket ──────────────────────────────────────────────────────────────────

/// A purchase receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Id,
    pub code: TicketCode,
    pub payment: PaymentMethod,
    pub date: NaiveDate,
    /// Sum of the line totals. Recomputed by the facade on every save.
    pub total: Decimal,
    pub customer_id: Id,
}

impl Ticket {
    /// Sum of the totals of `lines`.
    pub fn total_of<'a>(
        lines: impl IntoIterator<Item = &'a TicketLine>,
    ) -> Result<Decimal, CoreError> {
        lines
            .into_iter()
            .try_fold(Decimal::ZERO, |sum, l| sum.checked_add(l.total))
            .ok_or(CoreError::AmountOverflow)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}, {}", self.code, self.payment, self.date, self.total)
    }
}

// ── Ticket line ─────────────────────────────────────────────────────────────

/// One game-and-quantity entry within a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketLine {
    pub id: Id,
    pub ticket_id: Id,
    pub game_id: Id,
    pub quantity: u32,
    /// Unit price at time of sale times `quantity`.
    pub total: Decimal,
}

impl TicketLine {
    /// A new unsaved line for `quantity` copies of `game` at its current price.
    pub fn priced(game: &Game, quantity: u32) -> Result<Self, CoreError> {
        Ok(Self {
            id: UNSAVED_ID,
            ticket_id: UNSAVED_ID,
            game_id: game.id,
            quantity,
            total: line_total(game.price, quantity)?,
        })
    }
}

/// `price` times `quantity`, failing instead of overflowing.
pub fn line_total(price: Decimal, quantity: u32) -> Result<Decimal, CoreError> {
    price
        .checked_mul(Decimal::from(quantity))
        .ok_or(CoreError::AmountOverflow)
}

// ── Detail views ────────────────────────────────────────────────────────────

/// A developer with the games they worked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperDetail {
    pub developer: Developer,
    pub games: Vec<Game>,
}

/// A game with its developers resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDetail {
    pub game: Game,
    pub developers: Vec<Developer>,
}

/// A rating with the game it scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDetail {
    pub rating: Rating,
    pub game: Game,
}

/// A customer with their tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub tickets: Vec<Ticket>,
}

/// A ticket line with its game resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub line: TicketLine,
    pub game: Game,
}

impl fmt::Display for LineDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: quantity={}, total={}",
            self.game, self.line.quantity, self.line.total
        )
    }
}

/// A ticket with its customer and lines resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub customer: Customer,
    pub lines: Vec<LineDetail>,
}

impl TicketDetail {
    pub fn lines(&self) -> impl Iterator<Item = &TicketLine> {
        self.lines.iter().map(|l| &l.line)
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
