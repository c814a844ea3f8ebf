//! Domain model for the game store.
//!
//! Defines the six persisted entities (developers, games, ratings, customers,
//! tickets, and ticket lines), their enumerated categories, and the ticket
//! code sequence. This crate has no database dependency; `game-store-db`
//! persists these types and `game-store-lib` builds them from form input.

pub mod category;
pub mod error;
pub mod ticket_code;
pub mod types;

pub use category::{CategoryParseError, DeveloperType, EntityKind, Genre, PaymentMethod, Platform};
pub use error::CoreError;
pub use ticket_code::{next_code, TicketCode};
pub use types::*;

// Re-export the value types that appear in entity fields
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
