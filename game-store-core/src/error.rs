use thiserror::Error;

use crate::category::CategoryParseError;

/// Errors raised by the domain model itself, before any storage is involved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A ticket code that is not one uppercase letter followed by three digits
    #[error("Invalid ticket code: '{0}'")]
    InvalidTicketCode(String),

    /// Every code from A001 to Z999 has been issued
    #[error("Ticket codes exhausted: no code follows Z999")]
    ExhaustedSequence,

    /// A price times quantity, or a sum of line totals, past `Decimal::MAX`
    #[error("Amount too large: the ticket total cannot be represented")]
    AmountOverflow,

    /// A category name (genre, platform, ...) that matches no variant
    #[error(transparent)]
    UnknownCategory(#[from] CategoryParseError),
}

impl CoreError {
    pub fn invalid_ticket_code(code: impl Into<String>) -> Self {
        Self::InvalidTicketCode(code.into())
    }
}
