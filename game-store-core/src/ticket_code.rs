//! Sequential ticket codes.
//!
//! A code is one uppercase ASCII letter followed by a three-digit serial,
//! e.g. `A007`. Codes are issued in the order A001..A999, B001..B999, up to
//! Z999, after which the sequence is exhausted.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Highest serial within one letter.
pub const MAX_SERIAL: u16 = 999;

/// A parsed ticket code.
///
/// Ordering matches the issue order, which is also the lexicographic order
/// of the formatted strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketCode {
    letter: u8,
    serial: u16,
}

impl TicketCode {
    /// Seed used when no ticket has been issued yet. Its successor is `A001`.
    pub const INITIAL: TicketCode = TicketCode {
        letter: b'A',
        serial: 0,
    };

    pub fn new(letter: char, serial: u16) -> Result<Self, CoreError> {
        if !letter.is_ascii_uppercase() || serial > MAX_SERIAL {
            return Err(CoreError::invalid_ticket_code(format!("{letter}{serial:03}")));
        }
        Ok(Self {
            letter: letter as u8,
            serial,
        })
    }

    pub fn letter(&self) -> char {
        self.letter as char
    }

    pub fn serial(&self) -> u16 {
        self.serial
    }

    /// The code issued right after this one.
    pub fn next(&self) -> Result<Self, CoreError> {
        if self.serial < MAX_SERIAL {
            return Ok(Self {
                letter: self.letter,
                serial: self.serial + 1,
            });
        }
        if self.letter >= b'Z' {
            return Err(CoreError::ExhaustedSequence);
        }
        Ok(Self {
            letter: self.letter + 1,
            serial: 1,
        })
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.letter as char, self.serial)
    }
}

impl FromStr for TicketCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4
            || !bytes[0].is_ascii_uppercase()
            || !bytes[1..].iter().all(u8::is_ascii_digit)
        {
            return Err(CoreError::invalid_ticket_code(s));
        }
        let serial = bytes[1..]
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));
        Ok(Self {
            letter: bytes[0],
            serial,
        })
    }
}

/// Compute the code that follows `last`.
///
/// Fails with [`CoreError::InvalidTicketCode`] if `last` is malformed and
/// with [`CoreError::ExhaustedSequence`] once `Z999` has been issued.
pub fn next_code(last: &str) -> Result<String, CoreError> {
    let code: TicketCode = last.parse()?;
    Ok(code.next()?.to_string())
}

#[cfg(test)]
#[path = "tests/ticket_code_tests.rs"]
mod tests;
