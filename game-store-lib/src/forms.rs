//! Raw form input and its validation.
//!
//! Every form holds the text a user typed (plus the ids of anything picked
//! from a list) and turns it into an unsaved entity, or a
//! [`ShopError::Validation`] naming the first bad field.

use std::str::FromStr;

use game_store_core::*;

use crate::error::ShopError;
use crate::roster::DeveloperRoster;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ShopError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ShopError::validation(format!("{field} is required")));
    }
    Ok(value)
}

fn email(field: &str, value: &str) -> Result<String, ShopError> {
    let value = required(field, value)?;
    match value.split_once('@') {
        Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(value.to_string()),
        _ => Err(ShopError::validation(format!(
            "{field} '{value}' is not an email address"
        ))),
    }
}

fn category<T>(field: &str, value: &str) -> Result<T, ShopError>
where
    T: FromStr<Err = CategoryParseError>,
{
    required(field, value)?
        .parse()
        .map_err(|e: CategoryParseError| ShopError::validation(e.to_string()))
}

fn whole_number(field: &str, value: &str) -> Result<u32, ShopError> {
    required(field, value)?.parse().map_err(|_| {
        ShopError::validation(format!("{field} must be a whole number of zero or more"))
    })
}

/// A non-negative decimal. A comma is accepted as the decimal separator.
fn amount(field: &str, value: &str) -> Result<Decimal, ShopError> {
    let text = required(field, value)?.replace(',', ".");
    let parsed: Decimal = text
        .parse()
        .map_err(|_| ShopError::validation(format!("{field} must be a number")))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(ShopError::validation(format!("{field} cannot be negative")));
    }
    Ok(parsed)
}

fn date(field: &str, value: &str) -> Result<NaiveDate, ShopError> {
    let value = required(field, value)?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ShopError::validation(format!("{field} must be a date like 2024-01-31")))
}

fn selected(what: &str, id: Option<Id>) -> Result<Id, ShopError> {
    id.ok_or_else(|| ShopError::validation(format!("Select a {what}")))
}

/// Parse a quantity typed for a cart line.
pub fn parse_quantity(value: &str) -> Result<u32, ShopError> {
    let quantity = whole_number("Quantity", value)?;
    if quantity == 0 {
        return Err(ShopError::validation("Quantity must be at least 1"));
    }
    Ok(quantity)
}

// ── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DeveloperForm {
    pub name: String,
    pub email: String,
    pub experience: String,
    pub kind: String,
}

impl DeveloperForm {
    pub fn to_developer(&self) -> Result<Developer, ShopError> {
        Ok(Developer::new(
            required("Name", &self.name)?,
            email("Email", &self.email)?,
            whole_number("Experience", &self.experience)?,
            category("Developer type", &self.kind)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameForm {
    pub title: String,
    pub genre: String,
    pub price: String,
    pub platform: String,
    pub release_date: String,
}

impl GameForm {
    /// Build a game linked to every developer in `roster`.
    pub fn to_game(&self, roster: &DeveloperRoster) -> Result<Game, ShopError> {
        Ok(Game::new(
            required("Title", &self.title)?,
            category("Genre", &self.genre)?,
            amount("Price", &self.price)?,
            category("Platform", &self.platform)?,
            date("Release date", &self.release_date)?,
        )
        .with_developers(roster.ids()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RatingForm {
    pub source: String,
    pub score: String,
    pub date: String,
    pub game_id: Option<Id>,
}

impl RatingForm {
    pub fn to_rating(&self) -> Result<Rating, ShopError> {
        Ok(Rating::new(
            selected("game", self.game_id)?,
            required("Source", &self.source)?,
            amount("Score", &self.score)?,
            date("Rating date", &self.date)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub name: String,
    pub surname: String,
    pub national_id: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl CustomerForm {
    pub fn to_customer(&self) -> Result<Customer, ShopError> {
        Ok(Customer::new(
            required("Name", &self.name)?,
            required("Surname", &self.surname)?,
            required("National id", &self.national_id)?,
            required("Address", &self.address)?,
            email("Email", &self.email)?,
            required("Phone", &self.phone)?,
        ))
    }
}

/// Header fields of a ticket. Lines come from a [`crate::Cart`].
#[derive(Debug, Clone, Default)]
pub struct TicketForm {
    pub payment: String,
    pub date: String,
    pub customer_id: Option<Id>,
}

/// A validated [`TicketForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketHeader {
    pub payment: PaymentMethod,
    pub date: NaiveDate,
    pub customer_id: Id,
}

impl TicketForm {
    pub fn to_header(&self) -> Result<TicketHeader, ShopError> {
        Ok(TicketHeader {
            payment: category("Payment method", &self.payment)?,
            date: date("Ticket date", &self.date)?,
            customer_id: selected("customer", self.customer_id)?,
        })
    }
}

// ── Prefill ─────────────────────────────────────────────────────────────────

impl From<&Developer> for DeveloperForm {
    fn from(dev: &Developer) -> Self {
        Self {
            name: dev.name.clone(),
            email: dev.email.clone(),
            experience: dev.experience.to_string(),
            kind: dev.kind.to_string(),
        }
    }
}

impl From<&Game> for GameForm {
    fn from(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            genre: game.genre.to_string(),
            price: game.price.to_string(),
            platform: game.platform.to_string(),
            release_date: game.release_date.to_string(),
        }
    }
}

impl From<&Rating> for RatingForm {
    fn from(rating: &Rating) -> Self {
        Self {
            source: rating.source.clone(),
            score: rating.score.to_string(),
            date: rating.date.to_string(),
            game_id: Some(rating.game_id),
        }
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            surname: customer.surname.clone(),
            national_id: customer.national_id.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }
}

impl From<&Ticket> for TicketForm {
    fn from(ticket: &Ticket) -> Self {
        Self {
            payment: ticket.payment.to_string(),
            date: ticket.date.to_string(),
            customer_id: Some(ticket.customer_id),
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
