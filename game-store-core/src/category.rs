//! Enumerated categories used by the store's entities.
//!
//! Each category has a canonical name (`as_str()`), used both for display and
//! as the value stored in the database, plus a set of accepted aliases for
//! case-insensitive parsing of form input.

use std::fmt;
use std::str::FromStr;

/// Error returned when a string matches no variant of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError {
    pub category: &'static str,
    pub value: String,
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.category, self.value)
    }
}

impl std::error::Error for CategoryParseError {}

/// Case-insensitive lookup of `s` against each variant's name and aliases.
fn parse_category<T: Copy>(
    category: &'static str,
    s: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
    aliases: impl Fn(T) -> &'static [&'static str],
) -> Result<T, CategoryParseError> {
    let lower = s.trim().to_lowercase();
    for &variant in all {
        if name(variant).to_lowercase() == lower || aliases(variant).contains(&lower.as_str()) {
            return Ok(variant);
        }
    }
    Err(CategoryParseError {
        category,
        value: s.to_string(),
    })
}

// ── Genre ───────────────────────────────────────────────────────────────────

/// Game genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    Rpg,
    Strategy,
    Simulation,
    Sports,
    Racing,
    Shooter,
    Platformer,
    Puzzle,
    Fighting,
    Horror,
}

const ALL_GENRES: &[Genre] = &[
    Genre::Action,
    Genre::Adventure,
    Genre::Rpg,
    Genre::Strategy,
    Genre::Simulation,
    Genre::Sports,
    Genre::Racing,
    Genre::Shooter,
    Genre::Platformer,
    Genre::Puzzle,
    Genre::Fighting,
    Genre::Horror,
];

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Rpg => "RPG",
            Self::Strategy => "Strategy",
            Self::Simulation => "Simulation",
            Self::Sports => "Sports",
            Self::Racing => "Racing",
            Self::Shooter => "Shooter",
            Self::Platformer => "Platformer",
            Self::Puzzle => "Puzzle",
            Self::Fighting => "Fighting",
            Self::Horror => "Horror",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Action => &["accion", "acción"],
            Self::Adventure => &["aventura"],
            Self::Rpg => &["role-playing", "rol"],
            Self::Strategy => &["estrategia"],
            Self::Simulation => &["sim", "simulacion", "simulación"],
            Self::Sports => &["sport", "deportes"],
            Self::Racing => &["carreras"],
            Self::Shooter => &["fps", "disparos"],
            Self::Platformer => &["platform", "plataformas"],
            Self::Puzzle => &["puzle"],
            Self::Fighting => &["lucha"],
            Self::Horror => &["terror", "survival horror"],
        }
    }

    pub fn all() -> &'static [Genre] {
        ALL_GENRES
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("genre", s, ALL_GENRES, |g| g.as_str(), |g| g.aliases())
    }
}

// ── Developer type ──────────────────────────────────────────────────────────

/// The kind of development work a developer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeveloperType {
    Indie,
    Freelance,
    Studio,
    Aaa,
}

const ALL_DEVELOPER_TYPES: &[DeveloperType] = &[
    DeveloperType::Indie,
    DeveloperType::Freelance,
    DeveloperType::Studio,
    DeveloperType::Aaa,
];

impl DeveloperType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indie => "Indie",
            Self::Freelance => "Freelance",
            Self::Studio => "Studio",
            Self::Aaa => "AAA",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Indie => &["independent", "independiente"],
            Self::Freelance => &["freelancer", "autonomo", "autónomo"],
            Self::Studio => &["estudio"],
            Self::Aaa => &["triple-a", "triple a"],
        }
    }

    pub fn all() -> &'static [DeveloperType] {
        ALL_DEVELOPER_TYPES
    }
}

impl fmt::Display for DeveloperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeveloperType {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(
            "development type",
            s,
            ALL_DEVELOPER_TYPES,
            |t| t.as_str(),
            |t| t.aliases(),
        )
    }
}

// ── Platform ────────────────────────────────────────────────────────────────

/// The platform a game is sold for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Pc,
    Playstation,
    Xbox,
}

const ALL_PLATFORMS: &[Platform] = &[Platform::Pc, Platform::Playstation, Platform::Xbox];

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Playstation => "Playstation",
            Self::Xbox => "Xbox",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Pc => &["windows", "computer"],
            Self::Playstation => &["ps", "psx", "sony"],
            Self::Xbox => &["microsoft"],
        }
    }

    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("platform", s, ALL_PLATFORMS, |p| p.as_str(), |p| p.aliases())
    }
}

// ── Payment method ──────────────────────────────────────────────────────────

/// How a ticket was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Card,
}

const ALL_PAYMENT_METHODS: &[PaymentMethod] = &[PaymentMethod::Cash, PaymentMethod::Card];

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
        }
    }

    /// Includes the names older databases stored for the same methods.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Cash => &["efectivo"],
            Self::Card => &["tarjeta", "credit card"],
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        ALL_PAYMENT_METHODS
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(
            "payment method",
            s,
            ALL_PAYMENT_METHODS,
            |m| m.as_str(),
            |m| m.aliases(),
        )
    }
}

// ── Entity kind ─────────────────────────────────────────────────────────────

/// The six kinds of record the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Developer,
    Game,
    Rating,
    Customer,
    Ticket,
    TicketLine,
}

impl EntityKind {
    /// Lowercase name used in user-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Game => "game",
            Self::Rating => "rating",
            Self::Customer => "customer",
            Self::Ticket => "ticket",
            Self::TicketLine => "ticket line",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "tests/category_tests.rs"]
mod tests;
