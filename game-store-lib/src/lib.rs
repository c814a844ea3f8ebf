//! Application layer for the game store.
//!
//! [`Shop`] is the facade front ends talk to. It validates raw form input,
//! holds the in-progress developer roster and ticket [`Cart`], and turns
//! storage failures into [`ShopError`]s with user-facing messages.
//! Settings live in `~/.config/game-store/settings.toml` (see [`settings`]).

pub mod cart;
pub mod error;
pub mod forms;
pub mod roster;
pub mod settings;
pub mod shop;

pub use cart::{Cart, CartError, CartLine, CartState};
pub use error::ShopError;
pub use forms::{
    parse_quantity, CustomerForm, DeveloperForm, GameForm, RatingForm, TicketForm, TicketHeader,
};
pub use roster::{DeveloperRoster, RosterError};
pub use settings::ShopSettings;
pub use shop::Shop;

// Front ends need the store types without depending on the db crate directly
pub use game_store_db::{Record, Store, StoreCounts, StoreError};
