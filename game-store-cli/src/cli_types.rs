//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use game_store_core::Id;

#[derive(Parser)]
#[command(name = "game-store")]
#[command(about = "Manage the developers, games, customers and sales of a game store", long_about = None)]
pub(crate) struct Cli {
    /// Database file (defaults to the path in settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage developers
    Developer {
        #[command(subcommand)]
        action: DeveloperAction,
    },

    /// Manage games and their developers
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Manage game ratings
    Rating {
        #[command(subcommand)]
        action: RatingAction,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Issue and manage purchase tickets
    Ticket {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Show row counts for every table
    Stats,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ── Developers ──────────────────────────────────────────────────────────────

#[derive(Args, Clone, Default)]
pub(crate) struct DeveloperArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Years of experience
    #[arg(long)]
    pub experience: Option<String>,

    /// Indie, Freelance, Studio or AAA
    #[arg(long = "type")]
    pub kind: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum DeveloperAction {
    /// List developers and the games they worked on
    List,

    /// Add a developer
    Add(DeveloperArgs),

    /// Change fields of a developer (omitted fields keep their value)
    Update {
        id: Id,

        #[command(flatten)]
        fields: DeveloperArgs,
    },

    /// Delete a developer that no game links to
    Delete { id: Id },

    /// List the games of one developer
    Games { id: Id },
}

// ── Games ───────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Default)]
pub(crate) struct GameArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    /// PC, Playstation or Xbox
    #[arg(long)]
    pub platform: Option<String>,

    /// Release date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub release_date: Option<String>,

    /// Developer ids, in order (replaces the current list)
    #[arg(long, value_delimiter = ',')]
    pub developers: Option<Vec<Id>>,
}

#[derive(Subcommand)]
pub(crate) enum GameAction {
    /// List games with their developers
    List,

    /// Add a game
    Add(GameArgs),

    /// Change fields of a game (omitted fields keep their value)
    Update {
        id: Id,

        #[command(flatten)]
        fields: GameArgs,
    },

    /// Delete a game that has no ratings or sales
    Delete { id: Id },
}

// ── Ratings ─────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Default)]
pub(crate) struct RatingArgs {
    /// Id of the rated game
    #[arg(long)]
    pub game: Option<Id>,

    /// Outlet that published the score
    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub score: Option<String>,

    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum RatingAction {
    /// List ratings with their games
    List,

    /// Add a rating
    Add(RatingArgs),

    /// Change fields of a rating (omitted fields keep their value)
    Update {
        id: Id,

        #[command(flatten)]
        fields: RatingArgs,
    },

    /// Delete a rating
    Delete { id: Id },
}

// ── Customers ───────────────────────────────────────────────────────────────

#[derive(Args, Clone, Default)]
pub(crate) struct CustomerArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    /// National identity document number
    #[arg(long)]
    pub national_id: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum CustomerAction {
    /// List customers and their tickets
    List,

    /// Add a customer
    Add(CustomerArgs),

    /// Change fields of a customer (omitted fields keep their value)
    Update {
        id: Id,

        #[command(flatten)]
        fields: CustomerArgs,
    },

    /// Delete a customer with no tickets
    Delete { id: Id },

    /// List the tickets of one customer
    Tickets { id: Id },
}

// ── Tickets ─────────────────────────────────────────────────────────────────

/// One `GAME_ID[:QUANTITY]` entry of `--line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineSpec {
    pub game_id: Id,
    pub quantity: u32,
}

/// Parse `GAME_ID[:QUANTITY]`; the quantity defaults to 1.
pub(crate) fn parse_line_spec(s: &str) -> Result<LineSpec, String> {
    let (game, quantity) = s.split_once(':').unwrap_or((s, "1"));
    let game_id = game
        .trim()
        .parse()
        .map_err(|_| format!("'{game}' is not a game id"))?;
    let quantity = game_store_lib::parse_quantity(quantity).map_err(|e| e.user_message())?;
    Ok(LineSpec { game_id, quantity })
}

#[derive(Args, Clone, Default)]
pub(crate) struct TicketArgs {
    /// Id of the buying customer
    #[arg(long)]
    pub customer: Option<Id>,

    /// Cash or Card
    #[arg(long)]
    pub payment: Option<String>,

    /// Ticket date (defaults to today for new tickets)
    #[arg(long)]
    pub date: Option<String>,

    /// A game and quantity, as GAME_ID[:QUANTITY]; repeat for more lines
    #[arg(long = "line", value_parser = parse_line_spec)]
    pub lines: Vec<LineSpec>,
}

#[derive(Subcommand)]
pub(crate) enum TicketAction {
    /// List tickets with their lines
    List,

    /// Show one ticket in full
    Show { id: Id },

    /// Issue a new ticket
    Add(TicketArgs),

    /// Change a ticket; any --line replaces all of its lines
    Update {
        id: Id,

        #[command(flatten)]
        fields: TicketArgs,
    },

    /// Delete a ticket and its lines
    Delete { id: Id },

    /// Print the code the next ticket will get
    NextCode,
}

// ── Config ──────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and resolved database path
    Show,

    /// Save a database path to settings.toml
    SetDb { path: PathBuf },

    /// Print the settings file path
    Path,
}
