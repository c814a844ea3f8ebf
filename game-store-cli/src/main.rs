//! game-store CLI
//!
//! Command-line front end for the game store: developers, games, ratings,
//! customers, and purchase tickets.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use game_store_lib::settings::{self, ShopSettings};
use game_store_lib::{Shop, Store};

use cli_types::{Cli, Commands};
pub(crate) use error::CliError;

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(2);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn open_shop(cli_db: Option<std::path::PathBuf>, settings: &ShopSettings) -> Result<Shop, CliError> {
    let db_path = settings::resolve_database_path(cli_db, settings);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Using database {}", db_path.display());
    let store = Store::open(&db_path)?;
    Ok(Shop::with_settings(store, settings))
}

/// Run `f` against the shop, then close it.
fn with_shop(
    mut shop: Shop,
    f: impl FnOnce(&mut Shop) -> Result<(), CliError>,
) -> Result<(), CliError> {
    f(&mut shop)?;
    shop.close()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings::load_settings();
    let open = || open_shop(cli.db.clone(), &settings);

    match cli.command {
        Commands::Developer { action } => {
            with_shop(open()?, |shop| commands::developer::run(shop, action))
        }
        Commands::Game { action } => with_shop(open()?, |shop| commands::game::run(shop, action)),
        Commands::Rating { action } => {
            with_shop(open()?, |shop| commands::rating::run(shop, action))
        }
        Commands::Customer { action } => {
            with_shop(open()?, |shop| commands::customer::run(shop, action))
        }
        Commands::Ticket { action } => {
            with_shop(open()?, |shop| commands::ticket::run(shop, action))
        }
        Commands::Stats => with_shop(open()?, |shop| commands::stats::run(shop)),
        Commands::Config { action } => {
            commands::config::run(action, settings.clone(), cli.db.clone())
        }
    }
}
