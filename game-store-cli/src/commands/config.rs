use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_lib::settings::{self, ShopSettings};

use crate::cli_types::ConfigAction;
use crate::CliError;

pub(crate) fn run(
    action: ConfigAction,
    mut current: ShopSettings,
    cli_db: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = settings::settings_path();
    match action {
        ConfigAction::Show => {
            log::info!(
                "{}",
                "Game Store Configuration".if_supports_color(Stdout, |t| t.bold()),
            );
            crate::log_blank();
            let status = if path.exists() { "(exists)" } else { "(not found)" };
            log::info!(
                "  Settings file: {} {}",
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                status.if_supports_color(Stdout, |t| t.dimmed()),
            );
            log::info!(
                "  Database:      {}",
                settings::resolve_database_path(cli_db, &current)
                    .display()
                    .if_supports_color(Stdout, |t| t.cyan()),
            );
            log::info!("  First code:    {}", current.initial_code());
            crate::log_blank();
            for line in settings::settings_string(&current).lines() {
                log::info!("  {line}");
            }
        }
        ConfigAction::SetDb { path: db_path } => {
            let db_path = if db_path.is_absolute() {
                db_path
            } else {
                std::env::current_dir()?.join(db_path)
            };
            current.database.path = Some(db_path.clone());
            settings::save_settings(&current)
                .map_err(|e| CliError::config(format!("Failed to save {}: {e}", path.display())))?;
            log::info!("Database path set to {}", db_path.display());
        }
        ConfigAction::Path => {
            log::info!("{}", path.display());
        }
    }
    Ok(())
}
