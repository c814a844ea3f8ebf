//! Application settings (database location, ticket code seed).
//!
//! The settings file is always `~/.config/game-store/settings.toml`, so
//! every front end resolves the database path the same way.

use std::io;
use std::path::{Path, PathBuf};

use game_store_core::TicketCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShopSettings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub tickets: TicketSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketSettings {
    /// Code the sequence continues from when no ticket is stored yet.
    #[serde(default = "default_initial_code")]
    pub initial_code: String,
}

fn default_initial_code() -> String {
    TicketCode::INITIAL.to_string()
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            initial_code: default_initial_code(),
        }
    }
}

impl ShopSettings {
    /// The configured seed code, or [`TicketCode::INITIAL`] if it is malformed.
    pub fn initial_code(&self) -> TicketCode {
        self.tickets.initial_code.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring tickets.initial_code: {e}");
            TicketCode::INITIAL
        })
    }
}

/// Returns `~/.config/game-store/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-store").join("settings.toml")
}

/// Where the database lives when nothing else says otherwise:
/// `~/.local/share/game-store/store.db` (or the platform equivalent).
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("game-store").join("store.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_database_path`]
pub fn resolve_database_path(cli_override: Option<PathBuf>, settings: &ShopSettings) -> PathBuf {
    cli_override
        .or_else(|| settings.database.path.clone())
        .unwrap_or_else(default_database_path)
}

/// Load settings from the default location.
pub fn load_settings() -> ShopSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> ShopSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            ShopSettings::default()
        }),
        Err(_) => ShopSettings::default(),
    }
}

pub fn save_settings(settings: &ShopSettings) -> io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// Save settings to `path` atomically (write to temp, then rename).
pub fn save_settings_to(path: &Path, settings: &ShopSettings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// The settings as pretty-printed TOML, for display.
pub fn settings_string(settings: &ShopSettings) -> String {
    toml::to_string_pretty(settings).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
