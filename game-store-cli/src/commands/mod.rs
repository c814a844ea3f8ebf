pub(crate) mod config;
pub(crate) mod customer;
pub(crate) mod developer;
pub(crate) mod game;
pub(crate) mod rating;
pub(crate) mod stats;
pub(crate) mod ticket;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Overwrite `field` when a value was given on the command line.
pub(crate) fn set_field(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Bold section heading followed by a blank line.
pub(crate) fn heading(title: &str, count: usize) {
    log::info!(
        "{} {}",
        title.if_supports_color(Stdout, |t| t.bold()),
        format!("({count})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();
}

/// Id column shared by every listing.
pub(crate) fn id_label(id: game_store_core::Id) -> String {
    format!("#{id:<4}")
        .if_supports_color(Stdout, |t| t.cyan())
        .to_string()
}
