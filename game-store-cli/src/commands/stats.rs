use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_lib::Shop;

use crate::CliError;

pub(crate) fn run(shop: &Shop) -> Result<(), CliError> {
    let stats = shop.counts()?;
    let next = shop.next_ticket_code();

    log::info!(
        "{}",
        "Store Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Developers:     {:>8}", stats.developers);
    log::info!("  Games:          {:>8}", stats.games);
    log::info!("  Dev/game links: {:>8}", stats.developer_links);
    log::info!("  Ratings:        {:>8}", stats.ratings);
    log::info!("  Customers:      {:>8}", stats.customers);
    log::info!("  Tickets:        {:>8}", stats.tickets);
    log::info!("  Ticket lines:   {:>8}", stats.ticket_lines);
    match next {
        Ok(code) => log::info!("  Next ticket:    {:>8}", code.to_string()),
        Err(e) => log::warn!("{}", e.user_message()),
    }
    Ok(())
}
