use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_core::{Game, GameDetail, Id};
use game_store_lib::{GameForm, Shop};

use super::{heading, id_label, set_field};
use crate::cli_types::{GameAction, GameArgs};
use crate::CliError;

fn fill(args: &mut GameArgs, mut form: GameForm) -> GameForm {
    set_field(&mut form.title, args.title.take());
    set_field(&mut form.genre, args.genre.take());
    set_field(&mut form.price, args.price.take());
    set_field(&mut form.platform, args.platform.take());
    set_field(&mut form.release_date, args.release_date.take());
    form
}

/// Replace the shop's developer roster with `ids`, in order.
fn load_roster(shop: &mut Shop, ids: &[Id]) -> Result<(), CliError> {
    shop.clear_roster();
    for &id in ids {
        shop.add_to_roster(id)?;
    }
    Ok(())
}

fn print_game(detail: &GameDetail) {
    let game = &detail.game;
    log::info!(
        "  {} {} [{}] {}, released {}",
        id_label(game.id),
        game.to_string().if_supports_color(Stdout, |t| t.bold()),
        game.genre,
        game.price.if_supports_color(Stdout, |t| t.green()),
        game.release_date,
    );
    if !detail.developers.is_empty() {
        let names: Vec<&str> = detail.developers.iter().map(|d| d.name.as_str()).collect();
        log::info!("        Developers: {}", names.join(", "));
    }
}

pub(crate) fn run(shop: &mut Shop, action: GameAction) -> Result<(), CliError> {
    match action {
        GameAction::List => {
            let games = shop.games()?;
            heading("Games", games.len());
            games.iter().for_each(print_game);
        }
        GameAction::Add(mut args) => {
            load_roster(shop, args.developers.as_deref().unwrap_or_default())?;
            let form = fill(&mut args, GameForm::default());
            let game = shop.create_game(&form)?;
            log::info!("Added game {} {}", id_label(game.id), game);
        }
        GameAction::Update { id, mut fields } => {
            let current = shop.edit_game(id)?;
            if let Some(ids) = &fields.developers {
                load_roster(shop, ids)?;
            }
            let form = fill(&mut fields, GameForm::from(&current.game));
            let game = shop.update_game(id, &form)?;
            log::info!("Updated game {} {}", id_label(game.id), game);
        }
        GameAction::Delete { id } => {
            shop.delete::<Game>(id)?;
            log::info!("Deleted game {}", id_label(id));
        }
    }
    Ok(())
}
