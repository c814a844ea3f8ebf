use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_core::{Developer, DeveloperDetail};
use game_store_lib::{DeveloperForm, Shop};

use super::{heading, id_label, set_field};
use crate::cli_types::{DeveloperAction, DeveloperArgs};
use crate::CliError;

fn fill(args: DeveloperArgs, mut form: DeveloperForm) -> DeveloperForm {
    set_field(&mut form.name, args.name);
    set_field(&mut form.email, args.email);
    set_field(&mut form.experience, args.experience);
    set_field(&mut form.kind, args.kind);
    form
}

fn print_developer(detail: &DeveloperDetail) {
    let dev = &detail.developer;
    log::info!(
        "  {} {} <{}>, {} year(s), {}",
        id_label(dev.id),
        dev.name.if_supports_color(Stdout, |t| t.bold()),
        dev.email,
        dev.experience,
        dev.kind,
    );
    if !detail.games.is_empty() {
        let games: Vec<String> = detail.games.iter().map(ToString::to_string).collect();
        log::info!("        Games: {}", games.join(", "));
    }
}

pub(crate) fn run(shop: &mut Shop, action: DeveloperAction) -> Result<(), CliError> {
    match action {
        DeveloperAction::List => {
            let developers = shop.developers()?;
            heading("Developers", developers.len());
            developers.iter().for_each(print_developer);
        }
        DeveloperAction::Add(args) => {
            let dev = shop.create_developer(&fill(args, DeveloperForm::default()))?;
            log::info!("Added developer {} {}", id_label(dev.id), dev);
        }
        DeveloperAction::Update { id, fields } => {
            let current = shop.find::<Developer>(id)?.developer;
            let dev = shop.update_developer(id, &fill(fields, DeveloperForm::from(&current)))?;
            log::info!("Updated developer {} {}", id_label(dev.id), dev);
        }
        DeveloperAction::Delete { id } => {
            shop.delete::<Developer>(id)?;
            log::info!("Deleted developer {}", id_label(id));
        }
        DeveloperAction::Games { id } => {
            let developer = shop.find::<Developer>(id)?.developer;
            let games = shop.games_of_developer(id)?;
            heading(&format!("Games by {developer}"), games.len());
            for game in &games {
                log::info!(
                    "  {} {}, {}, {}",
                    id_label(game.id),
                    game,
                    game.genre,
                    game.release_date
                );
            }
        }
    }
    Ok(())
}
