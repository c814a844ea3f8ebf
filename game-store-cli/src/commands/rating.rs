use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_core::Rating;
use game_store_lib::{RatingForm, Shop};

use super::{heading, id_label, set_field};
use crate::cli_types::{RatingAction, RatingArgs};
use crate::CliError;

fn fill(args: RatingArgs, mut form: RatingForm) -> RatingForm {
    set_field(&mut form.source, args.source);
    set_field(&mut form.score, args.score);
    set_field(&mut form.date, args.date);
    if args.game.is_some() {
        form.game_id = args.game;
    }
    form
}

pub(crate) fn run(shop: &Shop, action: RatingAction) -> Result<(), CliError> {
    match action {
        RatingAction::List => {
            let ratings = shop.ratings()?;
            heading("Ratings", ratings.len());
            for detail in &ratings {
                log::info!(
                    "  {} {} for {} on {}",
                    id_label(detail.rating.id),
                    detail.rating.to_string().if_supports_color(Stdout, |t| t.bold()),
                    detail.game,
                    detail.rating.date,
                );
            }
        }
        RatingAction::Add(args) => {
            let rating = shop.create_rating(&fill(args, RatingForm::default()))?;
            log::info!("Added rating {} {}", id_label(rating.id), rating);
        }
        RatingAction::Update { id, fields } => {
            let current = shop.find::<Rating>(id)?.rating;
            let rating = shop.update_rating(id, &fill(fields, RatingForm::from(&current)))?;
            log::info!("Updated rating {} {}", id_label(rating.id), rating);
        }
        RatingAction::Delete { id } => {
            shop.delete::<Rating>(id)?;
            log::info!("Deleted rating {}", id_label(id));
        }
    }
    Ok(())
}
