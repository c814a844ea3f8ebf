use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_core::{Ticket, TicketDetail};
use game_store_lib::{Shop, TicketForm};

use super::{heading, id_label, set_field};
use crate::cli_types::{LineSpec, TicketAction, TicketArgs};
use crate::CliError;

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

fn fill(args: &mut TicketArgs, mut form: TicketForm) -> TicketForm {
    set_field(&mut form.payment, args.payment.take());
    set_field(&mut form.date, args.date.take());
    if args.customer.is_some() {
        form.customer_id = args.customer;
    }
    form
}

/// Start a fresh cart holding exactly `lines`.
fn fill_cart(shop: &mut Shop, lines: &[LineSpec]) -> Result<(), CliError> {
    shop.reset_cart();
    for line in lines {
        shop.add_to_cart(line.game_id, line.quantity)?;
    }
    Ok(())
}

fn print_ticket(detail: &TicketDetail) {
    let t = &detail.ticket;
    log::info!(
        "  {} {} {}, {} for {}",
        id_label(t.id),
        t.code.if_supports_color(Stdout, |s| s.bold()),
        t.payment,
        t.date,
        detail.customer,
    );
    for line in &detail.lines {
        log::info!("        {line}");
    }
    log::info!(
        "        Total: {}",
        t.total.if_supports_color(Stdout, |s| s.green())
    );
}

pub(crate) fn run(shop: &mut Shop, action: TicketAction) -> Result<(), CliError> {
    match action {
        TicketAction::List => {
            let tickets = shop.tickets()?;
            heading("Tickets", tickets.len());
            tickets.iter().for_each(print_ticket);
        }
        TicketAction::Show { id } => {
            print_ticket(&shop.find::<Ticket>(id)?);
        }
        TicketAction::Add(mut args) => {
            fill_cart(shop, &args.lines)?;
            let base = TicketForm {
                date: today(),
                ..TicketForm::default()
            };
            let detail = shop.create_ticket(&fill(&mut args, base))?;
            log::info!("Issued ticket {}", detail.ticket.code);
            print_ticket(&detail);
        }
        TicketAction::Update { id, mut fields } => {
            let current = shop.edit_ticket(id)?;
            if !fields.lines.is_empty() {
                fill_cart(shop, &fields.lines)?;
            }
            let form = fill(&mut fields, TicketForm::from(&current.ticket));
            let detail = shop.update_ticket(id, &form)?;
            log::info!("Updated ticket {}", detail.ticket.code);
            print_ticket(&detail);
        }
        TicketAction::Delete { id } => {
            shop.delete::<Ticket>(id)?;
            log::info!("Deleted ticket {} and its lines", id_label(id));
        }
        TicketAction::NextCode => {
            log::info!("{}", shop.next_ticket_code()?);
        }
    }
    Ok(())
}
