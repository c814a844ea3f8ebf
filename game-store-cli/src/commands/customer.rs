use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_store_core::{Customer, CustomerDetail};
use game_store_lib::{CustomerForm, Shop};

use super::{heading, id_label, set_field};
use crate::cli_types::{CustomerAction, CustomerArgs};
use crate::CliError;

fn fill(args: CustomerArgs, mut form: CustomerForm) -> CustomerForm {
    set_field(&mut form.name, args.name);
    set_field(&mut form.surname, args.surname);
    set_field(&mut form.national_id, args.national_id);
    set_field(&mut form.address, args.address);
    set_field(&mut form.email, args.email);
    set_field(&mut form.phone, args.phone);
    form
}

fn print_customer(detail: &CustomerDetail) {
    let c = &detail.customer;
    log::info!(
        "  {} {} ({}) {}, {}, {}",
        id_label(c.id),
        c.to_string().if_supports_color(Stdout, |t| t.bold()),
        c.national_id,
        c.email,
        c.phone,
        c.address,
    );
    if !detail.tickets.is_empty() {
        let codes: Vec<String> = detail.tickets.iter().map(|t| t.code.to_string()).collect();
        log::info!("        Tickets: {}", codes.join(", "));
    }
}

pub(crate) fn run(shop: &Shop, action: CustomerAction) -> Result<(), CliError> {
    match action {
        CustomerAction::List => {
            let customers = shop.customers()?;
            heading("Customers", customers.len());
            customers.iter().for_each(print_customer);
        }
        CustomerAction::Add(args) => {
            let customer = shop.create_customer(&fill(args, CustomerForm::default()))?;
            log::info!("Added customer {} {}", id_label(customer.id), customer);
        }
        CustomerAction::Update { id, fields } => {
            let current = shop.find::<Customer>(id)?.customer;
            let customer = shop.update_customer(id, &fill(fields, CustomerForm::from(&current)))?;
            log::info!("Updated customer {} {}", id_label(customer.id), customer);
        }
        CustomerAction::Delete { id } => {
            shop.delete::<Customer>(id)?;
            log::info!("Deleted customer {}", id_label(id));
        }
        CustomerAction::Tickets { id } => {
            let customer = shop.find::<Customer>(id)?.customer;
            let tickets = shop.tickets_of_customer(id)?;
            heading(&format!("Tickets of {customer}"), tickets.len());
            for ticket in &tickets {
                log::info!("  {} {}", id_label(ticket.id), ticket);
            }
        }
    }
    Ok(())
}
