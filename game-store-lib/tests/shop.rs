use game_store_core::*;
use game_store_lib::settings::{ShopSettings, TicketSettings};
use game_store_lib::*;

fn shop() -> Shop {
    Shop::new(Store::open_memory().unwrap())
}

fn ana_form() -> DeveloperForm {
    DeveloperForm {
        name: "Ana".into(),
        email: "ana@x.com".into(),
        experience: "5".into(),
        kind: "Indie".into(),
    }
}

fn game_form(title: &str, price: &str) -> GameForm {
    GameForm {
        title: title.into(),
        genre: "RPG".into(),
        price: price.into(),
        platform: "PC".into(),
        release_date: "2020-05-01".into(),
    }
}

fn eva_form() -> CustomerForm {
    CustomerForm {
        name: "Eva".into(),
        surname: "Ruiz".into(),
        national_id: "12345678Z".into(),
        address: "Calle Mayor 1".into(),
        email: "eva@x.com".into(),
        phone: "600000000".into(),
    }
}

fn ticket_form(customer_id: Id) -> TicketForm {
    TicketForm {
        payment: "Cash".into(),
        date: "2024-01-05".into(),
        customer_id: Some(customer_id),
    }
}

#[test]
fn developer_game_delete_scenario() {
    let mut shop = shop();
    let ana = shop.create_developer(&ana_form()).unwrap();
    assert_eq!(ana.id, 1);

    shop.add_to_roster(ana.id).unwrap();
    let foo = shop.create_game(&game_form("Foo", "19.99")).unwrap();
    assert_eq!(foo.id, 1);
    assert_eq!(foo.developer_ids, vec![ana.id]);
    assert!(shop.roster().is_empty());

    let err = shop.delete::<Developer>(ana.id).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(
        err.user_message(),
        "Cannot delete this developer because it is linked to another table. \
         Remove that link before deleting the developer."
    );
    assert_eq!(shop.developers().unwrap().len(), 1);
    assert_eq!(shop.counts().unwrap().developer_links, 1);

    shop.edit_game(foo.id).unwrap();
    assert_eq!(shop.roster().ids(), vec![ana.id]);
    shop.remove_from_roster(0).unwrap();
    shop.update_game(foo.id, &game_form("Foo", "19.99")).unwrap();

    shop.delete::<Developer>(ana.id).unwrap();
    assert!(shop.developers().unwrap().is_empty());
}

#[test]
fn update_game_without_loading_keeps_links() {
    let mut shop = shop();
    let ana = shop.create_developer(&ana_form()).unwrap();
    shop.add_to_roster(ana.id).unwrap();
    let foo = shop.create_game(&game_form("Foo", "19.99")).unwrap();

    let updated = shop.update_game(foo.id, &game_form("Foo II", "24.99")).unwrap();
    assert_eq!(updated.developer_ids, vec![ana.id]);
    assert_eq!(shop.counts().unwrap().developer_links, 1);
    assert_eq!(shop.find::<Game>(foo.id).unwrap().game.title, "Foo II");
}

#[test]
fn update_game_with_emptied_roster_drops_links() {
    let mut shop = shop();
    let ana = shop.create_developer(&ana_form()).unwrap();
    shop.add_to_roster(ana.id).unwrap();
    let foo = shop.create_game(&game_form("Foo", "19.99")).unwrap();

    shop.edit_game(foo.id).unwrap();
    shop.clear_roster();
    let updated = shop.update_game(foo.id, &game_form("Foo", "19.99")).unwrap();
    assert!(updated.developer_ids.is_empty());
    assert_eq!(shop.counts().unwrap().developer_links, 0);
}

#[test]
fn roster_rejects_duplicates() {
    let mut shop = shop();
    let ana = shop.create_developer(&ana_form()).unwrap();
    shop.add_to_roster(ana.id).unwrap();

    let err = shop.add_to_roster(ana.id).unwrap_err();
    assert!(matches!(err, ShopError::Roster(RosterError::Duplicate { .. })));
    assert_eq!(shop.roster().len(), 1);
}

#[test]
fn roster_rejects_unknown_developer() {
    let mut shop = shop();
    let err = shop.add_to_roster(12).unwrap_err();
    assert!(matches!(
        err,
        ShopError::NotFound {
            kind: EntityKind::Developer,
            id: 12
        }
    ));
}

#[test]
fn first_ticket_is_a001_and_codes_advance() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "19.99")).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();

    assert_eq!(shop.next_ticket_code().unwrap().to_string(), "A001");

    shop.add_to_cart(foo.id, 2).unwrap();
    shop.add_to_cart(foo.id, 3).unwrap();
    let first = shop.create_ticket(&ticket_form(eva.id)).unwrap();
    assert_eq!(first.ticket.code.to_string(), "A001");
    assert_eq!(first.lines.len(), 1);
    assert_eq!(first.lines[0].line.quantity, 5);
    assert_eq!(first.ticket.total, Decimal::new(9995, 2));
    assert_eq!(shop.cart().state(), CartState::Committed);

    shop.reset_cart();
    shop.add_to_cart(foo.id, 1).unwrap();
    let second = shop.create_ticket(&ticket_form(eva.id)).unwrap();
    assert_eq!(second.ticket.code.to_string(), "A002");
}

#[test]
fn committed_cart_must_be_reset() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "5")).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();
    shop.add_to_cart(foo.id, 1).unwrap();
    shop.create_ticket(&ticket_form(eva.id)).unwrap();

    let err = shop.add_to_cart(foo.id, 1).unwrap_err();
    assert!(matches!(
        err,
        ShopError::Cart(CartError::Closed(CartState::Committed))
    ));
    assert!(shop.create_ticket(&ticket_form(eva.id)).is_err());
    assert_eq!(shop.counts().unwrap().tickets, 1);
}

#[test]
fn configured_seed_sets_first_code() {
    let settings = ShopSettings {
        tickets: TicketSettings {
            initial_code: "B999".to_string(),
        },
        ..Default::default()
    };
    let shop = Shop::with_settings(Store::open_memory().unwrap(), &settings);
    assert_eq!(shop.next_ticket_code().unwrap().to_string(), "C001");
}

#[test]
fn exhausted_seed_blocks_ticket_creation() {
    let settings = ShopSettings {
        tickets: TicketSettings {
            initial_code: "Z999".to_string(),
        },
        ..Default::default()
    };
    let mut shop = Shop::with_settings(Store::open_memory().unwrap(), &settings);
    let foo = shop.create_game(&game_form("Foo", "5")).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();
    shop.add_to_cart(foo.id, 1).unwrap();

    let err = shop.create_ticket(&ticket_form(eva.id)).unwrap_err();
    assert!(matches!(err, ShopError::ExhaustedSequence));
    assert!(!err.is_recoverable());
    assert_eq!(shop.counts().unwrap().tickets, 0);
    assert_eq!(shop.cart().state(), CartState::Accumulating);
}

#[test]
fn empty_cart_cannot_become_a_ticket() {
    let mut shop = shop();
    let eva = shop.create_customer(&eva_form()).unwrap();
    let err = shop.create_ticket(&ticket_form(eva.id)).unwrap_err();
    assert!(matches!(err, ShopError::Cart(CartError::NoLines)));
}

#[test]
fn ticket_for_unknown_customer_is_not_found() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "5")).unwrap();
    shop.add_to_cart(foo.id, 1).unwrap();

    let err = shop.create_ticket(&ticket_form(99)).unwrap_err();
    assert!(matches!(
        err,
        ShopError::NotFound {
            kind: EntityKind::Customer,
            id: 99
        }
    ));
    assert_eq!(shop.counts().unwrap().tickets, 0);
}

#[test]
fn editing_a_ticket_replaces_its_lines() {
    let mut shop = shop();
    let a = shop.create_game(&game_form("Alpha", "10.00")).unwrap();
    let b = shop.create_game(&game_form("Beta", "25.50")).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();

    shop.add_to_cart(a.id, 2).unwrap();
    let created = shop.create_ticket(&ticket_form(eva.id)).unwrap();
    assert_eq!(created.ticket.total, Decimal::new(2000, 2));

    let loaded = shop.edit_ticket(created.ticket.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(shop.cart().lines()[0].quantity, 2);

    shop.remove_from_cart(0).unwrap();
    assert_eq!(shop.cart().state(), CartState::Empty);
    shop.add_to_cart(b.id, 1).unwrap();

    let form = TicketForm {
        payment: "Card".into(),
        ..ticket_form(eva.id)
    };
    let edited = shop.update_ticket(created.ticket.id, &form).unwrap();

    assert_eq!(edited.ticket.id, created.ticket.id);
    assert_eq!(edited.ticket.code, created.ticket.code);
    assert_eq!(edited.ticket.payment, PaymentMethod::Card);
    assert_eq!(edited.lines.len(), 1);
    assert_eq!(edited.lines[0].game.id, b.id);
    assert_eq!(edited.lines[0].line.quantity, 1);
    assert_eq!(edited.ticket.total, Ticket::total_of(edited.lines()).unwrap());
    assert_eq!(edited.ticket.total, Decimal::new(2550, 2));
    assert_eq!(shop.counts().unwrap().ticket_lines, 1);
}

#[test]
fn oversized_quantity_is_rejected_by_the_cart() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "1")).unwrap();
    let quantity = parse_quantity("4294967295").unwrap();
    shop.add_to_cart(foo.id, quantity).unwrap();

    let err = shop.add_to_cart(foo.id, 1).unwrap_err();
    assert!(matches!(err, ShopError::Cart(CartError::QuantityTooLarge)));
    assert!(err.is_recoverable());
    assert_eq!(shop.cart().lines()[0].quantity, u32::MAX);
}

#[test]
fn ticket_total_past_decimal_max_stores_nothing() {
    let mut shop = shop();
    let max = "79228162514264337593543950335";
    let a = shop.create_game(&game_form("Alpha", max)).unwrap();
    let b = shop.create_game(&game_form("Beta", max)).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();

    assert!(matches!(
        shop.add_to_cart(a.id, 2).unwrap_err(),
        ShopError::Cart(CartError::TotalTooLarge)
    ));
    shop.add_to_cart(a.id, 1).unwrap();
    shop.add_to_cart(b.id, 1).unwrap();
    assert!(shop.cart().total().is_err());

    let err = shop.create_ticket(&ticket_form(eva.id)).unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));
    assert!(err.is_recoverable());
    assert_eq!(shop.counts().unwrap().tickets, 0);
    assert_eq!(shop.cart().state(), CartState::Accumulating);
}

#[test]
fn cancelled_cart_stores_nothing() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "5")).unwrap();
    shop.add_to_cart(foo.id, 4).unwrap();
    shop.cancel_cart().unwrap();

    assert_eq!(shop.cart().state(), CartState::Abandoned);
    assert!(shop.cart().is_empty());
    assert_eq!(shop.counts().unwrap().ticket_lines, 0);
}

#[test]
fn rating_requires_existing_game() {
    let shop = shop();
    let form = RatingForm {
        source: "IGN".into(),
        score: "8.5".into(),
        date: "2023-03-04".into(),
        game_id: Some(3),
    };
    let err = shop.create_rating(&form).unwrap_err();
    assert!(matches!(
        err,
        ShopError::NotFound {
            kind: EntityKind::Game,
            ..
        }
    ));
}

#[test]
fn rating_crud_through_the_facade() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "19.99")).unwrap();
    let mut form = RatingForm {
        source: "IGN".into(),
        score: "8.5".into(),
        date: "2023-03-04".into(),
        game_id: Some(foo.id),
    };
    let rating = shop.create_rating(&form).unwrap();

    form.score = "9".into();
    let updated = shop.update_rating(rating.id, &form).unwrap();
    assert_eq!(updated.id, rating.id);

    let list = shop.ratings().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].rating.score, Decimal::new(9, 0));
    assert_eq!(list[0].game, foo);

    // A rated game cannot go
    assert!(matches!(
        shop.delete::<Game>(foo.id).unwrap_err(),
        ShopError::ReferentialIntegrity {
            kind: EntityKind::Game
        }
    ));
    shop.delete::<Rating>(rating.id).unwrap();
    shop.delete::<Game>(foo.id).unwrap();
}

#[test]
fn customer_with_tickets_cannot_be_deleted() {
    let mut shop = shop();
    let foo = shop.create_game(&game_form("Foo", "5")).unwrap();
    let eva = shop.create_customer(&eva_form()).unwrap();
    shop.add_to_cart(foo.id, 1).unwrap();
    let ticket = shop.create_ticket(&ticket_form(eva.id)).unwrap();

    assert_eq!(shop.tickets_of_customer(eva.id).unwrap(), vec![ticket.ticket.clone()]);
    let err = shop.delete::<Customer>(eva.id).unwrap_err();
    assert!(err.user_message().contains("customer"));

    shop.delete::<Ticket>(ticket.ticket.id).unwrap();
    shop.delete::<Customer>(eva.id).unwrap();
}

#[test]
fn update_of_missing_developer_is_not_found() {
    let shop = shop();
    let err = shop.update_developer(8, &ana_form()).unwrap_err();
    assert!(matches!(err, ShopError::NotFound { id: 8, .. }));
}

#[test]
fn invalid_form_leaves_store_untouched() {
    let shop = shop();
    let form = DeveloperForm {
        experience: "lots".into(),
        ..ana_form()
    };
    assert!(matches!(
        shop.create_developer(&form).unwrap_err(),
        ShopError::Validation(_)
    ));
    assert_eq!(shop.counts().unwrap().developers, 0);
}
