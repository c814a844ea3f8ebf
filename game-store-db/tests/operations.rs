use game_store_core::*;
use game_store_db::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ana() -> Developer {
    Developer::new("Ana", "ana@x.com", 5, DeveloperType::Indie)
}

fn foo(developer_ids: &[Id]) -> Game {
    Game::new(
        "Foo",
        Genre::Rpg,
        Decimal::new(1999, 2),
        Platform::Pc,
        date(2020, 5, 1),
    )
    .with_developers(developer_ids.iter().copied())
}

fn bar() -> Game {
    Game::new(
        "Bar",
        Genre::Racing,
        Decimal::new(4950, 2),
        Platform::Xbox,
        date(2022, 11, 3),
    )
}

fn eva() -> Customer {
    Customer::new("Eva", "Ruiz", "12345678Z", "Calle Mayor 1", "eva@x.com", "600000000")
}

fn ticket(code: &str, customer_id: Id, lines: &[TicketLine]) -> Ticket {
    Ticket {
        id: UNSAVED_ID,
        code: code.parse().unwrap(),
        payment: PaymentMethod::Card,
        date: date(2024, 1, 5),
        total: Ticket::total_of(lines).unwrap(),
        customer_id,
    }
}

fn link_count(store: &Store) -> i64 {
    store.counts().unwrap().developer_links
}

#[test]
fn save_assigns_ids_in_order() {
    let store = Store::open_memory().unwrap();
    let first = store.save(ana()).unwrap();
    let second = store
        .save(Developer::new("Luis", "luis@x.com", 12, DeveloperType::Studio))
        .unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first, Developer { id: 1, ..ana() });
}

#[test]
fn save_game_writes_developer_links() {
    let store = Store::open_memory().unwrap();
    let dev = store.save(ana()).unwrap();
    let game = store.save(foo(&[dev.id])).unwrap();

    assert_eq!(game.id, 1);
    assert_eq!(link_count(&store), 1);
    let detail = store.find::<Game>(game.id).unwrap();
    assert_eq!(detail.developers, vec![dev]);
    assert_eq!(detail.game, game);
}

#[test]
fn developer_lifecycle_scenario() {
    let store = Store::open_memory().unwrap();
    let dev = store.save(ana()).unwrap();
    let mut game = store.save(foo(&[dev.id])).unwrap();

    let err = store.delete::<Developer>(dev.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ReferentialIntegrity {
            kind: EntityKind::Developer
        }
    ));

    game.developer_ids.clear();
    store.update(&game).unwrap();
    assert_eq!(link_count(&store), 0);

    store.delete::<Developer>(dev.id).unwrap();
    assert!(store.list_all::<Developer>().unwrap().is_empty());
}

#[test]
fn blocked_delete_changes_nothing() {
    let store = Store::open_memory().unwrap();
    let dev = store.save(ana()).unwrap();
    let game = store.save(foo(&[dev.id])).unwrap();
    let before = store.counts().unwrap();

    assert!(store.delete::<Developer>(dev.id).is_err());

    assert_eq!(store.counts().unwrap(), before);
    assert_eq!(store.find::<Developer>(dev.id).unwrap().developer, dev);
    assert_eq!(store.find::<Game>(game.id).unwrap().game, game);
}

#[test]
fn delete_game_with_rating_is_blocked() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    store
        .save(Rating::new(game.id, "Metacritic", Decimal::new(87, 0), date(2023, 1, 2)))
        .unwrap();

    let err = store.delete::<Game>(game.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ReferentialIntegrity {
            kind: EntityKind::Game
        }
    ));
}

#[test]
fn delete_game_with_developer_link_is_blocked() {
    let store = Store::open_memory().unwrap();
    let dev = store.save(ana()).unwrap();
    let game = store.save(foo(&[dev.id])).unwrap();

    let err = store.delete::<Game>(game.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ReferentialIntegrity {
            kind: EntityKind::Game
        }
    ));
    assert_eq!(link_count(&store), 1);
    assert_eq!(store.find::<Game>(game.id).unwrap().game, game);
}

#[test]
fn delete_game_on_a_ticket_is_blocked() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 2).unwrap()];
    store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();
    let before = store.counts().unwrap();

    let err = store.delete::<Game>(game.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ReferentialIntegrity {
            kind: EntityKind::Game
        }
    ));
    assert_eq!(store.counts().unwrap(), before);
}

#[test]
fn delete_customer_with_ticket_is_blocked() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 1).unwrap()];
    store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();

    let err = store.delete::<Customer>(customer.id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::ReferentialIntegrity {
            kind: EntityKind::Customer
        }
    ));
}

#[test]
fn delete_missing_is_not_found() {
    let store = Store::open_memory().unwrap();
    let err = store.delete::<Rating>(42).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            kind: EntityKind::Rating,
            id: 42
        }
    ));
}

#[test]
fn update_missing_is_not_found() {
    let store = Store::open_memory().unwrap();
    let err = store.update(&Developer { id: 9, ..ana() }).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn update_game_replaces_links() {
    let store = Store::open_memory().unwrap();
    let ana = store.save(ana()).unwrap();
    let luis = store
        .save(Developer::new("Luis", "luis@x.com", 12, DeveloperType::Studio))
        .unwrap();
    let mut game = store.save(foo(&[ana.id])).unwrap();

    game.developer_ids = vec![luis.id];
    game.price = Decimal::new(999, 2);
    store.update(&game).unwrap();

    let detail = store.find::<Game>(game.id).unwrap();
    assert_eq!(detail.game.price, Decimal::new(999, 2));
    assert_eq!(detail.developers, vec![luis]);
    assert_eq!(link_count(&store), 1);
}

#[test]
fn save_ticket_with_lines_back_links_every_line() {
    let store = Store::open_memory().unwrap();
    let foo = store.save(foo(&[])).unwrap();
    let bar = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();

    let lines = vec![
        TicketLine::priced(&foo, 2).unwrap(),
        TicketLine::priced(&bar, 1).unwrap(),
    ];
    let (saved, lines) = store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();

    assert_eq!(saved.id, 1);
    assert!(lines.iter().all(|l| l.ticket_id == saved.id));
    assert_eq!(lines.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(saved.total, Decimal::new(8948, 2));

    let detail = store.find::<Ticket>(saved.id).unwrap();
    assert_eq!(detail.customer, customer);
    assert_eq!(detail.lines().cloned().collect::<Vec<_>>(), lines);
}

#[test]
fn failed_ticket_save_leaves_nothing_behind() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();

    let mut dangling = TicketLine::priced(&game, 1).unwrap();
    dangling.game_id = 99;
    let lines = vec![TicketLine::priced(&game, 1).unwrap(), dangling];
    let result = store.save_ticket_with_lines(ticket("A001", customer.id, &lines), lines);

    assert!(result.is_err());
    let counts = store.counts().unwrap();
    assert_eq!(counts.tickets, 0);
    assert_eq!(counts.ticket_lines, 0);
}

#[test]
fn duplicate_ticket_code_is_rejected() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 1).unwrap()];
    store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines.clone())
        .unwrap();

    let result = store.save_ticket_with_lines(ticket("A001", customer.id, &lines), lines);
    assert!(matches!(result, Err(StoreError::Sqlite(_))));
    assert_eq!(store.counts().unwrap().tickets, 1);
    assert_eq!(store.counts().unwrap().ticket_lines, 1);
}

#[test]
fn replace_ticket_lines_swaps_the_whole_set() {
    let store = Store::open_memory().unwrap();
    let a = store.save(foo(&[])).unwrap();
    let b = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();

    let lines = vec![TicketLine::priced(&a, 2).unwrap()];
    let (mut saved, _) = store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();

    let new_lines = vec![TicketLine::priced(&b, 1).unwrap()];
    saved.total = Ticket::total_of(&new_lines).unwrap();
    let stored = store.replace_ticket_lines(&saved, new_lines).unwrap();

    let detail = store.find::<Ticket>(saved.id).unwrap();
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].line, stored[0]);
    assert_eq!(detail.lines[0].game, b);
    assert_eq!(detail.lines[0].line.quantity, 1);
    assert_eq!(detail.ticket.total, Decimal::new(4950, 2));
    assert_eq!(detail.ticket.code.to_string(), "A001");
}

#[test]
fn replace_lines_of_missing_ticket_rolls_back() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 1).unwrap()];
    let mut missing = ticket("A001", customer.id, &lines);
    missing.id = 5;

    let err = store.replace_ticket_lines(&missing, lines).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.counts().unwrap().ticket_lines, 0);
}

#[test]
fn delete_ticket_removes_its_lines() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 3).unwrap()];
    let (saved, _) = store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();

    store.delete::<Ticket>(saved.id).unwrap();

    let counts = store.counts().unwrap();
    assert_eq!(counts.tickets, 0);
    assert_eq!(counts.ticket_lines, 0);
    // The customer is free to go now
    store.delete::<Customer>(customer.id).unwrap();
}

#[test]
fn delete_missing_ticket_keeps_other_lines() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let customer = store.save(eva()).unwrap();
    let lines = vec![TicketLine::priced(&game, 1).unwrap()];
    store
        .save_ticket_with_lines(ticket("A001", customer.id, &lines), lines)
        .unwrap();

    assert!(store.delete::<Ticket>(77).unwrap_err().is_not_found());
    assert_eq!(store.counts().unwrap().ticket_lines, 1);
}

#[test]
fn rating_update_round_trips() {
    let store = Store::open_memory().unwrap();
    let game = store.save(bar()).unwrap();
    let mut rating = store
        .save(Rating::new(game.id, "IGN", Decimal::new(75, 1), date(2023, 3, 4)))
        .unwrap();

    rating.score = Decimal::new(80, 1);
    rating.source = "Edge".to_string();
    store.update(&rating).unwrap();

    let detail = store.find::<Rating>(rating.id).unwrap();
    assert_eq!(detail.rating, rating);
    assert_eq!(detail.game, game);
}
