use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn foo() -> Game {
    Game {
        id: 1,
        ..Game::new(
            "Foo",
            Genre::Rpg,
            Decimal::new(1999, 2),
            Platform::Pc,
            date(2020, 5, 1),
        )
    }
}

#[test]
fn game_renders_title_and_platform() {
    assert_eq!(foo().to_string(), "Foo (PC)");
}

#[test]
fn ticket_renders_code_payment_date_total() {
    let ticket = Ticket {
        id: 3,
        code: "A007".parse().unwrap(),
        payment: PaymentMethod::Card,
        date: date(2024, 1, 5),
        total: Decimal::new(5997, 2),
        customer_id: 1,
    };
    assert_eq!(ticket.to_string(), "A007: Card, 2024-01-05, 59.97");
}

#[test]
fn priced_line_multiplies_unit_price() {
    let line = TicketLine::priced(&foo(), 5).unwrap();
    assert_eq!(line.game_id, 1);
    assert_eq!(line.quantity, 5);
    assert_eq!(line.total, Decimal::new(9995, 2));
    assert_eq!(line.id, UNSAVED_ID);
}

#[test]
fn ticket_total_sums_lines() {
    let lines = [
        TicketLine::priced(&foo(), 2).unwrap(),
        TicketLine::priced(&foo(), 1).unwrap(),
    ];
    assert_eq!(Ticket::total_of(&lines), Ok(Decimal::new(5997, 2)));
    assert_eq!(Ticket::total_of(&Vec::<TicketLine>::new()), Ok(Decimal::ZERO));
}

#[test]
fn priced_line_past_decimal_max_fails() {
    let mut game = foo();
    game.price = Decimal::MAX;
    assert_eq!(
        TicketLine::priced(&game, 2).unwrap_err(),
        CoreError::AmountOverflow
    );
    assert_eq!(line_total(Decimal::MAX, 1), Ok(Decimal::MAX));
}

#[test]
fn ticket_total_past_decimal_max_fails() {
    let mut game = foo();
    game.price = Decimal::MAX;
    let line = TicketLine::priced(&game, 1).unwrap();
    let lines = [line.clone(), line];
    assert_eq!(Ticket::total_of(&lines), Err(CoreError::AmountOverflow));
}

#[test]
fn equality_includes_id() {
    let a = Developer::new("Ana", "ana@x.com", 5, DeveloperType::Indie);
    let mut b = a.clone();
    assert_eq!(a, b);
    b.id = 7;
    assert_ne!(a, b);
}

#[test]
fn equality_covers_every_field() {
    let a = foo();
    let mut b = foo();
    b.price = Decimal::new(2999, 2);
    assert_ne!(a, b);

    let c = foo().with_developers([1, 2]);
    assert_ne!(a, c);
}

#[test]
fn line_detail_display() {
    let detail = LineDetail {
        line: TicketLine::priced(&foo(), 2).unwrap(),
        game: foo(),
    };
    assert_eq!(detail.to_string(), "Foo (PC): quantity=2, total=39.98");
}
