//! Read queries for the store database.
//!
//! Every `list_*` function resolves eagerly the relations its detail type
//! carries, so callers never need a second round trip outside the unit of
//! work that produced the list.

use std::collections::HashMap;
use std::str::FromStr;

use game_store_core::*;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;

const DEVELOPER_COLUMNS: &str = "d.id, d.nombre, d.email, d.experiencia, d.tipo";
const GAME_COLUMNS: &str =
    "v.id, v.titulo, v.genero, v.precio, v.plataforma, v.fecha_lanzamiento";
const RATING_COLUMNS: &str = "p.id, p.id_videojuego, p.fuente, p.nota_videojuego, p.fecha_nota";
const CUSTOMER_COLUMNS: &str =
    "u.id, u.nombre, u.apellidos, u.dni, u.direccion, u.email, u.telefono";
const TICKET_COLUMNS: &str =
    "t.id, t.codigo_ticket, t.forma_pago, t.fecha_ticket, t.total, t.id_usuario";
const LINE_COLUMNS: &str = "l.id, l.id_ticket, l.id_videojuego, l.cantidad, l.total";

// ── Row Mapping ─────────────────────────────────────────────────────────────

/// Read a text column and parse it with `FromStr`.
fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_developer(row: &Row) -> rusqlite::Result<Developer> {
    Ok(Developer {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        experience: row.get(3)?,
        kind: parse_column(row, 4)?,
    })
}

/// Map a game row. `developer_ids` is left empty; see [`attach_developer_ids`].
fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: parse_column(row, 2)?,
        price: parse_column(row, 3)?,
        platform: parse_column(row, 4)?,
        release_date: row.get(5)?,
        developer_ids: Vec::new(),
    })
}

fn row_to_rating(row: &Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        game_id: row.get(1)?,
        source: row.get(2)?,
        score: parse_column(row, 3)?,
        date: row.get(4)?,
    })
}

fn row_to_customer(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        surname: row.get(2)?,
        national_id: row.get(3)?,
        address: row.get(4)?,
        email: row.get(5)?,
        phone: row.get(6)?,
    })
}

fn row_to_ticket(row: &Row) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        code: parse_column(row, 1)?,
        payment: parse_column(row, 2)?,
        date: row.get(3)?,
        total: parse_column(row, 4)?,
        customer_id: row.get(5)?,
    })
}

fn row_to_line(row: &Row) -> rusqlite::Result<TicketLine> {
    Ok(TicketLine {
        id: row.get(0)?,
        ticket_id: row.get(1)?,
        game_id: row.get(2)?,
        quantity: row.get(3)?,
        total: parse_column(row, 4)?,
    })
}

/// Run a query that takes one id parameter and collect every mapped row.
fn query_by_id<T>(
    conn: &Connection,
    sql: &str,
    id: Id,
    map: fn(&Row) -> rusqlite::Result<T>,
) -> Result<Vec<T>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![id], map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Run a parameterless query and collect every mapped row.
fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: fn(&Row) -> rusqlite::Result<T>,
) -> Result<Vec<T>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch exactly one row by id, or `NotFound`.
fn fetch_one<T>(
    conn: &Connection,
    sql: &str,
    kind: EntityKind,
    id: Id,
    map: fn(&Row) -> rusqlite::Result<T>,
) -> Result<T, StoreError> {
    conn.query_row(sql, params![id], map)
        .optional()?
        .ok_or(StoreError::not_found(kind, id))
}

// ── Developer Links ─────────────────────────────────────────────────────────

/// All developer/game link pairs as `(developer_id, game_id)`, in link order.
fn developer_links(conn: &Connection) -> Result<Vec<(Id, Id)>, StoreError> {
    query_all(
        conn,
        "SELECT id_desarrollador, id_videojuego FROM desarrollador_videojuego ORDER BY id",
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
}

/// Fill in `developer_ids` for each game from the join table.
fn attach_developer_ids(conn: &Connection, games: &mut [Game]) -> Result<(), StoreError> {
    let mut by_game: HashMap<Id, Vec<Id>> = HashMap::new();
    for (dev_id, game_id) in developer_links(conn)? {
        by_game.entry(game_id).or_default().push(dev_id);
    }
    for game in games {
        game.developer_ids = by_game.remove(&game.id).unwrap_or_default();
    }
    Ok(())
}

// ── Single Lookups ──────────────────────────────────────────────────────────

pub fn developer_by_id(conn: &Connection, id: Id) -> Result<Developer, StoreError> {
    fetch_one(
        conn,
        &format!("SELECT {DEVELOPER_COLUMNS} FROM developer d WHERE d.id = ?1"),
        EntityKind::Developer,
        id,
        row_to_developer,
    )
}

/// Fetch a game with its developer ids.
pub fn game_by_id(conn: &Connection, id: Id) -> Result<Game, StoreError> {
    let mut game = fetch_one(
        conn,
        &format!("SELECT {GAME_COLUMNS} FROM videojuego v WHERE v.id = ?1"),
        EntityKind::Game,
        id,
        row_to_game,
    )?;
    game.developer_ids = query_by_id(
        conn,
        "SELECT id_desarrollador FROM desarrollador_videojuego WHERE id_videojuego = ?1 ORDER BY id",
        id,
        |row| row.get(0),
    )?;
    Ok(game)
}

pub fn rating_by_id(conn: &Connection, id: Id) -> Result<Rating, StoreError> {
    fetch_one(
        conn,
        &format!("SELECT {RATING_COLUMNS} FROM puntuacion p WHERE p.id = ?1"),
        EntityKind::Rating,
        id,
        row_to_rating,
    )
}

pub fn customer_by_id(conn: &Connection, id: Id) -> Result<Customer, StoreError> {
    fetch_one(
        conn,
        &format!("SELECT {CUSTOMER_COLUMNS} FROM usuario u WHERE u.id = ?1"),
        EntityKind::Customer,
        id,
        row_to_customer,
    )
}

pub fn ticket_by_id(conn: &Connection, id: Id) -> Result<Ticket, StoreError> {
    fetch_one(
        conn,
        &format!("SELECT {TICKET_COLUMNS} FROM ticket t WHERE t.id = ?1"),
        EntityKind::Ticket,
        id,
        row_to_ticket,
    )
}

/// The ticket with the greatest code.
///
/// Codes sort lexicographically in issue order, so this is the most recently
/// issued ticket. Fails with [`StoreError::Empty`] when no ticket exists.
pub fn latest_ticket(conn: &Connection) -> Result<Ticket, StoreError> {
    conn.query_row(
        &format!("SELECT {TICKET_COLUMNS} FROM ticket t ORDER BY t.codigo_ticket DESC LIMIT 1"),
        [],
        row_to_ticket,
    )
    .optional()?
    .ok_or(StoreError::Empty(EntityKind::Ticket))
}

// ── Relation Lookups ────────────────────────────────────────────────────────

/// Games a developer is linked to, ordered by game id.
pub fn games_of_developer(conn: &Connection, developer_id: Id) -> Result<Vec<Game>, StoreError> {
    let mut games = query_by_id(
        conn,
        &format!(
            "SELECT {GAME_COLUMNS} FROM videojuego v
             JOIN desarrollador_videojuego dv ON dv.id_videojuego = v.id
             WHERE dv.id_desarrollador = ?1 ORDER BY v.id"
        ),
        developer_id,
        row_to_game,
    )?;
    attach_developer_ids(conn, &mut games)?;
    Ok(games)
}

/// Developers linked to a game, in the order they were added.
pub fn developers_of_game(conn: &Connection, game_id: Id) -> Result<Vec<Developer>, StoreError> {
    query_by_id(
        conn,
        &format!(
            "SELECT {DEVELOPER_COLUMNS} FROM developer d
             JOIN desarrollador_videojuego dv ON dv.id_desarrollador = d.id
             WHERE dv.id_videojuego = ?1 ORDER BY dv.id"
        ),
        game_id,
        row_to_developer,
    )
}

pub fn tickets_of_customer(conn: &Connection, customer_id: Id) -> Result<Vec<Ticket>, StoreError> {
    query_by_id(
        conn,
        &format!("SELECT {TICKET_COLUMNS} FROM ticket t WHERE t.id_usuario = ?1 ORDER BY t.id"),
        customer_id,
        row_to_ticket,
    )
}

/// Lines of a ticket, each with its game resolved.
pub fn lines_of_ticket(conn: &Connection, ticket_id: Id) -> Result<Vec<LineDetail>, StoreError> {
    let lines = query_by_id(
        conn,
        &format!("SELECT {LINE_COLUMNS} FROM ticket_videojuego l WHERE l.id_ticket = ?1 ORDER BY l.id"),
        ticket_id,
        row_to_line,
    )?;
    lines
        .into_iter()
        .map(|line| {
            let game = game_by_id(conn, line.game_id)?;
            Ok(LineDetail { line, game })
        })
        .collect()
}

pub fn line_detail(conn: &Connection, id: Id) -> Result<LineDetail, StoreError> {
    let line = fetch_one(
        conn,
        &format!("SELECT {LINE_COLUMNS} FROM ticket_videojuego l WHERE l.id = ?1"),
        EntityKind::TicketLine,
        id,
        row_to_line,
    )?;
    let game = game_by_id(conn, line.game_id)?;
    Ok(LineDetail { line, game })
}

// ── Detail Lookups ──────────────────────────────────────────────────────────

pub fn developer_detail(conn: &Connection, id: Id) -> Result<DeveloperDetail, StoreError> {
    Ok(DeveloperDetail {
        developer: developer_by_id(conn, id)?,
        games: games_of_developer(conn, id)?,
    })
}

pub fn game_detail(conn: &Connection, id: Id) -> Result<GameDetail, StoreError> {
    Ok(GameDetail {
        game: game_by_id(conn, id)?,
        developers: developers_of_game(conn, id)?,
    })
}

pub fn rating_detail(conn: &Connection, id: Id) -> Result<RatingDetail, StoreError> {
    let rating = rating_by_id(conn, id)?;
    let game = game_by_id(conn, rating.game_id)?;
    Ok(RatingDetail { rating, game })
}

pub fn customer_detail(conn: &Connection, id: Id) -> Result<CustomerDetail, StoreError> {
    Ok(CustomerDetail {
        customer: customer_by_id(conn, id)?,
        tickets: tickets_of_customer(conn, id)?,
    })
}

pub fn ticket_detail(conn: &Connection, id: Id) -> Result<TicketDetail, StoreError> {
    let ticket = ticket_by_id(conn, id)?;
    let customer = customer_by_id(conn, ticket.customer_id)?;
    let lines = lines_of_ticket(conn, id)?;
    Ok(TicketDetail {
        ticket,
        customer,
        lines,
    })
}

// ── Listings ────────────────────────────────────────────────────────────────

fn all_developers(conn: &Connection) -> Result<Vec<Developer>, StoreError> {
    query_all(
        conn,
        &format!("SELECT {DEVELOPER_COLUMNS} FROM developer d ORDER BY d.id"),
        row_to_developer,
    )
}

fn all_games(conn: &Connection) -> Result<Vec<Game>, StoreError> {
    let mut games = query_all(
        conn,
        &format!("SELECT {GAME_COLUMNS} FROM videojuego v ORDER BY v.id"),
        row_to_game,
    )?;
    attach_developer_ids(conn, &mut games)?;
    Ok(games)
}

fn by_id<T>(items: &[T], id_of: impl Fn(&T) -> Id) -> HashMap<Id, &T> {
    items.iter().map(|item| (id_of(item), item)).collect()
}

/// Every developer with their games.
pub fn list_developers(conn: &Connection) -> Result<Vec<DeveloperDetail>, StoreError> {
    let developers = all_developers(conn)?;
    let games = all_games(conn)?;
    Ok(developers
        .into_iter()
        .map(|developer| {
            let games = games
                .iter()
                .filter(|g| g.developer_ids.contains(&developer.id))
                .cloned()
                .collect();
            DeveloperDetail { developer, games }
        })
        .collect())
}

/// Every game with its developers.
pub fn list_games(conn: &Connection) -> Result<Vec<GameDetail>, StoreError> {
    let developers = all_developers(conn)?;
    let dev_index = by_id(&developers, |d| d.id);
    let games = all_games(conn)?;
    Ok(games
        .into_iter()
        .map(|game| {
            let developers = game
                .developer_ids
                .iter()
                .filter_map(|id| dev_index.get(id).map(|d| (*d).clone()))
                .collect();
            GameDetail { game, developers }
        })
        .collect())
}

/// Every rating with its game.
pub fn list_ratings(conn: &Connection) -> Result<Vec<RatingDetail>, StoreError> {
    let games = all_games(conn)?;
    let game_index = by_id(&games, |g| g.id);
    let ratings = query_all(
        conn,
        &format!("SELECT {RATING_COLUMNS} FROM puntuacion p ORDER BY p.id"),
        row_to_rating,
    )?;
    ratings
        .into_iter()
        .map(|rating| {
            let game = game_index
                .get(&rating.game_id)
                .map(|g| (*g).clone())
                .ok_or(StoreError::not_found(EntityKind::Game, rating.game_id))?;
            Ok(RatingDetail { rating, game })
        })
        .collect()
}

fn all_tickets(conn: &Connection) -> Result<Vec<Ticket>, StoreError> {
    query_all(
        conn,
        &format!("SELECT {TICKET_COLUMNS} FROM ticket t ORDER BY t.id"),
        row_to_ticket,
    )
}

fn all_customers(conn: &Connection) -> Result<Vec<Customer>, StoreError> {
    query_all(
        conn,
        &format!("SELECT {CUSTOMER_COLUMNS} FROM usuario u ORDER BY u.id"),
        row_to_customer,
    )
}

/// Every customer with their tickets.
pub fn list_customers(conn: &Connection) -> Result<Vec<CustomerDetail>, StoreError> {
    let tickets = all_tickets(conn)?;
    Ok(all_customers(conn)?
        .into_iter()
        .map(|customer| {
            let tickets = tickets
                .iter()
                .filter(|t| t.customer_id == customer.id)
                .cloned()
                .collect();
            CustomerDetail { customer, tickets }
        })
        .collect())
}

/// Every ticket line with its game.
pub fn list_lines(conn: &Connection) -> Result<Vec<LineDetail>, StoreError> {
    let games = all_games(conn)?;
    let game_index = by_id(&games, |g| g.id);
    let lines = query_all(
        conn,
        &format!("SELECT {LINE_COLUMNS} FROM ticket_videojuego l ORDER BY l.id"),
        row_to_line,
    )?;
    lines
        .into_iter()
        .map(|line| {
            let game = game_index
                .get(&line.game_id)
                .map(|g| (*g).clone())
                .ok_or(StoreError::not_found(EntityKind::Game, line.game_id))?;
            Ok(LineDetail { line, game })
        })
        .collect()
}

/// Every ticket with its customer and lines.
pub fn list_tickets(conn: &Connection) -> Result<Vec<TicketDetail>, StoreError> {
    let customers = all_customers(conn)?;
    let customer_index = by_id(&customers, |c| c.id);

    let mut lines_by_ticket: HashMap<Id, Vec<LineDetail>> = HashMap::new();
    for detail in list_lines(conn)? {
        lines_by_ticket
            .entry(detail.line.ticket_id)
            .or_default()
            .push(detail);
    }

    all_tickets(conn)?
        .into_iter()
        .map(|ticket| {
            let customer = customer_index
                .get(&ticket.customer_id)
                .map(|c| (*c).clone())
                .ok_or(StoreError::not_found(EntityKind::Customer, ticket.customer_id))?;
            let lines = lines_by_ticket.remove(&ticket.id).unwrap_or_default();
            Ok(TicketDetail {
                ticket,
                customer,
                lines,
            })
        })
        .collect()
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts per entity.
pub fn store_counts(conn: &Connection) -> Result<StoreCounts, StoreError> {
    let count = |table: &str| -> Result<i64, StoreError> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    };
    Ok(StoreCounts {
        developers: count("developer")?,
        games: count("videojuego")?,
        ratings: count("puntuacion")?,
        customers: count("usuario")?,
        tickets: count("ticket")?,
        ticket_lines: count("ticket_videojuego")?,
        developer_links: count("desarrollador_videojuego")?,
    })
}

/// Summary statistics for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCounts {
    pub developers: i64,
    pub games: i64,
    pub ratings: i64,
    pub customers: i64,
    pub tickets: i64,
    pub ticket_lines: i64,
    pub developer_links: i64,
}
