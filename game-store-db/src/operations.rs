//! Row-level write operations for every entity type.
//!
//! These functions run against whatever connection or transaction they are
//! handed; grouping them into units of work is the job of [`crate::Store`].

use game_store_core::*;
use rusqlite::{params, Connection};

use crate::error::{is_foreign_key_violation, StoreError};

/// Fail with `NotFound` when an update or delete touched no row.
fn expect_changed(changed: usize, kind: EntityKind, id: Id) -> Result<(), StoreError> {
    if changed == 0 {
        return Err(StoreError::not_found(kind, id));
    }
    Ok(())
}

// ── Developer Operations ────────────────────────────────────────────────────

/// Insert a developer. Returns the generated ID.
pub fn insert_developer(conn: &Connection, dev: &Developer) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO developer (nombre, email, experiencia, tipo) VALUES (?1, ?2, ?3, ?4)",
        params![dev.name, dev.email, dev.experience, dev.kind.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_developer(conn: &Connection, dev: &Developer) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE developer SET nombre = ?2, email = ?3, experiencia = ?4, tipo = ?5 WHERE id = ?1",
        params![dev.id, dev.name, dev.email, dev.experience, dev.kind.as_str()],
    )?;
    expect_changed(changed, EntityKind::Developer, dev.id)
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a game and its developer links. Returns the generated ID.
pub fn insert_game(conn: &Connection, game: &Game) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO videojuego (titulo, genero, precio, plataforma, fecha_lanzamiento)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            game.title,
            game.genre.as_str(),
            game.price.to_string(),
            game.platform.as_str(),
            game.release_date,
        ],
    )?;
    let id = conn.last_insert_rowid();
    insert_developer_links(conn, id, &game.developer_ids)?;
    Ok(id)
}

/// Update a game's row and replace its developer links.
pub fn update_game(conn: &Connection, game: &Game) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE videojuego SET titulo = ?2, genero = ?3, precio = ?4, plataforma = ?5,
             fecha_lanzamiento = ?6
         WHERE id = ?1",
        params![
            game.id,
            game.title,
            game.genre.as_str(),
            game.price.to_string(),
            game.platform.as_str(),
            game.release_date,
        ],
    )?;
    expect_changed(changed, EntityKind::Game, game.id)?;

    // Clear and re-insert links
    conn.execute(
        "DELETE FROM desarrollador_videojuego WHERE id_videojuego = ?1",
        params![game.id],
    )?;
    insert_developer_links(conn, game.id, &game.developer_ids)
}

fn insert_developer_links(
    conn: &Connection,
    game_id: Id,
    developer_ids: &[Id],
) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO desarrollador_videojuego (id_desarrollador, id_videojuego)
         VALUES (?1, ?2)",
    )?;
    for dev_id in developer_ids {
        stmt.execute(params![dev_id, game_id])?;
    }
    Ok(())
}

// ── Rating Operations ───────────────────────────────────────────────────────

pub fn insert_rating(conn: &Connection, rating: &Rating) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO puntuacion (fuente, nota_videojuego, fecha_nota, id_videojuego)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            rating.source,
            rating.score.to_string(),
            rating.date,
            rating.game_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_rating(conn: &Connection, rating: &Rating) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE puntuacion SET fuente = ?2, nota_videojuego = ?3, fecha_nota = ?4,
             id_videojuego = ?5
         WHERE id = ?1",
        params![
            rating.id,
            rating.source,
            rating.score.to_string(),
            rating.date,
            rating.game_id,
        ],
    )?;
    expect_changed(changed, EntityKind::Rating, rating.id)
}

// ── Customer Operations ─────────────────────────────────────────────────────

pub fn insert_customer(conn: &Connection, customer: &Customer) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO usuario (nombre, apellidos, dni, direccion, email, telefono)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            customer.name,
            customer.surname,
            customer.national_id,
            customer.address,
            customer.email,
            customer.phone,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_customer(conn: &Connection, customer: &Customer) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE usuario SET nombre = ?2, apellidos = ?3, dni = ?4, direccion = ?5,
             email = ?6, telefono = ?7
         WHERE id = ?1",
        params![
            customer.id,
            customer.name,
            customer.surname,
            customer.national_id,
            customer.address,
            customer.email,
            customer.phone,
        ],
    )?;
    expect_changed(changed, EntityKind::Customer, customer.id)
}

// ── Ticket Operations ───────────────────────────────────────────────────────

pub fn insert_ticket(conn: &Connection, ticket: &Ticket) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO ticket (codigo_ticket, forma_pago, fecha_ticket, total, id_usuario)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ticket.code.to_string(),
            ticket.payment.as_str(),
            ticket.date,
            ticket.total.to_string(),
            ticket.customer_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_ticket(conn: &Connection, ticket: &Ticket) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE ticket SET codigo_ticket = ?2, forma_pago = ?3, fecha_ticket = ?4,
             total = ?5, id_usuario = ?6
         WHERE id = ?1",
        params![
            ticket.id,
            ticket.code.to_string(),
            ticket.payment.as_str(),
            ticket.date,
            ticket.total.to_string(),
            ticket.customer_id,
        ],
    )?;
    expect_changed(changed, EntityKind::Ticket, ticket.id)
}

// ── Ticket Line Operations ──────────────────────────────────────────────────

/// Insert a line. The line's `ticket_id` must already point at a stored ticket.
pub fn insert_ticket_line(conn: &Connection, line: &TicketLine) -> Result<Id, StoreError> {
    conn.execute(
        "INSERT INTO ticket_videojuego (cantidad, total, id_videojuego, id_ticket)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            line.quantity,
            line.total.to_string(),
            line.game_id,
            line.ticket_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_ticket_line(conn: &Connection, line: &TicketLine) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE ticket_videojuego SET cantidad = ?2, total = ?3, id_videojuego = ?4,
             id_ticket = ?5
         WHERE id = ?1",
        params![
            line.id,
            line.quantity,
            line.total.to_string(),
            line.game_id,
            line.ticket_id,
        ],
    )?;
    expect_changed(changed, EntityKind::TicketLine, line.id)
}

/// Back-link each line to `ticket_id`, insert it, and record its new id.
pub fn insert_lines_for_ticket(
    conn: &Connection,
    ticket_id: Id,
    lines: &mut [TicketLine],
) -> Result<(), StoreError> {
    for line in lines.iter_mut() {
        line.ticket_id = ticket_id;
        line.id = insert_ticket_line(conn, line)?;
    }
    Ok(())
}

/// Delete every line of a ticket. Returns the number of lines removed.
pub fn delete_lines_of_ticket(conn: &Connection, ticket_id: Id) -> Result<usize, StoreError> {
    let deleted = conn.execute(
        "DELETE FROM ticket_videojuego WHERE id_ticket = ?1",
        params![ticket_id],
    )?;
    Ok(deleted)
}

// ── Deletion ────────────────────────────────────────────────────────────────

/// Delete one row by id.
///
/// A foreign-key rejection is reported as
/// [`StoreError::ReferentialIntegrity`] naming `kind`.
pub fn delete_row(conn: &Connection, table: &str, kind: EntityKind, id: Id) -> Result<(), StoreError> {
    let changed = conn
        .execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StoreError::ReferentialIntegrity { kind }
            } else {
                e.into()
            }
        })?;
    expect_changed(changed, kind, id)
}
