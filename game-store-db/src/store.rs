//! The store handle and its transactional operations.

use std::path::Path;

use game_store_core::*;
use rusqlite::Connection;

use crate::error::StoreError;
use crate::operations;
use crate::queries::{self, StoreCounts};
use crate::record::Record;
use crate::schema;

/// An open store database.
///
/// Every public operation is one unit of work: it opens a transaction,
/// commits when the work succeeds, and rolls back on any error.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create and migrate) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = schema::open_database(path)?;
        log::debug!("Opened store at {}", path.display());
        Ok(Self { conn })
    }

    /// A fresh in-memory store.
    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    /// Close the underlying connection, reporting any error SQLite raises.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    /// Direct access to the connection, for inspection outside a unit of work.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn schema_version(&self) -> Result<i32, StoreError> {
        Ok(schema::get_schema_version(&self.conn)?)
    }

    fn unit_of_work<T>(
        &self,
        label: &str,
        work: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                log::debug!("{label}: committed");
                Ok(value)
            }
            Err(e) => {
                log::debug!("{label}: rolled back ({e})");
                Err(e)
            }
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Every row of one kind with its eager relations, ordered by id.
    pub fn list_all<T: Record>(&self) -> Result<Vec<T::Detail>, StoreError> {
        self.unit_of_work(&format!("list {}", T::KIND), |conn| T::list_all(conn))
    }

    pub fn find<T: Record>(&self, id: Id) -> Result<T::Detail, StoreError> {
        self.unit_of_work(&format!("find {} {id}", T::KIND), |conn| {
            T::find(conn, id)
        })
    }

    /// The most recently issued ticket.
    ///
    /// Fails with [`StoreError::Empty`] when no ticket has been stored.
    pub fn latest_ticket(&self) -> Result<Ticket, StoreError> {
        self.unit_of_work("latest ticket", queries::latest_ticket)
    }

    pub fn games_of_developer(&self, developer_id: Id) -> Result<Vec<Game>, StoreError> {
        self.unit_of_work("games of developer", |conn| {
            queries::developer_by_id(conn, developer_id)?;
            queries::games_of_developer(conn, developer_id)
        })
    }

    pub fn tickets_of_customer(&self, customer_id: Id) -> Result<Vec<Ticket>, StoreError> {
        self.unit_of_work("tickets of customer", |conn| {
            queries::customer_by_id(conn, customer_id)?;
            queries::tickets_of_customer(conn, customer_id)
        })
    }

    pub fn counts(&self) -> Result<StoreCounts, StoreError> {
        self.unit_of_work("counts", queries::store_counts)
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Insert `entity` and return it with its assigned id.
    ///
    /// A game's developer links are written in the same transaction.
    pub fn save<T: Record>(&self, entity: T) -> Result<T, StoreError> {
        let id = self.unit_of_work(&format!("save {}", T::KIND), |conn| entity.insert(conn))?;
        Ok(entity.with_id(id))
    }

    /// Insert a ticket and all of its lines atomically.
    ///
    /// Each returned line is back-linked to the new ticket and carries its
    /// own assigned id.
    pub fn save_ticket_with_lines(
        &self,
        ticket: Ticket,
        mut lines: Vec<TicketLine>,
    ) -> Result<(Ticket, Vec<TicketLine>), StoreError> {
        let id = self.unit_of_work("save ticket with lines", |conn| {
            let id = ticket.insert(conn)?;
            operations::insert_lines_for_ticket(conn, id, &mut lines)?;
            Ok(id)
        })?;
        Ok((ticket.with_id(id), lines))
    }

    /// Overwrite the stored row with `entity`'s id.
    ///
    /// For a game, its developer links are replaced by `developer_ids`.
    pub fn update<T: Record>(&self, entity: &T) -> Result<(), StoreError> {
        self.unit_of_work(&format!("update {} {}", T::KIND, entity.id()), |conn| {
            entity.update(conn)
        })
    }

    /// Update `ticket` and swap its stored lines for `lines` atomically.
    pub fn replace_ticket_lines(
        &self,
        ticket: &Ticket,
        mut lines: Vec<TicketLine>,
    ) -> Result<Vec<TicketLine>, StoreError> {
        self.unit_of_work(&format!("replace lines of ticket {}", ticket.id), |conn| {
            ticket.update(conn)?;
            let removed = operations::delete_lines_of_ticket(conn, ticket.id)?;
            log::debug!("Replacing {removed} line(s) with {}", lines.len());
            operations::insert_lines_for_ticket(conn, ticket.id, &mut lines)?;
            Ok(())
        })?;
        Ok(lines)
    }

    /// Delete one row by id.
    ///
    /// Fails with [`StoreError::ReferentialIntegrity`] when another row still
    /// references it; nothing is changed in that case.
    pub fn delete<T: Record>(&self, id: Id) -> Result<(), StoreError> {
        self.unit_of_work(&format!("delete {} {id}", T::KIND), |conn| T::delete(conn, id))
    }
}
