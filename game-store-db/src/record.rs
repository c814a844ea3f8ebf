//! The `Record` trait: how each entity kind maps onto its table.

use game_store_core::*;
use rusqlite::Connection;

use crate::error::StoreError;
use crate::operations::{self, delete_row};
use crate::queries;

/// An entity kind the store can persist.
///
/// Implementations only issue statements; transaction boundaries belong to
/// [`crate::Store`].
pub trait Record: Sized {
    const KIND: EntityKind;
    const TABLE: &'static str;

    /// The entity plus its eagerly loaded relations.
    type Detail;

    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);

    fn with_id(mut self, id: Id) -> Self {
        self.set_id(id);
        self
    }

    /// Insert a new row and return its id.
    fn insert(&self, conn: &Connection) -> Result<Id, StoreError>;

    /// Overwrite the row with this entity's id.
    fn update(&self, conn: &Connection) -> Result<(), StoreError>;

    fn find(conn: &Connection, id: Id) -> Result<Self::Detail, StoreError>;

    /// Every row ordered by id.
    fn list_all(conn: &Connection) -> Result<Vec<Self::Detail>, StoreError>;

    fn delete(conn: &Connection, id: Id) -> Result<(), StoreError> {
        delete_row(conn, Self::TABLE, Self::KIND, id)
    }
}

impl Record for Developer {
    const KIND: EntityKind = EntityKind::Developer;
    const TABLE: &'static str = "developer";
    type Detail = DeveloperDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_developer(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_developer(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<DeveloperDetail, StoreError> {
        queries::developer_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<DeveloperDetail>, StoreError> {
        queries::list_developers(conn)
    }
}

impl Record for Game {
    const KIND: EntityKind = EntityKind::Game;
    const TABLE: &'static str = "videojuego";
    type Detail = GameDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_game(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_game(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<GameDetail, StoreError> {
        queries::game_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<GameDetail>, StoreError> {
        queries::list_games(conn)
    }
}

impl Record for Rating {
    const KIND: EntityKind = EntityKind::Rating;
    const TABLE: &'static str = "puntuacion";
    type Detail = RatingDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_rating(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_rating(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<RatingDetail, StoreError> {
        queries::rating_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<RatingDetail>, StoreError> {
        queries::list_ratings(conn)
    }
}

impl Record for Customer {
    const KIND: EntityKind = EntityKind::Customer;
    const TABLE: &'static str = "usuario";
    type Detail = CustomerDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_customer(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_customer(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<CustomerDetail, StoreError> {
        queries::customer_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<CustomerDetail>, StoreError> {
        queries::list_customers(conn)
    }
}

impl Record for Ticket {
    const KIND: EntityKind = EntityKind::Ticket;
    const TABLE: &'static str = "ticket";
    type Detail = TicketDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_ticket(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_ticket(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<TicketDetail, StoreError> {
        queries::ticket_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<TicketDetail>, StoreError> {
        queries::list_tickets(conn)
    }

    /// A ticket owns its lines, so they go first.
    fn delete(conn: &Connection, id: Id) -> Result<(), StoreError> {
        let lines = operations::delete_lines_of_ticket(conn, id)?;
        log::debug!("Removed {lines} line(s) of ticket {id}");
        delete_row(conn, Self::TABLE, Self::KIND, id)
    }
}

impl Record for TicketLine {
    const KIND: EntityKind = EntityKind::TicketLine;
    const TABLE: &'static str = "ticket_videojuego";
    type Detail = LineDetail;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn insert(&self, conn: &Connection) -> Result<Id, StoreError> {
        operations::insert_ticket_line(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), StoreError> {
        operations::update_ticket_line(conn, self)
    }

    fn find(conn: &Connection, id: Id) -> Result<LineDetail, StoreError> {
        queries::line_detail(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<LineDetail>, StoreError> {
        queries::list_lines(conn)
    }
}
