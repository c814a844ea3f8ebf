//! The application facade.
//!
//! [`Shop`] sits between a front end and the [`Store`]: it validates form
//! input, keeps the in-progress developer roster and ticket cart, derives
//! ticket codes and totals, and translates storage failures into
//! [`ShopError`]s with user-facing messages.

use game_store_core::*;
use game_store_db::{Record, Store, StoreCounts, StoreError};

use crate::cart::Cart;
use crate::error::ShopError;
use crate::forms::{CustomerForm, DeveloperForm, GameForm, RatingForm, TicketForm, TicketHeader};
use crate::roster::DeveloperRoster;
use crate::settings::ShopSettings;

pub struct Shop {
    store: Store,
    initial_code: TicketCode,
    roster: DeveloperRoster,
    /// Game whose stored links were last loaded into `roster`.
    roster_game: Option<Id>,
    cart: Cart,
}

impl Shop {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            initial_code: TicketCode::INITIAL,
            roster: DeveloperRoster::new(),
            roster_game: None,
            cart: Cart::new(),
        }
    }

    pub fn with_settings(store: Store, settings: &ShopSettings) -> Self {
        Self {
            initial_code: settings.initial_code(),
            ..Self::new(store)
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Close the underlying store.
    pub fn close(self) -> Result<(), ShopError> {
        Ok(self.store.close()?)
    }

    // ── Lists ───────────────────────────────────────────────────────────────

    pub fn developers(&self) -> Result<Vec<DeveloperDetail>, ShopError> {
        Ok(self.store.list_all::<Developer>()?)
    }

    pub fn games(&self) -> Result<Vec<GameDetail>, ShopError> {
        Ok(self.store.list_all::<Game>()?)
    }

    pub fn ratings(&self) -> Result<Vec<RatingDetail>, ShopError> {
        Ok(self.store.list_all::<Rating>()?)
    }

    pub fn customers(&self) -> Result<Vec<CustomerDetail>, ShopError> {
        Ok(self.store.list_all::<Customer>()?)
    }

    pub fn tickets(&self) -> Result<Vec<TicketDetail>, ShopError> {
        Ok(self.store.list_all::<Ticket>()?)
    }

    /// One entity of any kind, with its relations.
    pub fn find<T: Record>(&self, id: Id) -> Result<T::Detail, ShopError> {
        Ok(self.store.find::<T>(id)?)
    }

    pub fn games_of_developer(&self, developer_id: Id) -> Result<Vec<Game>, ShopError> {
        Ok(self.store.games_of_developer(developer_id)?)
    }

    pub fn tickets_of_customer(&self, customer_id: Id) -> Result<Vec<Ticket>, ShopError> {
        Ok(self.store.tickets_of_customer(customer_id)?)
    }

    pub fn counts(&self) -> Result<StoreCounts, ShopError> {
        Ok(self.store.counts()?)
    }

    // ── Developers ──────────────────────────────────────────────────────────

    pub fn create_developer(&self, form: &DeveloperForm) -> Result<Developer, ShopError> {
        let developer = self.store.save(form.to_developer()?)?;
        log::debug!("Created developer {} ({})", developer.id, developer);
        Ok(developer)
    }

    pub fn update_developer(&self, id: Id, form: &DeveloperForm) -> Result<Developer, ShopError> {
        let developer = form.to_developer()?.with_id(id);
        self.store.update(&developer)?;
        Ok(developer)
    }

    // ── Games and the developer roster ──────────────────────────────────────

    pub fn roster(&self) -> &DeveloperRoster {
        &self.roster
    }

    /// Add a stored developer to the roster of the game being edited.
    pub fn add_to_roster(&mut self, developer_id: Id) -> Result<(), ShopError> {
        let detail = self.store.find::<Developer>(developer_id)?;
        self.roster.add(detail.developer)?;
        Ok(())
    }

    pub fn remove_from_roster(&mut self, index: usize) -> Result<Developer, ShopError> {
        Ok(self.roster.remove(index)?)
    }

    pub fn clear_roster(&mut self) {
        self.roster.clear();
    }

    /// Load a stored game and put its developers in the roster.
    pub fn edit_game(&mut self, id: Id) -> Result<GameDetail, ShopError> {
        let detail = self.store.find::<Game>(id)?;
        self.roster = DeveloperRoster::from_game(&detail);
        self.roster_game = Some(id);
        Ok(detail)
    }

    /// Save a new game linked to the roster's developers. The roster is
    /// cleared once the game is stored.
    pub fn create_game(&mut self, form: &GameForm) -> Result<Game, ShopError> {
        let game = self.store.save(form.to_game(&self.roster)?)?;
        log::debug!(
            "Created game {} ({}) with {} developer(s)",
            game.id,
            game,
            game.developer_ids.len()
        );
        self.roster.clear();
        self.roster_game = None;
        Ok(game)
    }

    /// Overwrite a stored game; its developer links become the roster.
    ///
    /// If the roster is empty and was not loaded from this game with
    /// [`Shop::edit_game`], the game keeps its stored links. An empty roster
    /// loaded from the game removes every link.
    pub fn update_game(&mut self, id: Id, form: &GameForm) -> Result<Game, ShopError> {
        if self.roster.is_empty() && self.roster_game != Some(id) {
            self.roster = DeveloperRoster::from_game(&self.store.find::<Game>(id)?);
        }
        let game = form.to_game(&self.roster)?.with_id(id);
        self.store.update(&game)?;
        self.roster.clear();
        self.roster_game = None;
        Ok(game)
    }

    // ── Ratings ─────────────────────────────────────────────────────────────

    pub fn create_rating(&self, form: &RatingForm) -> Result<Rating, ShopError> {
        let rating = form.to_rating()?;
        self.require::<Game>(rating.game_id)?;
        Ok(self.store.save(rating)?)
    }

    pub fn update_rating(&self, id: Id, form: &RatingForm) -> Result<Rating, ShopError> {
        let rating = form.to_rating()?.with_id(id);
        self.require::<Game>(rating.game_id)?;
        self.store.update(&rating)?;
        Ok(rating)
    }

    // ── Customers ───────────────────────────────────────────────────────────

    pub fn create_customer(&self, form: &CustomerForm) -> Result<Customer, ShopError> {
        Ok(self.store.save(form.to_customer()?)?)
    }

    pub fn update_customer(&self, id: Id, form: &CustomerForm) -> Result<Customer, ShopError> {
        let customer = form.to_customer()?.with_id(id);
        self.store.update(&customer)?;
        Ok(customer)
    }

    // ── Tickets and the cart ────────────────────────────────────────────────

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add `quantity` copies of a stored game to the cart.
    pub fn add_to_cart(&mut self, game_id: Id, quantity: u32) -> Result<(), ShopError> {
        let detail = self.store.find::<Game>(game_id)?;
        self.cart.add(&detail.game, quantity)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<(), ShopError> {
        self.cart.remove(index)?;
        Ok(())
    }

    /// Discard the pending lines. Nothing is stored.
    pub fn cancel_cart(&mut self) -> Result<(), ShopError> {
        Ok(self.cart.cancel()?)
    }

    pub fn reset_cart(&mut self) {
        self.cart.reset();
    }

    /// Load a stored ticket and put its lines in the cart.
    pub fn edit_ticket(&mut self, id: Id) -> Result<TicketDetail, ShopError> {
        let detail = self.store.find::<Ticket>(id)?;
        self.cart = Cart::from_ticket(&detail);
        Ok(detail)
    }

    /// The code the next new ticket will get.
    pub fn next_ticket_code(&self) -> Result<TicketCode, ShopError> {
        let last = match self.store.latest_ticket() {
            Ok(ticket) => ticket.code,
            Err(StoreError::Empty(_)) => self.initial_code,
            Err(e) => return Err(e.into()),
        };
        Ok(last.next()?)
    }

    /// Store a new ticket built from `form` and the cart contents.
    ///
    /// Lines are priced at each game's current price and the ticket total is
    /// their sum. On success the cart is committed.
    pub fn create_ticket(&mut self, form: &TicketForm) -> Result<TicketDetail, ShopError> {
        let header = self.ticket_header(form)?;
        let lines = self.cart.ticket_lines()?;
        let ticket = Ticket {
            id: UNSAVED_ID,
            code: self.next_ticket_code()?,
            payment: header.payment,
            date: header.date,
            total: Ticket::total_of(&lines)?,
            customer_id: header.customer_id,
        };

        let (ticket, lines) = self.store.save_ticket_with_lines(ticket, lines)?;
        log::debug!("Issued ticket {} with {} line(s)", ticket, lines.len());
        self.cart.mark_committed();
        self.find::<Ticket>(ticket.id)
    }

    /// Rewrite a stored ticket from `form` and the cart contents, keeping
    /// its id and code. Its previous lines are replaced in full.
    pub fn update_ticket(&mut self, id: Id, form: &TicketForm) -> Result<TicketDetail, ShopError> {
        let existing = self.store.find::<Ticket>(id)?.ticket;
        let header = self.ticket_header(form)?;
        let lines = self.cart.ticket_lines()?;
        let ticket = Ticket {
            payment: header.payment,
            date: header.date,
            total: Ticket::total_of(&lines)?,
            customer_id: header.customer_id,
            ..existing
        };

        let lines = self.store.replace_ticket_lines(&ticket, lines)?;
        log::debug!("Rewrote ticket {} with {} line(s)", ticket, lines.len());
        self.cart.mark_committed();
        self.find::<Ticket>(id)
    }

    fn ticket_header(&self, form: &TicketForm) -> Result<TicketHeader, ShopError> {
        let header = form.to_header()?;
        self.require::<Customer>(header.customer_id)?;
        Ok(header)
    }

    // ── Deletion ────────────────────────────────────────────────────────────

    /// Delete one entity by id.
    ///
    /// When other rows still reference it the delete is rolled back and the
    /// error's [`ShopError::user_message`] asks the user to remove that link.
    pub fn delete<T: Record>(&self, id: Id) -> Result<(), ShopError> {
        self.store.delete::<T>(id).map_err(|e| {
            let err = ShopError::from(e);
            if err.is_recoverable() {
                log::warn!("{}", err.user_message());
            }
            err
        })
    }

    /// Fail with `NotFound` unless a `T` with `id` is stored.
    fn require<T: Record>(&self, id: Id) -> Result<(), ShopError> {
        self.store.find::<T>(id)?;
        Ok(())
    }
}
