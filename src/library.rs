//! The single entry point a front end talks to. `Library` owns the loaded
//! state, the store it came from and the clock used for due dates.

use crate::catalog;
use crate::circulation::{self, ReturnOutcome};
use crate::clock::{Clock, SystemClock};
use crate::db::Store;
use crate::error::{DuplicateId, IssueError, PersistenceError, ReturnError};
use crate::membership;
use crate::models::{Book, BookId, LibraryState, Loan, Member, MemberId};

/// Owns the one [`LibraryState`] of the process. Every mutation goes through
/// `&mut self`, so nothing else can change the state behind its back.
pub struct Library {
    state: LibraryState,
    store: Store,
    clock: Box<dyn Clock>,
}

impl Library {
    /// Load whatever `store` holds and run against the system date.
    pub fn open(store: Store) -> Self {
        Self::open_with_clock(store, Box::new(SystemClock))
    }

    pub fn open_with_clock(store: Store, clock: Box<dyn Clock>) -> Self {
        let state = store.load();
        Self::from_parts(state, store, clock)
    }

    /// Wrap an already-built state without touching the store.
    pub fn from_parts(state: LibraryState, store: Store, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            store,
            clock,
        }
    }

    /// Write the current state back to the store. Meant to be called once
    /// when the front end shuts down; mutations never save on their own.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.store.save(&self.state)
    }

    /// Read-only view of everything loaded or changed so far.
    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// The store this library was loaded from and will save to.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn add_book(&mut self, id: BookId, title: &str, author: &str) -> Result<(), DuplicateId> {
        catalog::add_book(&mut self.state, id, title, author)
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        catalog::find_book(&self.state, id)
    }

    pub fn books(&self) -> &[Book] {
        catalog::list_books(&self.state)
    }

    pub fn add_member(&mut self, id: MemberId, name: &str) -> Result<(), DuplicateId> {
        membership::add_member(&mut self.state, id, name)
    }

    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        membership::find_member(&self.state, id)
    }

    pub fn members(&self) -> &[Member] {
        membership::list_members(&self.state)
    }

    /// Lend a book, dating the loan from the library's clock.
    pub fn issue_book(&mut self, book_id: BookId, member_id: MemberId) -> Result<Loan, IssueError> {
        let today = self.clock.today();
        circulation::issue_book(&mut self.state, book_id, member_id, today)
    }

    /// Take a book back, measuring lateness against the library's clock.
    pub fn return_book(&mut self, book_id: BookId) -> Result<ReturnOutcome, ReturnError> {
        let today = self.clock.today();
        circulation::return_book(&mut self.state, book_id, today)
    }

    pub fn active_loans(&self) -> &[Loan] {
        circulation::list_active_loans(&self.state)
    }

    /// Loans whose due date has passed as of the library's clock.
    pub fn overdue_loans(&self) -> Vec<&Loan> {
        circulation::list_overdue_loans(&self.state, self.clock.today())
    }
}
