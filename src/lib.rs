//! Core of a small lending library: the book catalog, the member roster, the
//! active loans with their overdue fines, and a store that keeps all of it in
//! one data file between runs.
//!
//! Front ends go through [`Library`], which owns the state for the life of the
//! process. The operation modules are public as well so the rules can be
//! exercised directly against a [`LibraryState`].
pub mod catalog;
pub mod circulation;
pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod logger;
pub mod membership;
pub mod models;

pub use circulation::{ReturnOutcome, FINE_PER_DAY};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CliConfig, Command};
pub use db::Store;
pub use error::{DuplicateId, IssueError, PersistenceError, RecordKind, ReturnError};
pub use library::Library;
pub use models::{Book, BookId, LibraryState, Loan, Member, MemberId, LOAN_PERIOD_DAYS};
