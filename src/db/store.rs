//! Whole-library load and save on top of the per-table helpers.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::models::LibraryState;

use super::books::{fetch_books, insert_books};
use super::connection::{create_schema, default_db_path, schema_version, SCHEMA_VERSION};
use super::loans::{fetch_loans, insert_loans};
use super::members::{fetch_members, insert_members};

/// Reads and writes the complete library state to one data file.
///
/// Loading never fails: a missing file is a first run, and a file that cannot
/// be read is discarded with a warning so the program still starts. Saving
/// writes a complete snapshot next to the target and renames it into place,
/// so a failed save leaves the previous file as it was.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Store backed by the data file at `path`. Nothing is touched on disk
    /// until `load` or `save` runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.library-manager/library.sqlite`.
    pub fn at_default_location() -> Result<Self, PersistenceError> {
        Ok(Self::new(default_db_path()?))
    }

    /// Location of the data file this store reads and replaces.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored library, falling back to an empty one when the file is
    /// missing, unreadable, from another schema version, or self-contradictory.
    pub fn load(&self) -> LibraryState {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no existing data file found; starting with a new library");
            return LibraryState::new();
        }

        match self.read() {
            Ok(state) => {
                info!(
                    path = %self.path.display(),
                    books = state.books.len(),
                    members = state.members.len(),
                    loans = state.loans.len(),
                    "library data loaded"
                );
                state
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %format!("{err:#}"),
                    "could not read library data; starting with a new library"
                );
                LibraryState::new()
            }
        }
    }

    /// Read the file as-is, reporting why it is unusable.
    fn read(&self) -> Result<LibraryState, PersistenceError> {
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .context("failed to open library data file")?;

        let mut state = match schema_version(&conn)? {
            SCHEMA_VERSION => LibraryState {
                books: fetch_books(&conn)?,
                members: fetch_members(&conn)?,
                loans: fetch_loans(&conn)?,
            },
            found => {
                return Err(PersistenceError::UnsupportedVersion {
                    found,
                    expected: SCHEMA_VERSION,
                })
            }
        };

        reconcile(&mut state)?;
        Ok(state)
    }

    /// Replace the stored library with `state`.
    pub fn save(&self, state: &LibraryState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let staging = self.staging_path();
        remove_if_present(&staging)?;

        if let Err(err) = write_snapshot(&staging, state) {
            // the half-written snapshot is useless; the real file is untouched
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }

        fs::rename(&staging, &self.path).context("failed to replace library data file")?;

        info!(
            path = %self.path.display(),
            books = state.books.len(),
            members = state.members.len(),
            loans = state.loans.len(),
            "library data saved"
        );
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Check that loaded records agree with each other before handing them out.
///
/// Loans must name an existing book and member, and no book may carry two
/// loans; either problem makes the file unusable. A book that has a loan but
/// is flagged as available is marked issued again. The reverse (flagged as
/// issued with no loan) is left alone because returning such a book already
/// recovers it.
fn reconcile(state: &mut LibraryState) -> Result<(), PersistenceError> {
    let mut seen = HashSet::new();
    for loan in &state.loans {
        if !state.books.iter().any(|book| book.id == loan.book_id) {
            return Err(inconsistent(format!(
                "loan refers to unknown book {}",
                loan.book_id
            )));
        }
        if !state.members.iter().any(|member| member.id == loan.member_id) {
            return Err(inconsistent(format!(
                "loan for book {} refers to unknown member {}",
                loan.book_id, loan.member_id
            )));
        }
        if !seen.insert(loan.book_id) {
            return Err(inconsistent(format!(
                "book {} has more than one active loan",
                loan.book_id
            )));
        }
    }

    for book in state.books.iter_mut() {
        if !book.issued && seen.contains(&book.id) {
            warn!(book_id = book.id, "book has an active loan but was stored as available; marking it issued");
            book.issued = true;
        }
    }

    Ok(())
}

fn inconsistent(reason: String) -> PersistenceError {
    PersistenceError::Inconsistent { reason }
}

/// Write a full snapshot into a new database file at `path`.
fn write_snapshot(path: &Path, state: &LibraryState) -> Result<()> {
    let mut conn = Connection::open(path).context("failed to create snapshot file")?;
    create_schema(&conn)?;

    let tx = conn
        .transaction()
        .context("failed to start snapshot transaction")?;
    insert_books(&tx, &state.books)?;
    insert_members(&tx, &state.members)?;
    insert_loans(&tx, &state.loans)?;
    tx.commit().context("failed to commit snapshot")?;

    conn.close()
        .map_err(|(_, err)| err)
        .context("failed to close snapshot file")?;
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("failed to clear stale snapshot file"),
    }
}
