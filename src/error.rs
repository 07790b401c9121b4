//! Error types returned by the library operations. Every message is written
//! as a sentence a front end can show to the user as-is.

use std::fmt;

use thiserror::Error;

use crate::models::{BookId, MemberId};

/// Which roster a duplicate id collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Book,
    Member,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book => f.write_str("Book"),
            Self::Member => f.write_str("Member"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} with ID {id} already exists.")]
pub struct DuplicateId {
    pub kind: RecordKind,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("Book not found.")]
    BookNotFound(BookId),
    #[error("Member not found.")]
    MemberNotFound(MemberId),
    #[error("Book is already issued.")]
    AlreadyIssued(BookId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("Book not found.")]
    BookNotFound(BookId),
    #[error("Book is not currently issued.")]
    NotIssued(BookId),
}

/// Failures while reading or writing the data file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not locate home directory for the library data file")]
    NoHomeDirectory,
    #[error("data file uses schema version {found}, this build reads version {expected}")]
    UnsupportedVersion { found: i64, expected: i64 },
    #[error("data file records disagree: {reason}")]
    Inconsistent { reason: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
