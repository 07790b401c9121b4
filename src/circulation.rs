//! Lending and returning books, plus the overdue fine rules.
//!
//! Every operation takes the date it should treat as "today" explicitly so the
//! rules stay independent of the wall clock. The facade supplies that date
//! from its [`Clock`](crate::clock::Clock).

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::catalog::find_book;
use crate::error::{IssueError, ReturnError};
use crate::membership::find_member;
use crate::models::{BookId, LibraryState, Loan, MemberId};

/// Fine charged for each whole day a book is kept past its due date.
pub const FINE_PER_DAY: u64 = 1;

/// Result of a successful return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub book_id: BookId,
    /// The loan that was closed. `None` when the book was flagged as issued
    /// but had no loan on record.
    pub closed_loan: Option<Loan>,
    pub overdue_days: u64,
    /// Present only when the book came back late.
    pub fine: Option<u64>,
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fine) = self.fine {
            writeln!(
                f,
                "Book is overdue by {} days. Fine to be paid: ₹{fine}",
                self.overdue_days
            )?;
        }
        f.write_str("Book returned successfully.")
    }
}

/// Lend a book to a member. Checks run in a fixed order (book exists, member
/// exists, book is on the shelf) and the first failure is reported.
pub fn issue_book(
    state: &mut LibraryState,
    book_id: BookId,
    member_id: MemberId,
    today: NaiveDate,
) -> Result<Loan, IssueError> {
    let book = find_book(state, book_id).ok_or(IssueError::BookNotFound(book_id))?;
    let already_issued = book.issued;

    if find_member(state, member_id).is_none() {
        return Err(IssueError::MemberNotFound(member_id));
    }
    if already_issued {
        return Err(IssueError::AlreadyIssued(book_id));
    }

    let loan = Loan::starting(book_id, member_id, today);
    if let Some(book) = state.book_mut(book_id) {
        book.issued = true;
    }
    state.loans.push(loan.clone());

    debug!(book_id, member_id, due = %loan.due_date, "book issued");
    Ok(loan)
}

/// Take a book back, closing its loan and working out any fine owed.
pub fn return_book(
    state: &mut LibraryState,
    book_id: BookId,
    today: NaiveDate,
) -> Result<ReturnOutcome, ReturnError> {
    let book = state
        .book_mut(book_id)
        .ok_or(ReturnError::BookNotFound(book_id))?;
    if !book.issued {
        return Err(ReturnError::NotIssued(book_id));
    }
    book.issued = false;

    let position = state.loans.iter().position(|loan| loan.book_id == book_id);
    let closed_loan = position.map(|index| state.loans.remove(index));

    let overdue_days = match &closed_loan {
        Some(loan) => overdue_days(loan, today),
        None => {
            warn!(book_id, "book was marked issued without a loan on record; returning it anyway");
            0
        }
    };
    let fine = (overdue_days > 0).then(|| fine_for(overdue_days));

    debug!(book_id, overdue_days, ?fine, "book returned");
    Ok(ReturnOutcome {
        book_id,
        closed_loan,
        overdue_days,
        fine,
    })
}

/// Every open loan, oldest first.
pub fn list_active_loans(state: &LibraryState) -> &[Loan] {
    &state.loans
}

/// Active loans whose due date is strictly before `today`, in loan order.
pub fn list_overdue_loans(state: &LibraryState, today: NaiveDate) -> Vec<&Loan> {
    state
        .loans
        .iter()
        .filter(|loan| loan.is_overdue(today))
        .collect()
}

/// Whole days between the due date and `today`, never negative.
pub fn overdue_days(loan: &Loan, today: NaiveDate) -> u64 {
    let days = today.signed_duration_since(loan.due_date).num_days();
    u64::try_from(days).unwrap_or(0)
}

/// Fine owed for `overdue_days` late days at [`FINE_PER_DAY`].
pub fn fine_for(overdue_days: u64) -> u64 {
    overdue_days.saturating_mul(FINE_PER_DAY)
}
