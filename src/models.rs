//! Domain records shared by the catalog, membership and circulation layers.
//! These stay plain data holders; every rule about how they change lives in
//! the operation modules so the persistence layer can rebuild them freely.

use std::fmt;

use chrono::{Days, NaiveDate};

/// Identifier printed on the book's spine label.
pub type BookId = i64;
/// Identifier printed on the member's card.
pub type MemberId = i64;

/// Length of a standard loan in calendar days.
pub const LOAN_PERIOD_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A catalogued book. Only `issued` changes after creation.
pub struct Book {
    /// Unique catalog id, fixed at creation.
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// True while an active loan references this book.
    pub issued: bool,
}

impl Book {
    pub(crate) fn new(id: BookId, title: &str, author: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            issued: false,
        }
    }

    /// Status word used in listings.
    pub fn status(&self) -> &'static str {
        if self.issued {
            "Issued"
        } else {
            "Available"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {:<5} | Title: {:<30} | Author: {:<25} | Status: {}",
            self.id,
            self.title,
            self.author,
            self.status()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A registered borrower.
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {:<5} | Name: {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An active loan linking one book to one member. The due date is computed
/// once when the loan is created and never recomputed afterwards.
pub struct Loan {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl Loan {
    /// Open a loan starting on `issue_date` with the standard loan period.
    /// Saturates at the last representable date rather than overflowing.
    pub fn starting(book_id: BookId, member_id: MemberId, issue_date: NaiveDate) -> Self {
        let due_date = issue_date
            .checked_add_days(Days::new(LOAN_PERIOD_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self {
            book_id,
            member_id,
            issue_date,
            due_date,
        }
    }

    /// A loan is overdue once its due date lies strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book ID: {:<5} | Member ID: {:<5} | Issue Date: {} | Due Date: {}",
            self.book_id, self.member_id, self.issue_date, self.due_date
        )
    }
}

/// Everything the library knows, persisted and restored as one unit.
///
/// The collections are only reachable mutably from inside the crate so the
/// `issued` flag and the loan list cannot drift apart through outside edits.
/// Each vector keeps insertion order, which listings and the store rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryState {
    pub(crate) books: Vec<Book>,
    pub(crate) members: Vec<Member>,
    pub(crate) loans: Vec<Loan>,
}

impl LibraryState {
    /// A fresh library with no books, members or loans.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.members.is_empty() && self.loans.is_empty()
    }

    pub(crate) fn book_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loan_is_due_fourteen_days_after_issue() {
        let loan = Loan::starting(1, 9, date(2024, 2, 20));
        assert_eq!(loan.due_date, date(2024, 3, 5));
    }

    #[test]
    fn loan_is_not_overdue_on_its_due_date() {
        let loan = Loan::starting(1, 9, date(2024, 1, 1));
        assert!(!loan.is_overdue(loan.due_date));
        assert!(loan.is_overdue(date(2024, 1, 16)));
    }

    #[test]
    fn book_display_shows_status() {
        let mut book = Book::new(7, "Dune", "Herbert");
        assert!(book.to_string().ends_with("Status: Available"));
        book.issued = true;
        assert!(book.to_string().starts_with("ID: 7     | Title: Dune"));
        assert!(book.to_string().ends_with("Status: Issued"));
    }
}
