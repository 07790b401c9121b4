//! Book catalog operations over the shared library state.

use crate::error::{DuplicateId, RecordKind};
use crate::models::{Book, BookId, LibraryState};

/// Add a book to the catalog. The book starts out available. An existing
/// book with the same id is left untouched and the call fails.
pub fn add_book(
    state: &mut LibraryState,
    id: BookId,
    title: &str,
    author: &str,
) -> Result<(), DuplicateId> {
    if find_book(state, id).is_some() {
        return Err(DuplicateId {
            kind: RecordKind::Book,
            id,
        });
    }

    state.books.push(Book::new(id, title, author));
    Ok(())
}

/// Exact-id lookup.
pub fn find_book(state: &LibraryState, id: BookId) -> Option<&Book> {
    state.books.iter().find(|book| book.id == id)
}

/// Every book in the order it was added.
pub fn list_books(state: &LibraryState) -> &[Book] {
    &state.books
}
