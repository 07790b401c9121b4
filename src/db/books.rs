//! Queries against the `books` table.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Book;

/// Retrieve every book in the order it was catalogued.
pub(crate) fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT id, title, author, issued FROM books ORDER BY position")
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                issued: row.get(3)?,
            })
        })
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Write every book into a freshly created snapshot. The slice index becomes
/// the `position` column so the next load restores catalog order.
pub(crate) fn insert_books(conn: &Connection, books: &[Book]) -> Result<()> {
    let mut stmt = conn
        .prepare("INSERT INTO books (position, id, title, author, issued) VALUES (?1, ?2, ?3, ?4, ?5)")
        .context("failed to prepare book insert")?;

    for (position, book) in (0_i64..).zip(books) {
        stmt.execute(params![position, book.id, book.title, book.author, book.issued])
            .with_context(|| format!("failed to insert book {}", book.id))?;
    }

    Ok(())
}
