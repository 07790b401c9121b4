//! Queries against the `loans` table, which holds only loans that are still
//! open. Returned books leave no row behind.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Loan;

/// Load active loans oldest first. Dates are stored as ISO `YYYY-MM-DD` text
/// through rusqlite's chrono support.
pub(crate) fn fetch_loans(conn: &Connection) -> Result<Vec<Loan>> {
    let mut stmt = conn
        .prepare(
            "SELECT book_id, member_id, issue_date, due_date
             FROM loans
             ORDER BY position",
        )
        .context("failed to prepare loan query")?;

    let loans = stmt
        .query_map([], |row| {
            Ok(Loan {
                book_id: row.get(0)?,
                member_id: row.get(1)?,
                issue_date: row.get(2)?,
                due_date: row.get(3)?,
            })
        })
        .context("failed to load loans")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect loans")?;

    Ok(loans)
}

/// Write every active loan into a freshly created snapshot. The table's
/// unique `book_id` column rejects a state holding two loans for one book,
/// which fails the whole save.
pub(crate) fn insert_loans(conn: &Connection, loans: &[Loan]) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO loans (position, book_id, member_id, issue_date, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .context("failed to prepare loan insert")?;

    for (position, loan) in (0_i64..).zip(loans) {
        stmt.execute(params![
            position,
            loan.book_id,
            loan.member_id,
            loan.issue_date,
            loan.due_date
        ])
        .with_context(|| format!("failed to insert loan for book {}", loan.book_id))?;
    }

    Ok(())
}
