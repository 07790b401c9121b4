//! Queries against the `members` table.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Member;

/// Retrieve every member in registration order.
pub(crate) fn fetch_members(conn: &Connection) -> Result<Vec<Member>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM members ORDER BY position")
        .context("failed to prepare member query")?;

    let members = stmt
        .query_map([], |row| {
            Ok(Member {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("failed to load members")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect members")?;

    Ok(members)
}

/// Write every member into a freshly created snapshot, keeping roster order
/// in the `position` column.
pub(crate) fn insert_members(conn: &Connection, members: &[Member]) -> Result<()> {
    let mut stmt = conn
        .prepare("INSERT INTO members (position, id, name) VALUES (?1, ?2, ?3)")
        .context("failed to prepare member insert")?;

    for (position, member) in (0_i64..).zip(members) {
        stmt.execute(params![position, member.id, member.name])
            .with_context(|| format!("failed to insert member {}", member.id))?;
    }

    Ok(())
}
