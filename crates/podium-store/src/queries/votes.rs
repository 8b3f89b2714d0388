//! Vote query functions.

use rusqlite::Connection;

use podium_types::address::Address;
use podium_types::vote::{Vote, VoteType};

use crate::tables::TablesConfig;
use crate::{Result, StoreError};

/// All vote types recorded for a `(project_id, voter)` pair.
///
/// Returns every matching row rather than the first one: the uniqueness
/// constraint should make a second row impossible, but callers treat a
/// multi-row result as a data-integrity anomaly instead of assuming it
/// cannot happen.
pub fn state_rows(
    conn: &Connection,
    tables: &TablesConfig,
    project_id: i64,
    voter: &Address,
) -> Result<Vec<VoteType>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT vote_type FROM {} WHERE project_id = ?1 AND voter = ?2",
        tables.votes
    ))?;

    let rows = stmt
        .query_map(
            rusqlite::params![project_id, voter.as_str()],
            |row| crate::queries::vote_type_col(row, 0),
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Insert a vote. Returns the store-assigned id.
///
/// A second vote for the same pair violates the `(project_id, voter)`
/// uniqueness constraint and surfaces as [`StoreError::DuplicateVote`].
pub fn insert(
    conn: &Connection,
    tables: &TablesConfig,
    project_id: i64,
    voter: &Address,
    vote_type: VoteType,
    voted_at: u64,
) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} (project_id, voter, vote_type, voted_at)
             VALUES (?1, ?2, ?3, ?4)",
            tables.votes
        ),
        rusqlite::params![
            project_id,
            voter.as_str(),
            vote_type.as_str(),
            voted_at as i64,
        ],
    )
    .map_err(|e| duplicate_or_sqlite(e, project_id, voter))?;
    Ok(conn.last_insert_rowid())
}

/// Delete a pair's vote. Returns the number of rows removed; zero is a
/// no-op, not an error, which makes revocation idempotent.
///
/// Deletion is always by the pair, never by vote id.
pub fn delete(
    conn: &Connection,
    tables: &TablesConfig,
    project_id: i64,
    voter: &Address,
) -> Result<usize> {
    let removed = conn.execute(
        &format!(
            "DELETE FROM {} WHERE project_id = ?1 AND voter = ?2",
            tables.votes
        ),
        rusqlite::params![project_id, voter.as_str()],
    )?;
    Ok(removed)
}

/// Atomically replace a pair's vote: delete then insert inside one
/// transaction, so a failure rolls back to the prior state and no
/// intermediate no-vote window is ever observable.
pub fn replace(
    conn: &mut Connection,
    tables: &TablesConfig,
    project_id: i64,
    voter: &Address,
    vote_type: VoteType,
    voted_at: u64,
) -> Result<i64> {
    let tx = conn.transaction()?;
    tx.execute(
        &format!(
            "DELETE FROM {} WHERE project_id = ?1 AND voter = ?2",
            tables.votes
        ),
        rusqlite::params![project_id, voter.as_str()],
    )?;
    tx.execute(
        &format!(
            "INSERT INTO {} (project_id, voter, vote_type, voted_at)
             VALUES (?1, ?2, ?3, ?4)",
            tables.votes
        ),
        rusqlite::params![
            project_id,
            voter.as_str(),
            vote_type.as_str(),
            voted_at as i64,
        ],
    )
    .map_err(|e| duplicate_or_sqlite(e, project_id, voter))?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

/// List all votes in insertion order.
pub fn list(conn: &Connection, tables: &TablesConfig) -> Result<Vec<Vote>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, project_id, voter, vote_type, voted_at
         FROM {} ORDER BY id",
        tables.votes
    ))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Vote {
                id: row.get(0)?,
                project_id: row.get(1)?,
                voter: crate::queries::address_col(row, 2)?,
                vote_type: crate::queries::vote_type_col(row, 3)?,
                voted_at: row.get::<_, i64>(4)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Map a uniqueness violation to the dedicated duplicate-vote error so
/// callers can resynchronize cached state instead of retrying blindly.
fn duplicate_or_sqlite(e: rusqlite::Error, project_id: i64, voter: &Address) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::DuplicateVote {
                project_id,
                voter: voter.to_string(),
            }
        }
        other => StoreError::Sqlite(other),
    }
}
