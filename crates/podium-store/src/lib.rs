//! # podium-store
//!
//! Store-interaction layer for the podium workspace: an embedded SQLite
//! stand-in for the hosted table service that holds the projects and votes
//! tables in production deployments.
//!
//! ## Conventions
//!
//! - Table names come from [`tables::TablesConfig`] and are validated
//!   identifiers; they are the only strings ever interpolated into SQL.
//!   Every data value is a bound parameter.
//! - All timestamps are epoch milliseconds (i64 in storage).
//! - The `(project_id, voter)` uniqueness constraint on the votes table is
//!   the cross-request consistency mechanism; a violated insert surfaces as
//!   [`StoreError::DuplicateVote`], never as a generic failure.

pub mod provision;
pub mod queries;
pub mod schema;
pub mod tables;

use std::path::Path;

use rusqlite::Connection;

use crate::tables::TablesConfig;

/// Current provisioning version.
pub const SCHEMA_VERSION: u32 = 1;

/// Store error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("provisioning failed: {0}")]
    Provision(String),

    #[error("duplicate vote for project {project_id} by {voter}")]
    DuplicateVote { project_id: i64, voter: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid table identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Open or create the store at the given path.
///
/// Configures pragmas and provisions the configured tables if absent.
pub fn open(path: &Path, tables: &TablesConfig) -> Result<Connection> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    provision::run(&conn, tables)?;
    Ok(conn)
}

/// Open an in-memory store (for testing).
pub fn open_memory(tables: &TablesConfig) -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    provision::run(&conn, tables)?;
    Ok(conn)
}

/// Configure SQLite pragmas.
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}
