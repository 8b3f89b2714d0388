//! Idempotent table provisioning.
//!
//! Hosted deployments get their tables from the external service; the
//! embedded store creates them here. Forward-only, versioned via
//! `PRAGMA user_version`.

use rusqlite::Connection;

use crate::tables::TablesConfig;
use crate::{schema, Result, StoreError, SCHEMA_VERSION};

/// Create the configured tables if this store is fresh.
pub fn run(conn: &Connection, tables: &TablesConfig) -> Result<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(StoreError::Sqlite)?;

    if current == 0 {
        tracing::info!(
            "Provisioning tables v{SCHEMA_VERSION}: {}, {}",
            tables.projects,
            tables.votes
        );
        conn.execute_batch(&schema::projects_table(&tables.projects))?;
        conn.execute_batch(&schema::votes_table(&tables.votes))?;
        conn.execute_batch(&schema::votes_indexes(&tables.votes))?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(StoreError::Sqlite)?;
    } else if current > SCHEMA_VERSION {
        return Err(StoreError::Provision(format!(
            "store version {current} is newer than supported {SCHEMA_VERSION}"
        )));
    }

    Ok(())
}
