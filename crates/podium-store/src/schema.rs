//! Table schema templates.
//!
//! The hosted service provisions these same shapes under its own names, so
//! the statements are rendered per deployment from the configured
//! identifiers rather than kept as fixed SQL constants.

use crate::tables::TableId;

/// Projects table: append-only from this workspace's viewpoint.
pub fn projects_table(name: &TableId) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            creator TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );"
    )
}

/// Votes table. The `(project_id, voter)` uniqueness constraint is the
/// one-vote-per-address invariant.
pub fn votes_table(name: &TableId) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            id INTEGER PRIMARY KEY,
            project_id INTEGER NOT NULL,
            voter TEXT NOT NULL,
            vote_type TEXT NOT NULL CHECK (vote_type IN ('up', 'down')),
            voted_at INTEGER NOT NULL,
            UNIQUE (project_id, voter)
        );"
    )
}

/// Secondary indexes for the votes table: the aggregation groups by
/// project and filters on recency.
pub fn votes_indexes(name: &TableId) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{name}_project ON {name}(project_id);
         CREATE INDEX IF NOT EXISTS idx_{name}_voted_at ON {name}(voted_at);"
    )
}
