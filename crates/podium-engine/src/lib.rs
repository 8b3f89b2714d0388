//! # podium-engine
//!
//! The scoring engine: leaderboard computation over the projects and votes
//! tables, vote-state reconciliation, and the vote-casting state machine
//! with its guards.
//!
//! ## Modules
//!
//! - [`engine`] — the operations: leaderboard, vote state, cast, revoke,
//!   replace, project creation and listing.
//! - [`guard`] — per-`(project, voter)` in-flight request guard.
//!
//! Store-facing failures never escape as raw transport errors; every
//! operation converts them to an [`EngineError`] at its boundary.

pub mod engine;
pub mod guard;

use podium_store::StoreError;

/// Error types for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The backing store could not be reached or a query failed. Never
    /// retried automatically; an empty result under this error is not
    /// "no projects".
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The `(project_id, voter)` uniqueness constraint rejected an insert.
    /// The caller's cached vote state is stale and must be refreshed.
    #[error("duplicate vote for project {project_id} by {voter}")]
    DuplicateVote { project_id: i64, voter: String },

    /// More than one vote row exists for a pair. Reported, never silently
    /// resolved.
    #[error("vote integrity violation: {rows} rows for project {project_id} by {voter}")]
    IntegrityViolation {
        project_id: i64,
        voter: String,
        rows: usize,
    },

    /// Rejected before any store request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The project creator attempted a vote on their own project.
    #[error("project creators cannot vote on their own project")]
    SelfVote,

    /// Another write for the same pair is still outstanding.
    #[error("a vote operation for project {project_id} by {voter} is already in flight")]
    OperationPending { project_id: i64, voter: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateVote { project_id, voter } => {
                EngineError::DuplicateVote { project_id, voter }
            }
            StoreError::NotFound(what) => EngineError::InvalidInput(format!("unknown {what}")),
            other => EngineError::StoreUnavailable(other.to_string()),
        }
    }
}
