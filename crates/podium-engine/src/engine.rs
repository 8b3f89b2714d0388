//! Engine operations.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use podium_store::queries::{leaderboard, projects, votes};
use podium_store::tables::TablesConfig;
use podium_types::address::Address;
use podium_types::filter::TimeFilter;
use podium_types::project::{Project, ProjectScore, ProjectSummary};
use podium_types::vote::{Vote, VoteState, VoteType};

use crate::guard::PendingVotes;
use crate::{EngineError, Result};

/// The scoring engine.
///
/// Holds the injected store connection and table configuration; every view
/// the voting surfaces need (leaderboard, project list, vote buttons) reads
/// and writes through here, so they cannot drift apart on the counting or
/// state-reconciliation rules.
pub struct Engine {
    db: Arc<Mutex<Connection>>,
    tables: TablesConfig,
    pending: PendingVotes,
}

impl Engine {
    pub fn new(db: Arc<Mutex<Connection>>, tables: TablesConfig) -> Self {
        Self {
            db,
            tables,
            pending: PendingVotes::new(),
        }
    }

    /// Ranked leaderboard for the given recency window.
    ///
    /// Read-only. Rank is the 1-based position in the returned order,
    /// strictly sequential even on exact ties. A store failure surfaces as
    /// the error itself, so callers can distinguish it from a genuinely
    /// empty result.
    pub async fn leaderboard(&self, filter: TimeFilter) -> Result<Vec<ProjectScore>> {
        let cutoff = filter.cutoff_from(now_ms());
        let db = self.db.lock().await;
        let rows = leaderboard::score_rows(&db, &self.tables, cutoff)?;
        drop(db);

        debug!("leaderboard: {} projects, filter {filter}", rows.len());
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| ProjectScore {
                id: row.id,
                name: row.name,
                description: row.description,
                creator: row.creator,
                created_at: row.created_at,
                upvotes: row.upvotes,
                downvotes: row.downvotes,
                score: row.score,
                rank: i as u32 + 1,
            })
            .collect())
    }

    /// All projects with their all-time vote totals, in insertion order.
    ///
    /// Derived from the same aggregation as the leaderboard.
    pub async fn project_summaries(&self) -> Result<Vec<ProjectSummary>> {
        let db = self.db.lock().await;
        let mut rows = leaderboard::score_rows(&db, &self.tables, None)?;
        drop(db);

        rows.sort_by_key(|row| row.id);
        Ok(rows
            .into_iter()
            .map(|row| ProjectSummary {
                id: row.id,
                name: row.name,
                description: row.description,
                creator: row.creator,
                created_at: row.created_at,
                upvotes: row.upvotes,
                downvotes: row.downvotes,
            })
            .collect())
    }

    /// Create a project. Returns the store-assigned id.
    ///
    /// Name and description must be non-empty after trimming; rejected
    /// before any store request otherwise.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        creator: &Address,
    ) -> Result<i64> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "project name must not be empty".to_string(),
            ));
        }
        if description.is_empty() {
            return Err(EngineError::InvalidInput(
                "project description must not be empty".to_string(),
            ));
        }

        let db = self.db.lock().await;
        let id = projects::insert(&db, &self.tables, name, description, creator, now_ms())?;
        info!("created project {id}: {name}");
        Ok(id)
    }

    /// Get a project by id.
    pub async fn project(&self, project_id: i64) -> Result<Project> {
        let db = self.db.lock().await;
        Ok(projects::get(&db, &self.tables, project_id)?)
    }

    /// A voter's standing on a project.
    ///
    /// The uniqueness constraint allows at most one matching row, but the
    /// engine does not assume the store enforces it: more than one row is a
    /// data-integrity error, not a value to pick from.
    pub async fn vote_state(&self, project_id: i64, voter: &Address) -> Result<VoteState> {
        let db = self.db.lock().await;
        let rows = votes::state_rows(&db, &self.tables, project_id, voter)?;
        drop(db);

        match rows.as_slice() {
            [] => Ok(VoteState::NoVote),
            [vote_type] => Ok(VoteState::from_vote(*vote_type)),
            many => {
                warn!(
                    "integrity violation: {} vote rows for project {project_id} by {voter}",
                    many.len()
                );
                Err(EngineError::IntegrityViolation {
                    project_id,
                    voter: voter.to_string(),
                    rows: many.len(),
                })
            }
        }
    }

    /// Cast a vote: `NoVote -> VotedUp | VotedDown`.
    ///
    /// The creator guard runs before any write. The caller is expected to
    /// have checked `vote_state` first; the engine does not re-check beyond
    /// the store's uniqueness constraint, which surfaces a stale cast as
    /// [`EngineError::DuplicateVote`].
    pub async fn cast_vote(
        &self,
        project_id: i64,
        voter: &Address,
        vote_type: VoteType,
    ) -> Result<()> {
        let _guard = self.pending.begin(project_id, voter)?;
        self.ensure_not_creator(project_id, voter).await?;

        let db = self.db.lock().await;
        votes::insert(&db, &self.tables, project_id, voter, vote_type, now_ms())?;
        info!("recorded {vote_type} vote for project {project_id} by {voter}");
        Ok(())
    }

    /// Revoke a vote: `VotedUp | VotedDown -> NoVote`.
    ///
    /// Deletes by the pair, never by vote id. Revoking when no vote exists
    /// is a no-op, so the operation is idempotent.
    pub async fn revoke_vote(&self, project_id: i64, voter: &Address) -> Result<()> {
        let _guard = self.pending.begin(project_id, voter)?;

        let db = self.db.lock().await;
        let removed = votes::delete(&db, &self.tables, project_id, voter)?;
        drop(db);

        if removed > 0 {
            info!("revoked vote for project {project_id} by {voter}");
        }
        Ok(())
    }

    /// Flip a vote: `VotedUp <-> VotedDown`, in one atomic store
    /// transaction.
    ///
    /// This is the only exposed path between the two voted states; there is
    /// no observable intermediate `NoVote`, and a failure leaves the prior
    /// vote in place.
    pub async fn replace_vote(
        &self,
        project_id: i64,
        voter: &Address,
        vote_type: VoteType,
    ) -> Result<()> {
        let _guard = self.pending.begin(project_id, voter)?;
        self.ensure_not_creator(project_id, voter).await?;

        let mut db = self.db.lock().await;
        votes::replace(&mut db, &self.tables, project_id, voter, vote_type, now_ms())?;
        info!("replaced vote with {vote_type} for project {project_id} by {voter}");
        Ok(())
    }

    /// All vote rows, for inspection views.
    pub async fn votes(&self) -> Result<Vec<Vote>> {
        let db = self.db.lock().await;
        Ok(votes::list(&db, &self.tables)?)
    }

    /// Self-vote guard. Addresses are lowercase-normalized at construction,
    /// so plain equality is the required case-insensitive comparison.
    async fn ensure_not_creator(&self, project_id: i64, voter: &Address) -> Result<()> {
        let project = self.project(project_id).await?;
        if project.creator == *voter {
            return Err(EngineError::SelfVote);
        }
        Ok(())
    }
}

/// Current time in epoch milliseconds.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
