//! Project structures.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A project row as stored. Immutable after creation.
#[derive(Clone, Debug, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub creator: Address,
    /// Epoch milliseconds.
    pub created_at: u64,
}

/// A project with its all-time vote totals, for plain listing views.
#[derive(Clone, Debug, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub creator: Address,
    pub created_at: u64,
    pub upvotes: u64,
    pub downvotes: u64,
}

/// A ranked leaderboard entry. Derived, never persisted; recomputed in full
/// on every leaderboard read.
#[derive(Clone, Debug, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct ProjectScore {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub creator: Address,
    pub created_at: u64,
    /// Upvote count within the active time window.
    pub upvotes: u64,
    /// Downvote count within the active time window.
    pub downvotes: u64,
    /// `upvotes - downvotes`.
    pub score: i64,
    /// 1-based position after sorting. Strictly sequential; exact ties do
    /// not share a rank.
    pub rank: u32,
}
