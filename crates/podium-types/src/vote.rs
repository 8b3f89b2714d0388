//! Vote structures.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A vote row as stored: one per `(project_id, voter)` pair.
#[derive(Clone, Debug, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct Vote {
    pub id: i64,
    pub project_id: i64,
    pub voter: Address,
    pub vote_type: VoteType,
    /// Epoch milliseconds.
    pub voted_at: u64,
}

/// Direction of a vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// Stored text representation (`up` / `down`).
    pub fn as_str(self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }
}

impl std::str::FromStr for VoteType {
    type Err = ParseVoteTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteType::Up),
            "down" => Ok(VoteType::Down),
            other => Err(ParseVoteTypeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized vote-type value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized vote type: {0:?} (expected up or down)")]
pub struct ParseVoteTypeError(pub String);

/// A voter's standing on one project.
///
/// The per-voter, per-project state machine: `NoVote -> VotedUp | VotedDown`
/// via cast, back to `NoVote` via revoke. A direct flip between the voted
/// states goes through the atomic replace operation, never through an
/// exposed delete-then-insert pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VoteState {
    NoVote,
    VotedUp,
    VotedDown,
}

impl VoteState {
    pub fn from_vote(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Up => VoteState::VotedUp,
            VoteType::Down => VoteState::VotedDown,
        }
    }

    /// The vote behind this state, if any.
    pub fn vote_type(self) -> Option<VoteType> {
        match self {
            VoteState::NoVote => None,
            VoteState::VotedUp => Some(VoteType::Up),
            VoteState::VotedDown => Some(VoteType::Down),
        }
    }

    /// Whether a cast transition is legal from this state.
    pub fn can_cast(self) -> bool {
        self == VoteState::NoVote
    }
}
