//! The scoring aggregation.
//!
//! One query is the source of truth for every vote-count view: the ranked
//! leaderboard and the plain project list both read from it, so the two can
//! never disagree on a count.

use rusqlite::Connection;

use podium_types::address::Address;

use crate::tables::TablesConfig;
use crate::Result;

/// One unranked row of the scoring aggregation.
#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub creator: Address,
    pub created_at: u64,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
}

/// Compute per-project vote aggregates, optionally restricted to votes cast
/// strictly after `since` (epoch milliseconds).
///
/// Up and down counts are grouped per project and LEFT JOINed onto every
/// project row, null-coalesced to zero, so projects with no votes appear
/// with zero counts rather than going missing. Rows come back in
/// leaderboard order: score descending, then upvotes, then recency, with
/// `id` as the final deterministic tiebreak.
pub fn score_rows(
    conn: &Connection,
    tables: &TablesConfig,
    since: Option<u64>,
) -> Result<Vec<ScoreRow>> {
    let sql = format!(
        "SELECT p.id, p.name, p.description, p.creator, p.created_at,
                COALESCE(up.n, 0) AS upvotes,
                COALESCE(down.n, 0) AS downvotes,
                COALESCE(up.n, 0) - COALESCE(down.n, 0) AS score
         FROM {projects} p
         LEFT JOIN (
             SELECT project_id, COUNT(*) AS n
             FROM {votes}
             WHERE vote_type = 'up' AND (?1 IS NULL OR voted_at > ?1)
             GROUP BY project_id
         ) up ON p.id = up.project_id
         LEFT JOIN (
             SELECT project_id, COUNT(*) AS n
             FROM {votes}
             WHERE vote_type = 'down' AND (?1 IS NULL OR voted_at > ?1)
             GROUP BY project_id
         ) down ON p.id = down.project_id
         ORDER BY score DESC, upvotes DESC, p.created_at DESC, p.id DESC",
        projects = tables.projects,
        votes = tables.votes,
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([since.map(|s| s as i64)], |row| {
            Ok(ScoreRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                creator: crate::queries::address_col(row, 3)?,
                created_at: row.get::<_, i64>(4)? as u64,
                upvotes: row.get::<_, i64>(5)? as u64,
                downvotes: row.get::<_, i64>(6)? as u64,
                score: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{projects, votes};
    use podium_types::vote::VoteType;

    fn test_db() -> (Connection, TablesConfig) {
        let tables = TablesConfig::default();
        let conn = crate::open_memory(&tables).expect("open test store");
        (conn, tables)
    }

    fn addr(last: &str) -> Address {
        Address::parse(&format!("0x{:0>40}", last)).expect("test address")
    }

    #[test]
    fn test_project_without_votes_has_zero_counts() {
        let (conn, tables) = test_db();
        projects::insert(&conn, &tables, "Quiet", "no votes yet", &addr("a1"), 100)
            .expect("insert");

        let rows = score_rows(&conn, &tables, None).expect("scores");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].upvotes, 0);
        assert_eq!(rows[0].downvotes, 0);
        assert_eq!(rows[0].score, 0);
    }

    #[test]
    fn test_counts_and_score() {
        let (conn, tables) = test_db();
        let p = projects::insert(&conn, &tables, "P", "d", &addr("a1"), 100).expect("insert");

        votes::insert(&conn, &tables, p, &addr("b1"), VoteType::Up, 10).expect("vote");
        votes::insert(&conn, &tables, p, &addr("b2"), VoteType::Up, 20).expect("vote");
        votes::insert(&conn, &tables, p, &addr("b3"), VoteType::Down, 30).expect("vote");

        let rows = score_rows(&conn, &tables, None).expect("scores");
        assert_eq!(rows[0].upvotes, 2);
        assert_eq!(rows[0].downvotes, 1);
        assert_eq!(rows[0].score, 1);
    }

    #[test]
    fn test_since_excludes_older_votes() {
        let (conn, tables) = test_db();
        let p = projects::insert(&conn, &tables, "P", "d", &addr("a1"), 100).expect("insert");

        votes::insert(&conn, &tables, p, &addr("b1"), VoteType::Up, 1_000).expect("vote");
        votes::insert(&conn, &tables, p, &addr("b2"), VoteType::Up, 5_000).expect("vote");

        let rows = score_rows(&conn, &tables, Some(2_000)).expect("scores");
        assert_eq!(rows[0].upvotes, 1);

        // The bound is strict: a vote exactly at the cutoff is excluded.
        let rows = score_rows(&conn, &tables, Some(1_000)).expect("scores");
        assert_eq!(rows[0].upvotes, 1);
    }

    #[test]
    fn test_leaderboard_order() {
        let (conn, tables) = test_db();
        let low = projects::insert(&conn, &tables, "Low", "d", &addr("a1"), 100).expect("insert");
        let high = projects::insert(&conn, &tables, "High", "d", &addr("a2"), 200).expect("insert");

        votes::insert(&conn, &tables, high, &addr("b1"), VoteType::Up, 10).expect("vote");
        votes::insert(&conn, &tables, high, &addr("b2"), VoteType::Up, 20).expect("vote");
        votes::insert(&conn, &tables, low, &addr("b3"), VoteType::Down, 30).expect("vote");

        let rows = score_rows(&conn, &tables, None).expect("scores");
        assert_eq!(rows[0].id, high);
        assert_eq!(rows[1].id, low);
    }

    #[test]
    fn test_upvotes_break_score_ties() {
        let (conn, tables) = test_db();
        // Both projects score 0, but one has offsetting votes.
        let busy = projects::insert(&conn, &tables, "Busy", "d", &addr("a1"), 100).expect("insert");
        let quiet =
            projects::insert(&conn, &tables, "Quiet", "d", &addr("a2"), 200).expect("insert");

        votes::insert(&conn, &tables, busy, &addr("b1"), VoteType::Up, 10).expect("vote");
        votes::insert(&conn, &tables, busy, &addr("b2"), VoteType::Down, 20).expect("vote");

        let rows = score_rows(&conn, &tables, None).expect("scores");
        assert_eq!(rows[0].id, busy, "more upvotes wins at equal score");
        assert_eq!(rows[1].id, quiet);
    }

    #[test]
    fn test_full_tie_resolved_by_id() {
        let (conn, tables) = test_db();
        // Same score, same upvotes, same created_at: highest id first.
        let first = projects::insert(&conn, &tables, "First", "d", &addr("a1"), 100).expect("insert");
        let second =
            projects::insert(&conn, &tables, "Second", "d", &addr("a2"), 100).expect("insert");

        let rows = score_rows(&conn, &tables, None).expect("scores");
        assert_eq!(rows[0].id, second);
        assert_eq!(rows[1].id, first);
        assert!(first < second);
    }
}
