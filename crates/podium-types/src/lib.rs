//! # podium-types
//!
//! Shared domain types for the podium workspace: projects, votes, scores,
//! and the address/time-filter value types used by every layer.

pub mod address;
pub mod filter;
pub mod project;
pub mod vote;

/// Milliseconds per day.
pub const MS_PER_DAY: u64 = 86_400_000;

/// Recency window for the `week` leaderboard filter (7 days).
pub const WEEK_WINDOW_MS: u64 = 7 * MS_PER_DAY;

/// Recency window for the `month` leaderboard filter (30 days).
pub const MONTH_WINDOW_MS: u64 = 30 * MS_PER_DAY;

#[cfg(test)]
mod tests {
    #[test]
    fn test_window_constants() {
        assert_eq!(super::WEEK_WINDOW_MS, 604_800_000);
        assert_eq!(super::MONTH_WINDOW_MS, 2_592_000_000);
    }

    #[test]
    #[ignore] // Run manually to generate bindings
    fn export_ts_bindings() {
        use ts_rs::TS;
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../bindings");
        std::fs::create_dir_all(&dir).expect("create bindings dir");
        crate::address::Address::export_all_to(&dir).expect("export");
        crate::filter::TimeFilter::export_all_to(&dir).expect("export");
        crate::project::Project::export_all_to(&dir).expect("export");
        crate::project::ProjectSummary::export_all_to(&dir).expect("export");
        crate::project::ProjectScore::export_all_to(&dir).expect("export");
        crate::vote::Vote::export_all_to(&dir).expect("export");
        crate::vote::VoteState::export_all_to(&dir).expect("export");
    }
}
