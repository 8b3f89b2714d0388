//! Leaderboard recency filters.

use serde::{Deserialize, Serialize};

use crate::{MONTH_WINDOW_MS, WEEK_WINDOW_MS};

/// Recency window applied to vote counts in leaderboard computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    All,
    Week,
    Month,
}

impl TimeFilter {
    /// Window size in milliseconds. `None` means unrestricted.
    pub fn window_ms(self) -> Option<u64> {
        match self {
            TimeFilter::All => None,
            TimeFilter::Week => Some(WEEK_WINDOW_MS),
            TimeFilter::Month => Some(MONTH_WINDOW_MS),
        }
    }

    /// Lower bound on `voted_at` for a query issued at `now_ms`.
    /// `None` means no bound.
    pub fn cutoff_from(self, now_ms: u64) -> Option<u64> {
        self.window_ms().map(|w| now_ms.saturating_sub(w))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Week => "week",
            TimeFilter::Month => "month",
        }
    }
}

impl std::str::FromStr for TimeFilter {
    type Err = ParseTimeFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TimeFilter::All),
            "week" => Ok(TimeFilter::Week),
            "month" => Ok(TimeFilter::Month),
            other => Err(ParseTimeFilterError(other.to_string())),
        }
    }
}

impl std::fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized time-filter value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized time filter: {0:?} (expected all, week, or month)")]
pub struct ParseTimeFilterError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows() {
        assert_eq!(TimeFilter::All.window_ms(), None);
        assert_eq!(TimeFilter::Week.window_ms(), Some(7 * crate::MS_PER_DAY));
        assert_eq!(TimeFilter::Month.window_ms(), Some(30 * crate::MS_PER_DAY));
    }

    #[test]
    fn test_cutoff() {
        let now = 100 * crate::MS_PER_DAY;
        assert_eq!(TimeFilter::All.cutoff_from(now), None);
        assert_eq!(TimeFilter::Week.cutoff_from(now), Some(93 * crate::MS_PER_DAY));
        assert_eq!(TimeFilter::Month.cutoff_from(now), Some(70 * crate::MS_PER_DAY));
    }

    #[test]
    fn test_cutoff_saturates() {
        // A clock earlier than the window must not underflow.
        assert_eq!(TimeFilter::Month.cutoff_from(1000), Some(0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("all".parse(), Ok(TimeFilter::All));
        assert_eq!("week".parse(), Ok(TimeFilter::Week));
        assert_eq!("month".parse(), Ok(TimeFilter::Month));
    }

    #[test]
    fn test_unrecognized_rejected() {
        let result: Result<TimeFilter, _> = "year".parse();
        assert_eq!(result, Err(ParseTimeFilterError("year".to_string())));
    }
}
