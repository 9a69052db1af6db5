use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{GLOBAL_CATEGORY, LeaderboardEntry, LeaderboardPeriod};

pub const LEADERBOARD_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// `global` or a university name
    pub category: Option<String>,
    pub period: Option<LeaderboardPeriod>,
}

impl LeaderboardQuery {
    pub fn category(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => GLOBAL_CATEGORY,
        }
    }

    pub fn period(&self) -> LeaderboardPeriod {
        self.period.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    pub user_id: Uuid,
    pub rank: i32,
    pub score: f64,
    pub category: String,
    pub period: LeaderboardPeriod,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            rank: entry.rank,
            score: entry.score,
            category: entry.category,
            period: entry.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_global_all_time() {
        let query = LeaderboardQuery::default();
        assert_eq!(query.category(), "global");
        assert_eq!(query.period(), LeaderboardPeriod::AllTime);

        let blank = LeaderboardQuery {
            category: Some("  ".to_string()),
            period: Some(LeaderboardPeriod::Weekly),
        };
        assert_eq!(blank.category(), "global");
        assert_eq!(blank.period(), LeaderboardPeriod::Weekly);
    }
}
