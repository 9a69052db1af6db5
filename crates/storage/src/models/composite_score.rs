use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Composite reputation score of a user.
///
/// The five sub-scores are stored already weight-scaled and `total_score` is
/// their sum. `match_quality_raw` is the unscaled signal supplied from outside
/// the aggregator; `match_quality_score` is derived from it on every
/// recalculation. `rank` stays `None` until the first leaderboard rebuild.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompositeScore {
    pub user_id: Uuid,
    pub total_score: f64,
    pub academic_score: f64,
    pub application_score: f64,
    pub community_score: f64,
    pub match_quality_score: f64,
    pub profile_score: f64,
    pub match_quality_raw: f64,
    pub rank: Option<i32>,
    pub last_calculated: NaiveDateTime,
}

/// One row of the ranking input: a user's current total and grouping key.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScoreStanding {
    pub user_id: Uuid,
    pub university: Option<String>,
    pub total_score: f64,
}
