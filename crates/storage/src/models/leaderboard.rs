use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::domain::LeaderboardPeriod;

pub const GLOBAL_CATEGORY: &str = "global";

/// Snapshot of a user's position in one (category, period) view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub entry_id: Uuid,
    pub user_id: Uuid,
    pub rank: i32,
    pub score: f64,
    pub category: String,
    #[sqlx(try_from = "String")]
    pub period: LeaderboardPeriod,
    pub created_at: NaiveDateTime,
}
