use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted (user, opportunity) match. Unique per pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Recommendation {
    pub recommendation_id: Uuid,
    pub user_id: Uuid,
    pub opportunity_id: Uuid,
    pub score: f64,
    pub reason: String,
    pub is_viewed: bool,
    pub created_at: NaiveDateTime,
}
