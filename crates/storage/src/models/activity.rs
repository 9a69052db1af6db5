use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Activity counters feeding the composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityCounts {
    pub submitted_applications: i64,
    pub posts: i64,
    pub comments: i64,
}
