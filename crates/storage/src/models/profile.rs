use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Read-only projection of a student's profile used for scoring and matching.
///
/// `profile_completeness` is computed by the profile editor and is expected to
/// lie in `0..=100`; the engine does not re-derive or clamp it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentProfile {
    pub user_id: Uuid,
    pub gpa: Option<Decimal>,
    #[sqlx(json)]
    pub skills: Vec<String>,
    #[sqlx(json)]
    pub interests: Vec<String>,
    pub profile_completeness: i32,
}
