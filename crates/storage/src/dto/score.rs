use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::CompositeScore;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecalculateResponse {
    pub score: f64,
    pub details: CompositeScore,
}

/// Externally computed match quality, on the unscaled 0-100 range.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MatchQualityRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "match_quality must be between 0 and 100"))]
    pub match_quality: f64,
}
