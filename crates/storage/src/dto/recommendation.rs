use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Domain, Recommendation};

/// One ranked recommendation as returned to the trigger surface.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecommendationResponse {
    pub recommendation_id: Uuid,
    pub opportunity_id: Uuid,
    pub opportunity_title: String,
    #[sqlx(try_from = "String")]
    pub domain: Domain,
    pub score: f64,
    pub reason: String,
    pub is_viewed: bool,
}

/// Result of a recommendations refresh, best match first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshRecommendationsResponse {
    pub count: usize,
    pub message: String,
    pub recommendations: Vec<RecommendationSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecommendationSummary {
    pub recommendation_id: Uuid,
    pub opportunity_id: Uuid,
    pub score: f64,
    pub reason: String,
}

impl From<&Recommendation> for RecommendationSummary {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            recommendation_id: recommendation.recommendation_id,
            opportunity_id: recommendation.opportunity_id,
            score: recommendation.score,
            reason: recommendation.reason.clone(),
        }
    }
}

impl RefreshRecommendationsResponse {
    pub fn new(recommendations: &[Recommendation]) -> Self {
        Self {
            count: recommendations.len(),
            message: format!("Generated {} recommendations for you.", recommendations.len()),
            recommendations: recommendations.iter().map(RecommendationSummary::from).collect(),
        }
    }
}
