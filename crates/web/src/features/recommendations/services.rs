use storage::{
    dto::recommendation::RecommendationResponse,
    error::Result,
    models::Recommendation,
    repository::{
        opportunity::OpportunityRepository, profile::ProfileRepository,
        recommendation::RecommendationRepository,
    },
    traits::RecommendationStore,
};
use uuid::Uuid;

use crate::state::AppState;

pub async fn refresh_recommendations(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<Recommendation>> {
    let pool = state.db.pool();

    state
        .matcher
        .generate_recommendations(
            user_id,
            &ProfileRepository::new(pool),
            &OpportunityRepository::new(pool),
            &RecommendationRepository::new(pool),
        )
        .await
}

pub async fn list_recommendations(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<RecommendationResponse>> {
    RecommendationRepository::new(state.db.pool())
        .list_detailed(user_id)
        .await
}

pub async fn mark_viewed(
    state: &AppState,
    user_id: Uuid,
    recommendation_id: Uuid,
) -> Result<Recommendation> {
    RecommendationRepository::new(state.db.pool())
        .mark_viewed(user_id, recommendation_id)
        .await
}
