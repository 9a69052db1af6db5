use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    dto::recommendation::{RecommendationResponse, RefreshRecommendationsResponse},
    models::Recommendation,
};
use uuid::Uuid;

use crate::{error::WebResult, state::AppState};

use super::services;

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/recommendations/refresh",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Recommendations regenerated, best match first", body = RefreshRecommendationsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "A dependency is temporarily unavailable")
    ),
    tag = "recommendations"
)]
pub async fn refresh_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> WebResult<Json<RefreshRecommendationsResponse>> {
    let recommendations = services::refresh_recommendations(&state, user_id).await?;

    Ok(Json(RefreshRecommendationsResponse::new(&recommendations)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/recommendations",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Stored recommendations by score", body = Vec<RecommendationResponse>)
    ),
    tag = "recommendations"
)]
pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> WebResult<Json<Vec<RecommendationResponse>>> {
    let recommendations = services::list_recommendations(&state, user_id).await?;

    Ok(Json(recommendations))
}

#[utoipa::path(
    patch,
    path = "/api/users/{user_id}/recommendations/{recommendation_id}/viewed",
    params(
        ("user_id" = Uuid, Path, description = "User id"),
        ("recommendation_id" = Uuid, Path, description = "Recommendation id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Recommendation marked viewed", body = Recommendation),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recommendation not found for this user")
    ),
    tag = "recommendations"
)]
pub async fn mark_viewed(
    State(state): State<AppState>,
    Path((user_id, recommendation_id)): Path<(Uuid, Uuid)>,
) -> WebResult<Json<Recommendation>> {
    let recommendation = services::mark_viewed(&state, user_id, recommendation_id).await?;

    Ok(Json(recommendation))
}
