use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    dto::score::{MatchQualityRequest, RecalculateResponse},
    models::CompositeScore,
    services::DashboardStats,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebResult, state::AppState};

use super::services;

#[utoipa::path(
    post,
    path = "/api/users/{user_id}/score/recalculate",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score recalculated and leaderboards rebuilt", body = RecalculateResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 503, description = "A dependency is temporarily unavailable")
    ),
    tag = "scores"
)]
pub async fn recalculate_score(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> WebResult<Json<RecalculateResponse>> {
    let details = services::recalculate_and_rank(&state, user_id).await?;

    Ok(Json(RecalculateResponse {
        score: details.total_score,
        details,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/score",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Current composite score", body = CompositeScore),
        (status = 404, description = "User not found")
    ),
    tag = "scores"
)]
pub async fn get_score(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> WebResult<Json<CompositeScore>> {
    let score = services::get_score(&state, user_id).await?;

    Ok(Json(score))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}/score/match-quality",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    request_body = MatchQualityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match quality stored", body = CompositeScore),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "scores"
)]
pub async fn set_match_quality(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<MatchQualityRequest>,
) -> WebResult<Json<CompositeScore>> {
    req.validate()?;

    let score = services::set_match_quality(&state, user_id, req.match_quality).await?;

    Ok(Json(score))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/dashboard",
    params(
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Score, rank and percentile", body = DashboardStats),
        (status = 404, description = "User not found")
    ),
    tag = "scores"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> WebResult<Json<DashboardStats>> {
    let stats = services::get_dashboard(&state, user_id).await?;

    Ok(Json(stats))
}
