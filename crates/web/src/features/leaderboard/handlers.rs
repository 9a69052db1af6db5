use axum::{
    Json,
    extract::{Query, State},
};
use storage::{
    dto::leaderboard::{LeaderboardEntryResponse, LeaderboardQuery},
    services::RebuildSummary,
};

use crate::{error::WebResult, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Top entries of the requested view, best first", body = Vec<LeaderboardEntryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> WebResult<Json<Vec<LeaderboardEntryResponse>>> {
    let entries = services::get_leaderboard(&state, &query).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/leaderboard/rebuild",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Global and university leaderboards rebuilt", body = RebuildSummary),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "A dependency is temporarily unavailable")
    ),
    tag = "leaderboard"
)]
pub async fn rebuild_leaderboard(State(state): State<AppState>) -> WebResult<Json<RebuildSummary>> {
    let summary = services::rebuild(&state).await?;

    Ok(Json(summary))
}
