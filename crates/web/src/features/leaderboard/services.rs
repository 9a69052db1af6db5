use storage::{
    dto::leaderboard::{LEADERBOARD_LIMIT, LeaderboardEntryResponse, LeaderboardQuery},
    error::Result,
    repository::{leaderboard::LeaderboardRepository, score::ScoreRepository},
    services::RebuildSummary,
    traits::LeaderboardStore,
};

use crate::state::AppState;

pub async fn get_leaderboard(
    state: &AppState,
    query: &LeaderboardQuery,
) -> Result<Vec<LeaderboardEntryResponse>> {
    let entries = LeaderboardRepository::new(state.db.pool())
        .list_entries(query.category(), query.period(), LEADERBOARD_LIMIT)
        .await?;

    Ok(entries
        .into_iter()
        .map(LeaderboardEntryResponse::from)
        .collect())
}

pub async fn rebuild(state: &AppState) -> Result<RebuildSummary> {
    let pool = state.db.pool();

    state
        .ranker
        .rebuild_leaderboards(&ScoreRepository::new(pool), &LeaderboardRepository::new(pool))
        .await
}
