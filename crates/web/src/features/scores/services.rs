use storage::{
    error::Result,
    models::CompositeScore,
    repository::{
        activity::ActivityRepository, leaderboard::LeaderboardRepository,
        profile::ProfileRepository, score::ScoreRepository,
    },
    services::{DashboardStats, dashboard_stats},
    traits::ScoreStore,
};
use uuid::Uuid;

use crate::state::AppState;

/// Recompute the user's composite score, then rebuild the leaderboards so
/// the returned record carries a fresh rank.
pub async fn recalculate_and_rank(state: &AppState, user_id: Uuid) -> Result<CompositeScore> {
    let pool = state.db.pool();
    let scores = ScoreRepository::new(pool);

    state
        .aggregator
        .recalculate(
            user_id,
            &ProfileRepository::new(pool),
            &ActivityRepository::new(pool),
            &scores,
        )
        .await?;

    state
        .ranker
        .rebuild_leaderboards(&scores, &LeaderboardRepository::new(pool))
        .await?;

    scores.get_or_create_score(user_id).await
}

pub async fn get_score(state: &AppState, user_id: Uuid) -> Result<CompositeScore> {
    ScoreRepository::new(state.db.pool())
        .get_or_create_score(user_id)
        .await
}

/// Store a new raw match quality. It is folded into the total on the next
/// recalculation.
pub async fn set_match_quality(
    state: &AppState,
    user_id: Uuid,
    match_quality: f64,
) -> Result<CompositeScore> {
    ScoreRepository::new(state.db.pool())
        .set_match_quality(user_id, match_quality)
        .await
}

pub async fn get_dashboard(state: &AppState, user_id: Uuid) -> Result<DashboardStats> {
    dashboard_stats(user_id, &ScoreRepository::new(state.db.pool())).await
}
