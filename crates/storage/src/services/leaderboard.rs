use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{GLOBAL_CATEGORY, LeaderboardPeriod, ScoreStanding};
use crate::services::composite::ScoreBreakdown;
use crate::traits::{LeaderboardStore, ScoreStore};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedStanding {
    pub user_id: Uuid,
    pub rank: i32,
    pub total_score: f64,
}

/// Dense 1..N ranks by total descending; equal totals are ordered by user id
/// ascending, so ties never share a rank.
pub fn assign_ranks(standings: &[ScoreStanding]) -> Vec<RankedStanding> {
    let mut ordered: Vec<&ScoreStanding> = standings.iter().collect();
    ordered.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    ordered
        .into_iter()
        .zip(1..)
        .map(|(standing, rank)| RankedStanding {
            user_id: standing.user_id,
            rank,
            total_score: standing.total_score,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RebuildSummary {
    pub ranked_users: usize,
    pub university_boards: usize,
}

/// Rebuilds persisted ranks and all-time leaderboard rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardRanker;

impl LeaderboardRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank every composite score globally, write the rank back onto the score
    /// and upsert the (global, all_time) entry. Zero users is a no-op.
    ///
    /// Not atomic as a whole: each row is written independently.
    pub async fn rebuild_global_leaderboard(
        &self,
        scores: &dyn ScoreStore,
        board: &dyn LeaderboardStore,
    ) -> Result<RebuildSummary> {
        let standings = scores.list_standings().await?;
        let ranked = self.write_global(&standings, scores, board).await?;

        info!("Rebuilt global leaderboard with {} users", ranked);
        Ok(RebuildSummary {
            ranked_users: ranked,
            university_boards: 0,
        })
    }

    /// Global rebuild plus one all_time view per university.
    ///
    /// Weekly and monthly views are not recomputed here.
    pub async fn rebuild_leaderboards(
        &self,
        scores: &dyn ScoreStore,
        board: &dyn LeaderboardStore,
    ) -> Result<RebuildSummary> {
        let standings = scores.list_standings().await?;
        let ranked = self.write_global(&standings, scores, board).await?;

        let mut by_university: BTreeMap<String, Vec<ScoreStanding>> = BTreeMap::new();
        for standing in &standings {
            let Some(university) = standing.university.as_deref().map(str::trim) else {
                continue;
            };
            if university.is_empty() {
                continue;
            }
            if university.eq_ignore_ascii_case(GLOBAL_CATEGORY) {
                warn!(
                    "User {} has university '{}' which collides with the global board, skipping",
                    standing.user_id, university
                );
                continue;
            }
            by_university
                .entry(university.to_string())
                .or_default()
                .push(standing.clone());
        }

        for (university, members) in &by_university {
            for entry in assign_ranks(members) {
                board
                    .upsert_entry(
                        entry.user_id,
                        university,
                        LeaderboardPeriod::AllTime,
                        entry.rank,
                        entry.total_score,
                    )
                    .await?;
            }

            // members who moved away would otherwise keep their old rank
            let keep: Vec<Uuid> = members.iter().map(|m| m.user_id).collect();
            board
                .prune_entries(university, LeaderboardPeriod::AllTime, &keep)
                .await?;
        }

        let boards: Vec<String> = by_university.keys().cloned().collect();
        let emptied = board
            .prune_categories(LeaderboardPeriod::AllTime, &boards)
            .await?;
        if emptied > 0 {
            debug!("Removed {} entries from university boards with no members", emptied);
        }

        info!(
            "Rebuilt leaderboards: {} users globally, {} university boards",
            ranked,
            by_university.len()
        );

        Ok(RebuildSummary {
            ranked_users: ranked,
            university_boards: by_university.len(),
        })
    }

    async fn write_global(
        &self,
        standings: &[ScoreStanding],
        scores: &dyn ScoreStore,
        board: &dyn LeaderboardStore,
    ) -> Result<usize> {
        let ranked = assign_ranks(standings);
        if ranked.is_empty() {
            return Ok(0);
        }

        for entry in &ranked {
            scores.set_rank(entry.user_id, entry.rank).await?;
            board
                .upsert_entry(
                    entry.user_id,
                    GLOBAL_CATEGORY,
                    LeaderboardPeriod::AllTime,
                    entry.rank,
                    entry.total_score,
                )
                .await?;
        }

        let keep: Vec<Uuid> = ranked.iter().map(|e| e.user_id).collect();
        board
            .prune_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, &keep)
            .await?;

        Ok(ranked.len())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub incoscore: f64,
    pub rank: i64,
    pub total_users: i64,
    pub percentile: f64,
    pub breakdown: ScoreBreakdown,
}

/// Share of users ranked below `rank`, in percent with one decimal.
pub fn percentile(rank: i64, total_users: i64) -> f64 {
    let share = 1.0 - rank as f64 / total_users.max(1) as f64;
    (share * 1000.0).round() / 10.0
}

/// Score, rank and percentile of one user. An unranked user is placed last.
pub async fn dashboard_stats(user_id: Uuid, scores: &dyn ScoreStore) -> Result<DashboardStats> {
    let score = scores.get_or_create_score(user_id).await?;
    let total_users = scores.count_users().await?;
    let rank = score.rank.map(i64::from).unwrap_or(total_users);

    Ok(DashboardStats {
        incoscore: score.total_score,
        rank,
        total_users,
        percentile: percentile(rank, total_users),
        breakdown: ScoreBreakdown::from(&score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::CompositeScore;

    fn standing(id: u128, total: f64) -> ScoreStanding {
        ScoreStanding {
            user_id: Uuid::from_u128(id),
            university: None,
            total_score: total,
        }
    }

    async fn seed(store: &MemoryStore, id: u128, university: Option<&str>, total: f64) {
        let user = Uuid::from_u128(id);
        store.put_user(user, university);
        let score = store.get_or_create_score(user).await.unwrap();
        store
            .save_score(&CompositeScore {
                total_score: total,
                ..score
            })
            .await
            .unwrap();
    }

    async fn ranks(store: &MemoryStore, category: &str) -> Vec<(u128, i32)> {
        store
            .list_entries(category, LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap()
            .iter()
            .map(|e| (e.user_id.as_u128(), e.rank))
            .collect()
    }

    #[test]
    fn ties_get_distinct_ranks_by_user_id() {
        let ranked = assign_ranks(&[standing(3, 70.0), standing(1, 90.0), standing(2, 70.0)]);
        let order: Vec<(u128, i32)> = ranked
            .iter()
            .map(|r| (r.user_id.as_u128(), r.rank))
            .collect();
        assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(assign_ranks(&[]).is_empty());
    }

    #[test]
    fn percentile_rounds_to_one_decimal() {
        assert_eq!(percentile(1, 3), 66.7);
        assert_eq!(percentile(3, 3), 0.0);
        assert_eq!(percentile(1, 0), 0.0);
    }

    #[tokio::test]
    async fn rebuild_persists_ranks_and_entries() {
        let store = MemoryStore::new();
        seed(&store, 3, None, 70.0).await;
        seed(&store, 1, None, 90.0).await;
        seed(&store, 2, None, 70.0).await;

        let ranker = LeaderboardRanker::new();
        let summary = ranker.rebuild_global_leaderboard(&store, &store).await.unwrap();
        assert_eq!(summary.ranked_users, 3);

        let entries = store
            .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();
        let ranks: Vec<(u128, i32)> = entries
            .iter()
            .map(|e| (e.user_id.as_u128(), e.rank))
            .collect();
        assert_eq!(ranks, vec![(1, 1), (2, 2), (3, 3)]);

        let third = store.get_or_create_score(Uuid::from_u128(3)).await.unwrap();
        assert_eq!(third.rank, Some(3));
    }

    #[tokio::test]
    async fn rebuild_is_idempotent() {
        let store = MemoryStore::new();
        seed(&store, 1, None, 10.0).await;
        seed(&store, 2, None, 20.0).await;

        let ranker = LeaderboardRanker::new();
        ranker.rebuild_global_leaderboard(&store, &store).await.unwrap();
        let first = store
            .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();
        ranker.rebuild_global_leaderboard(&store, &store).await.unwrap();
        let second = store
            .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();

        let view = |entries: &[crate::models::LeaderboardEntry]| -> Vec<(Uuid, Uuid, i32)> {
            entries.iter().map(|e| (e.entry_id, e.user_id, e.rank)).collect()
        };
        assert_eq!(view(&first), view(&second));
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn zero_users_is_a_no_op() {
        let store = MemoryStore::new();
        let summary = LeaderboardRanker::new()
            .rebuild_leaderboards(&store, &store)
            .await
            .unwrap();
        assert_eq!(summary, RebuildSummary::default());
    }

    #[tokio::test]
    async fn university_boards_rank_within_school() {
        let store = MemoryStore::new();
        seed(&store, 1, Some("MIT"), 50.0).await;
        seed(&store, 2, Some("Yale University"), 80.0).await;
        seed(&store, 3, Some("MIT"), 60.0).await;
        seed(&store, 4, None, 99.0).await;

        let summary = LeaderboardRanker::new()
            .rebuild_leaderboards(&store, &store)
            .await
            .unwrap();
        assert_eq!(summary.ranked_users, 4);
        assert_eq!(summary.university_boards, 2);

        let mit = store
            .list_entries("MIT", LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();
        let ranks: Vec<(u128, i32)> = mit.iter().map(|e| (e.user_id.as_u128(), e.rank)).collect();
        assert_eq!(ranks, vec![(3, 1), (1, 2)]);

        // global rank stays on the composite score
        let user_one = store.get_or_create_score(Uuid::from_u128(1)).await.unwrap();
        assert_eq!(user_one.rank, Some(4));
    }

    #[tokio::test]
    async fn moving_university_leaves_old_board_dense() {
        let store = MemoryStore::new();
        seed(&store, 1, Some("MIT"), 90.0).await;
        seed(&store, 2, Some("MIT"), 50.0).await;

        let ranker = LeaderboardRanker::new();
        ranker.rebuild_leaderboards(&store, &store).await.unwrap();

        store.put_user(Uuid::from_u128(1), Some("Yale University"));
        ranker.rebuild_leaderboards(&store, &store).await.unwrap();

        assert_eq!(ranks(&store, "MIT").await, vec![(2, 1)]);
        assert_eq!(ranks(&store, "Yale University").await, vec![(1, 1)]);
        assert_eq!(ranks(&store, GLOBAL_CATEGORY).await, vec![(1, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn board_without_members_is_dropped() {
        let store = MemoryStore::new();
        seed(&store, 1, Some("MIT"), 90.0).await;

        let ranker = LeaderboardRanker::new();
        ranker.rebuild_leaderboards(&store, &store).await.unwrap();

        store.put_user(Uuid::from_u128(1), None);
        let summary = ranker.rebuild_leaderboards(&store, &store).await.unwrap();
        assert_eq!(summary.university_boards, 0);

        let mit = store
            .list_entries("MIT", LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();
        assert!(mit.is_empty());
        let global = store
            .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, 100)
            .await
            .unwrap();
        assert_eq!(global.len(), 1);
    }

    #[tokio::test]
    async fn unranked_user_is_placed_last() {
        let store = MemoryStore::new();
        seed(&store, 1, None, 10.0).await;
        seed(&store, 2, None, 20.0).await;

        let stats = dashboard_stats(Uuid::from_u128(1), &store).await.unwrap();
        assert_eq!(stats.rank, 2);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.percentile, 0.0);

        LeaderboardRanker::new()
            .rebuild_global_leaderboard(&store, &store)
            .await
            .unwrap();
        let stats = dashboard_stats(Uuid::from_u128(2), &store).await.unwrap();
        assert_eq!(stats.rank, 1);
        assert_eq!(stats.percentile, 50.0);
    }
}
