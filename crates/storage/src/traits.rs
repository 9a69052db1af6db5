//! Collaborator seams of the scoring engine.
//!
//! The engine never talks to a database directly; it reads and writes through
//! these traits. The Postgres repositories implement them for production and
//! `MemoryStore` (behind the `test-util` feature) implements them for tests.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    ActivityCounts, CompositeScore, LeaderboardEntry, LeaderboardPeriod, Opportunity,
    Recommendation, ScoreStanding, StudentProfile,
};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when the user never created a profile.
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>>;
}

#[async_trait]
pub trait OpportunityCatalog: Send + Sync {
    /// Open opportunities in catalog order. The order is the matcher's tie-break.
    async fn list_open(&self) -> Result<Vec<Opportunity>>;

    /// Opportunities the user has an application against, whatever its status.
    async fn engaged_opportunity_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;
}

#[async_trait]
pub trait ActivityCounters: Send + Sync {
    async fn activity_counts(&self, user_id: Uuid) -> Result<ActivityCounts>;
}

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Insert or overwrite score and reason of the (user, opportunity) pair.
    /// `is_viewed` of an existing row is left untouched.
    async fn upsert_recommendation(
        &self,
        user_id: Uuid,
        opportunity_id: Uuid,
        score: f64,
        reason: &str,
    ) -> Result<Recommendation>;

    /// Delete the user's recommendations whose opportunity is not in `keep`.
    async fn prune_recommendations(&self, user_id: Uuid, keep: &[Uuid]) -> Result<u64>;

    /// The user's recommendations, score descending.
    async fn list_recommendations(&self, user_id: Uuid) -> Result<Vec<Recommendation>>;

    /// Fails with `NotFound` unless the recommendation belongs to the user.
    async fn mark_viewed(&self, user_id: Uuid, recommendation_id: Uuid) -> Result<Recommendation>;
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn get_or_create_score(&self, user_id: Uuid) -> Result<CompositeScore>;

    /// Persist the sub-scores and total. Does not touch `rank`.
    async fn save_score(&self, score: &CompositeScore) -> Result<CompositeScore>;

    async fn set_match_quality(&self, user_id: Uuid, raw: f64) -> Result<CompositeScore>;

    async fn list_standings(&self) -> Result<Vec<ScoreStanding>>;

    async fn set_rank(&self, user_id: Uuid, rank: i32) -> Result<()>;

    async fn count_users(&self) -> Result<i64>;
}

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn upsert_entry(
        &self,
        user_id: Uuid,
        category: &str,
        period: LeaderboardPeriod,
        rank: i32,
        score: f64,
    ) -> Result<LeaderboardEntry>;

    /// Entries of one view ordered by rank, at most `limit` rows.
    async fn list_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>>;

    /// Delete rows of one view whose user is not in `keep`.
    async fn prune_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        keep: &[Uuid],
    ) -> Result<u64>;

    /// Delete rows of `period` in every non-global category missing from `keep`.
    async fn prune_categories(&self, period: LeaderboardPeriod, keep: &[String]) -> Result<u64>;
}
