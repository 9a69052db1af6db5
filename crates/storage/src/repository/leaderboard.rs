use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{GLOBAL_CATEGORY, LeaderboardEntry, LeaderboardPeriod};
use crate::traits::LeaderboardStore;

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardStore for LeaderboardRepository<'_> {
    async fn upsert_entry(
        &self,
        user_id: Uuid,
        category: &str,
        period: LeaderboardPeriod,
        rank: i32,
        score: f64,
    ) -> Result<LeaderboardEntry> {
        let entry = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            INSERT INTO leaderboard_entries (user_id, category, period, rank, score)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, category, period)
            DO UPDATE SET
                rank = EXCLUDED.rank,
                score = EXCLUDED.score
            RETURNING entry_id, user_id, rank, score, category, period, created_at
            "#,
        )
        .bind(user_id)
        .bind(category)
        .bind(period.as_str())
        .bind(rank)
        .bind(score)
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT entry_id, user_id, rank, score, category, period, created_at
            FROM leaderboard_entries
            WHERE category = $1 AND period = $2
            ORDER BY rank
            LIMIT $3
            "#,
        )
        .bind(category)
        .bind(period.as_str())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    async fn prune_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        keep: &[Uuid],
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM leaderboard_entries
            WHERE category = $1 AND period = $2 AND NOT (user_id = ANY($3))
            "#,
        )
        .bind(category)
        .bind(period.as_str())
        .bind(keep)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn prune_categories(&self, period: LeaderboardPeriod, keep: &[String]) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM leaderboard_entries
            WHERE period = $1 AND category <> $2 AND NOT (category = ANY($3))
            "#,
        )
        .bind(period.as_str())
        .bind(GLOBAL_CATEGORY)
        .bind(keep)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
