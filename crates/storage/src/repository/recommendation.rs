use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::recommendation::RecommendationResponse;
use crate::error::{Result, StorageError};
use crate::models::Recommendation;
use crate::traits::RecommendationStore;

pub struct RecommendationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecommendationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The user's recommendations joined with opportunity title and domain.
    pub async fn list_detailed(&self, user_id: Uuid) -> Result<Vec<RecommendationResponse>> {
        let recommendations = sqlx::query_as::<_, RecommendationResponse>(
            r#"
            SELECT r.recommendation_id, r.opportunity_id, o.title AS opportunity_title,
                   o.domain, r.score, r.reason, r.is_viewed
            FROM recommendations r
            INNER JOIN opportunities o ON o.opportunity_id = r.opportunity_id
            WHERE r.user_id = $1
            ORDER BY r.score DESC, r.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(recommendations)
    }
}

#[async_trait]
impl RecommendationStore for RecommendationRepository<'_> {
    async fn upsert_recommendation(
        &self,
        user_id: Uuid,
        opportunity_id: Uuid,
        score: f64,
        reason: &str,
    ) -> Result<Recommendation> {
        let recommendation = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (user_id, opportunity_id, score, reason)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, opportunity_id)
            DO UPDATE SET
                score = EXCLUDED.score,
                reason = EXCLUDED.reason
            RETURNING recommendation_id, user_id, opportunity_id, score, reason, is_viewed, created_at
            "#,
        )
        .bind(user_id)
        .bind(opportunity_id)
        .bind(score)
        .bind(reason)
        .fetch_one(self.pool)
        .await?;

        Ok(recommendation)
    }

    async fn prune_recommendations(&self, user_id: Uuid, keep: &[Uuid]) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM recommendations
            WHERE user_id = $1 AND NOT (opportunity_id = ANY($2))
            "#,
        )
        .bind(user_id)
        .bind(keep)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_recommendations(&self, user_id: Uuid) -> Result<Vec<Recommendation>> {
        let recommendations = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT recommendation_id, user_id, opportunity_id, score, reason, is_viewed, created_at
            FROM recommendations
            WHERE user_id = $1
            ORDER BY score DESC, created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(recommendations)
    }

    async fn mark_viewed(&self, user_id: Uuid, recommendation_id: Uuid) -> Result<Recommendation> {
        sqlx::query_as::<_, Recommendation>(
            r#"
            UPDATE recommendations
            SET is_viewed = TRUE
            WHERE recommendation_id = $1 AND user_id = $2
            RETURNING recommendation_id, user_id, opportunity_id, score, reason, is_viewed, created_at
            "#,
        )
        .bind(recommendation_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
