use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CompositeScore, ScoreStanding};
use crate::traits::ScoreStore;

const SCORE_COLUMNS: &str = r#"
    user_id, total_score, academic_score, application_score, community_score,
    match_quality_score, profile_score, match_quality_raw, rank, last_calculated
"#;

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for ScoreRepository<'_> {
    async fn get_or_create_score(&self, user_id: Uuid) -> Result<CompositeScore> {
        // DO UPDATE with a no-op assignment so RETURNING yields the existing row
        let query = format!(
            r#"
            INSERT INTO composite_scores (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING {SCORE_COLUMNS}
            "#
        );
        let score = sqlx::query_as::<_, CompositeScore>(&query)
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(score)
    }

    async fn save_score(&self, score: &CompositeScore) -> Result<CompositeScore> {
        let query = format!(
            r#"
            INSERT INTO composite_scores
                (user_id, total_score, academic_score, application_score, community_score,
                 match_quality_score, profile_score, match_quality_raw)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id)
            DO UPDATE SET
                total_score = EXCLUDED.total_score,
                academic_score = EXCLUDED.academic_score,
                application_score = EXCLUDED.application_score,
                community_score = EXCLUDED.community_score,
                match_quality_score = EXCLUDED.match_quality_score,
                profile_score = EXCLUDED.profile_score,
                match_quality_raw = EXCLUDED.match_quality_raw,
                last_calculated = CURRENT_TIMESTAMP
            RETURNING {SCORE_COLUMNS}
            "#
        );
        let saved = sqlx::query_as::<_, CompositeScore>(&query)
            .bind(score.user_id)
            .bind(score.total_score)
            .bind(score.academic_score)
            .bind(score.application_score)
            .bind(score.community_score)
            .bind(score.match_quality_score)
            .bind(score.profile_score)
            .bind(score.match_quality_raw)
            .fetch_one(self.pool)
            .await?;

        Ok(saved)
    }

    async fn set_match_quality(&self, user_id: Uuid, raw: f64) -> Result<CompositeScore> {
        let query = format!(
            r#"
            INSERT INTO composite_scores (user_id, match_quality_raw)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET match_quality_raw = EXCLUDED.match_quality_raw
            RETURNING {SCORE_COLUMNS}
            "#
        );
        let score = sqlx::query_as::<_, CompositeScore>(&query)
            .bind(user_id)
            .bind(raw)
            .fetch_one(self.pool)
            .await?;

        Ok(score)
    }

    async fn list_standings(&self) -> Result<Vec<ScoreStanding>> {
        let standings = sqlx::query_as::<_, ScoreStanding>(
            r#"
            SELECT cs.user_id, u.university, cs.total_score
            FROM composite_scores cs
            INNER JOIN users u ON u.user_id = cs.user_id
            ORDER BY cs.total_score DESC, cs.user_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(standings)
    }

    async fn set_rank(&self, user_id: Uuid, rank: i32) -> Result<()> {
        sqlx::query("UPDATE composite_scores SET rank = $1 WHERE user_id = $2")
            .bind(rank)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
