use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::ActivityCounts;
use crate::traits::ActivityCounters;

pub struct ActivityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ActivityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityCounters for ActivityRepository<'_> {
    async fn activity_counts(&self, user_id: Uuid) -> Result<ActivityCounts> {
        let counts = sqlx::query_as::<_, ActivityCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM applications
                 WHERE user_id = $1 AND status = 'submitted') AS submitted_applications,
                (SELECT COUNT(*) FROM posts WHERE author_id = $1) AS posts,
                (SELECT COUNT(*) FROM comments WHERE author_id = $1) AS comments
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }
}
