use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::StudentProfile;
use crate::traits::ProfileStore;

pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository<'_> {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"
            SELECT user_id, gpa, skills, interests, profile_completeness
            FROM student_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }
}
