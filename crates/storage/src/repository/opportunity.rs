use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Domain, Opportunity, OpportunityStatus};
use crate::traits::OpportunityCatalog;

const OPPORTUNITY_COLUMNS: &str = r#"
    opportunity_id, title, description, university, domain, deadline,
    url, status, tags, stipend, created_at
"#;

/// A classified opportunity ready to be written by the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub university: String,
    pub domain: Domain,
    pub deadline: Option<NaiveDate>,
    pub url: String,
    pub status: OpportunityStatus,
    pub tags: Vec<String>,
    pub stipend: Option<String>,
}

pub struct OpportunityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OpportunityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_url(&self, url: &str) -> Result<Option<Opportunity>> {
        let query = format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE url = $1");
        let opportunity = sqlx::query_as::<_, Opportunity>(&query)
            .bind(url)
            .fetch_optional(self.pool)
            .await?;

        Ok(opportunity)
    }

    /// Insert unless an opportunity with the same URL exists.
    ///
    /// An existing row is returned untouched, so its domain is never
    /// re-derived. The flag is `true` when a row was created.
    pub async fn get_or_create(&self, new: &NewOpportunity) -> Result<(Opportunity, bool)> {
        let query = format!(
            r#"
            INSERT INTO opportunities
                (title, description, university, domain, deadline, url, status, tags, stipend)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (url) DO NOTHING
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let inserted = sqlx::query_as::<_, Opportunity>(&query)
            .bind(&new.title)
            .bind(&new.description)
            .bind(&new.university)
            .bind(new.domain.as_str())
            .bind(new.deadline)
            .bind(&new.url)
            .bind(new.status.as_str())
            .bind(sqlx::types::Json(&new.tags))
            .bind(&new.stipend)
            .fetch_optional(self.pool)
            .await?;

        match inserted {
            Some(opportunity) => Ok((opportunity, true)),
            None => {
                let existing = self
                    .find_by_url(&new.url)
                    .await?
                    .ok_or(StorageError::NotFound)?;
                Ok((existing, false))
            }
        }
    }
}

#[async_trait]
impl OpportunityCatalog for OpportunityRepository<'_> {
    async fn list_open(&self) -> Result<Vec<Opportunity>> {
        let query = format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE status = $1 \
             ORDER BY created_at DESC, opportunity_id"
        );
        let opportunities = sqlx::query_as::<_, Opportunity>(&query)
            .bind(OpportunityStatus::Open.as_str())
            .fetch_all(self.pool)
            .await?;

        Ok(opportunities)
    }

    async fn engaged_opportunity_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT opportunity_id FROM applications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
