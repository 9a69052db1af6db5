use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::domain::{Domain, OpportunityStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Opportunity {
    pub opportunity_id: Uuid,
    pub title: String,
    pub description: String,
    pub university: String,
    #[sqlx(try_from = "String")]
    pub domain: Domain,
    pub deadline: Option<NaiveDate>,
    pub url: String,
    #[sqlx(try_from = "String")]
    pub status: OpportunityStatus,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub stipend: Option<String>,
    pub created_at: NaiveDateTime,
}
