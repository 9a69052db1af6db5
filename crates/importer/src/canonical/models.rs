use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use storage::models::{Domain, OpportunityStatus};

pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityBatch {
    pub format_version: String,
    pub source: SourceMetadata,
    pub opportunities: Vec<OpportunityRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(rename = "type")]
    pub r#type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub extracted_at: DateTime<Utc>,
    pub extractor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Html,
    Csv,
    Manual,
    Seed,
}

/// One opportunity as delivered by a source. `domain` is only present when
/// the source already knows it; otherwise the pipeline classifies the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub university: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OpportunityStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}
