use super::models::{FORMAT_VERSION, OpportunityBatch};
use crate::{ImporterError, Result};
use std::collections::HashSet;
use tracing::warn;

/// Titles shorter than this are usually navigation links picked up by a
/// scraper rather than real listings.
const MIN_TITLE_CHARS: usize = 10;

pub struct CanonicalValidator;

impl CanonicalValidator {
    pub fn validate(batch: &OpportunityBatch) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if batch.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                batch.format_version, FORMAT_VERSION
            ));
        }

        if batch.source.extractor.trim().is_empty() {
            report
                .errors
                .push("Source extractor is required".to_string());
        }

        if batch.opportunities.is_empty() {
            report
                .warnings
                .push("Batch contains no opportunities".to_string());
        }

        let mut urls = HashSet::new();
        for (idx, record) in batch.opportunities.iter().enumerate() {
            let label = format!("{}. '{}'", idx + 1, record.title);

            if record.title.trim().is_empty() {
                report
                    .errors
                    .push(format!("Opportunity {} has an empty title", idx + 1));
            } else if record.title.trim().chars().count() < MIN_TITLE_CHARS {
                report
                    .warnings
                    .push(format!("Opportunity {} has a very short title", label));
            }

            if record.university.trim().is_empty() {
                report
                    .errors
                    .push(format!("Opportunity {} has an empty university", label));
            }

            let url = record.url.trim();
            if url.is_empty() {
                report
                    .errors
                    .push(format!("Opportunity {} has an empty url", label));
            } else {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    report.errors.push(format!(
                        "Opportunity {} has a non-absolute url: '{}'",
                        label, url
                    ));
                }
                if !urls.insert(url) {
                    report
                        .errors
                        .push(format!("Duplicate url in batch: '{}'", url));
                }
            }

            if record.description.trim().is_empty() {
                report
                    .warnings
                    .push(format!("Opportunity {} has no description", label));
            }

            if record.deadline.is_none() {
                report
                    .warnings
                    .push(format!("Opportunity {} has no deadline", label));
            }
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::models::{OpportunityRecord, SourceMetadata, SourceType};
    use chrono::{NaiveDate, Utc};

    fn record(title: &str, url: &str) -> OpportunityRecord {
        OpportunityRecord {
            title: title.to_string(),
            description: "Paid summer placement.".to_string(),
            university: "Example University".to_string(),
            url: url.to_string(),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 1),
            status: None,
            tags: vec![],
            stipend: None,
            domain: None,
        }
    }

    fn batch(opportunities: Vec<OpportunityRecord>) -> OpportunityBatch {
        OpportunityBatch {
            format_version: FORMAT_VERSION.to_string(),
            source: SourceMetadata {
                r#type: SourceType::Manual,
                url: None,
                extracted_at: Utc::now(),
                extractor: "test".to_string(),
                original_filename: None,
            },
            opportunities,
        }
    }

    #[test]
    fn accepts_well_formed_batch() {
        let report = CanonicalValidator::validate(&batch(vec![
            record("Summer Research Experience", "https://example.edu/a"),
            record("Global Policy Fellowship", "https://example.edu/b"),
        ]))
        .unwrap();

        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_unknown_format_version() {
        let mut input = batch(vec![record("Summer Research Experience", "https://example.edu/a")]);
        input.format_version = "0.9".to_string();

        let err = CanonicalValidator::validate(&input).unwrap_err();
        assert!(err.to_string().contains("Unsupported format version"));
    }

    #[test]
    fn rejects_duplicate_and_relative_urls() {
        let err = CanonicalValidator::validate(&batch(vec![
            record("Summer Research Experience", "https://example.edu/a"),
            record("Summer Research Experience II", "https://example.edu/a"),
            record("Campus Hackathon Weekend", "/events/hackathon"),
        ]))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("2 error(s)"));
        assert!(message.contains("Duplicate url"));
        assert!(message.contains("non-absolute url"));
    }

    #[test]
    fn short_title_and_missing_details_only_warn() {
        let mut sparse = record("Apply", "https://example.edu/apply");
        sparse.description = String::new();
        sparse.deadline = None;

        let report = CanonicalValidator::validate(&batch(vec![sparse])).unwrap();

        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn empty_batch_is_a_warning() {
        let report = CanonicalValidator::validate(&batch(vec![])).unwrap();
        assert_eq!(report.warnings, vec!["Batch contains no opportunities"]);
    }
}
