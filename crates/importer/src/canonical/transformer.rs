use super::models::{OpportunityBatch, OpportunityRecord};
use crate::{ImportContext, Result};
use storage::repository::opportunity::{NewOpportunity, OpportunityRepository};
use storage::services::DomainClassifier;
use tracing::{debug, info};

const MAX_TITLE_CHARS: usize = 500;
const MAX_DESCRIPTION_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub created: usize,
    pub existing: usize,
}

pub struct CanonicalTransformer<'a> {
    context: &'a ImportContext,
}

impl<'a> CanonicalTransformer<'a> {
    pub fn new(context: &'a ImportContext) -> Self {
        Self { context }
    }

    /// Writes every record of a validated batch. Records whose URL is
    /// already stored are left untouched, so re-importing a batch is a no-op.
    pub async fn import_to_database(&self, batch: OpportunityBatch) -> Result<ImportStats> {
        let repo = OpportunityRepository::new(&self.context.pool);
        let mut stats = ImportStats::default();

        for record in &batch.opportunities {
            let new = prepare_record(record, &self.context.classifier);
            let (opportunity, created) = repo.get_or_create(&new).await?;

            if created {
                stats.created += 1;
                debug!(
                    "Created opportunity '{}' as {}",
                    opportunity.title, opportunity.domain
                );
            } else {
                stats.existing += 1;
                debug!("Opportunity already stored: {}", opportunity.url);
            }
        }

        info!(
            "Imported {} opportunities ({} new, {} already stored)",
            batch.opportunities.len(),
            stats.created,
            stats.existing
        );

        Ok(stats)
    }
}

/// Normalises a record into a write-ready opportunity, classifying its text
/// when the source did not supply a domain.
pub fn prepare_record(record: &OpportunityRecord, classifier: &DomainClassifier) -> NewOpportunity {
    let title = truncate_chars(record.title.trim(), MAX_TITLE_CHARS);
    let description = truncate_chars(record.description.trim(), MAX_DESCRIPTION_CHARS);

    let domain = record
        .domain
        .unwrap_or_else(|| classifier.classify(&format!("{} {}", title, description)));

    let tags = record
        .tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    NewOpportunity {
        title,
        description,
        university: record.university.trim().to_string(),
        domain,
        deadline: record.deadline,
        url: record.url.trim().to_string(),
        status: record.status.unwrap_or_default(),
        tags,
        stipend: record
            .stipend
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::{Domain, OpportunityStatus};

    fn record(title: &str, description: &str) -> OpportunityRecord {
        OpportunityRecord {
            title: title.to_string(),
            description: description.to_string(),
            university: " Example University ".to_string(),
            url: " https://example.edu/listing ".to_string(),
            deadline: None,
            status: None,
            tags: vec![],
            stipend: None,
            domain: None,
        }
    }

    #[test]
    fn classifies_when_domain_is_missing() {
        let classifier = DomainClassifier::default();
        let new = prepare_record(
            &record("Campus Hackathon", "A 48 hour coding contest"),
            &classifier,
        );

        assert_eq!(new.domain, Domain::Competition);
        assert_eq!(new.status, OpportunityStatus::Open);
        assert_eq!(new.university, "Example University");
        assert_eq!(new.url, "https://example.edu/listing");
    }

    #[test]
    fn explicit_domain_wins_over_classification() {
        let classifier = DomainClassifier::default();
        let mut input = record(
            "Research Scholars Program",
            "Merit-based scholarship for undergraduates pursuing research.",
        );
        input.domain = Some(Domain::Scholarship);

        assert_eq!(prepare_record(&input, &classifier).domain, Domain::Scholarship);
    }

    #[test]
    fn unmatched_text_falls_back_to_other() {
        let classifier = DomainClassifier::default();
        let new = prepare_record(&record("Campus library hours", ""), &classifier);

        assert_eq!(new.domain, Domain::Other);
    }

    #[test]
    fn truncates_long_text_on_char_boundaries() {
        let classifier = DomainClassifier::default();
        let long_title = "é".repeat(MAX_TITLE_CHARS + 20);
        let long_description = "x".repeat(MAX_DESCRIPTION_CHARS * 2);

        let new = prepare_record(&record(&long_title, &long_description), &classifier);

        assert_eq!(new.title.chars().count(), MAX_TITLE_CHARS);
        assert_eq!(new.description.len(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn cleans_tags_and_blank_stipend() {
        let classifier = DomainClassifier::default();
        let mut input = record("Software Engineering Internship", "");
        input.tags = vec![" software ".to_string(), "  ".to_string(), "paid".to_string()];
        input.stipend = Some("   ".to_string());

        let new = prepare_record(&input, &classifier);

        assert_eq!(new.tags, vec!["software", "paid"]);
        assert_eq!(new.stipend, None);
    }
}
