use crate::Result;
use crate::canonical::models::OpportunityBatch;
use crate::traits::OpportunitySource;
use std::path::{Path, PathBuf};

/// A canonical JSON batch on disk.
pub struct CanonicalFile {
    path: PathBuf,
}

impl CanonicalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl OpportunitySource for CanonicalFile {
    async fn load(&self) -> Result<OpportunityBatch> {
        let json_content = tokio::fs::read_to_string(&self.path).await?;
        let batch = serde_json::from_str(&json_content)?;
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "canonical file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImporterError;
    use crate::sources::load_validated;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn loads_and_validates_batch_from_disk() {
        let path = temp_path("opportunity-batch");
        let json = r#"{
            "format_version": "1.0.0",
            "source": {"type": "manual", "extracted_at": "2025-03-01T00:00:00Z", "extractor": "test"},
            "opportunities": [{
                "title": "Summer Research Experience",
                "description": "Paid lab placement in robotics",
                "university": "Example University",
                "url": "https://example.edu/reu",
                "deadline": "2025-05-01"
            }]
        }"#;
        tokio::fs::write(&path, json).await.unwrap();

        let batch = load_validated(&CanonicalFile::new(&path)).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(batch.opportunities.len(), 1);
        assert_eq!(batch.opportunities[0].url, "https://example.edu/reu");
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let path = temp_path("opportunity-batch-broken");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = CanonicalFile::new(&path).load().await.unwrap_err();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(matches!(err, ImporterError::ParseError(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = CanonicalFile::new(temp_path("does-not-exist"))
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, ImporterError::IoError(_)));
        assert!(!err.is_retryable());
    }
}
