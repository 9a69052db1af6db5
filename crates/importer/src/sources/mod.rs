mod file;
mod sample;

pub use file::CanonicalFile;
pub use sample::SampleCatalog;

use crate::Result;
use crate::canonical::models::OpportunityBatch;
use crate::canonical::validator::CanonicalValidator;
use crate::traits::OpportunitySource;
use tracing::info;

/// Loads a batch from `source` and rejects it unless it validates cleanly.
/// Warnings are logged and do not block the import.
pub async fn load_validated(source: &dyn OpportunitySource) -> Result<OpportunityBatch> {
    let batch = source.load().await?;
    info!(
        "Loaded {} opportunities from {} (v{})",
        batch.opportunities.len(),
        source.name(),
        batch.format_version
    );

    let report = CanonicalValidator::validate(&batch)?;
    report.log_warnings();

    Ok(batch)
}
