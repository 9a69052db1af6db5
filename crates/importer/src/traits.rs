use crate::Result;
use crate::canonical::models::OpportunityBatch;
use sqlx::PgPool;
use storage::services::DomainClassifier;

pub struct ImportContext {
    pub pool: PgPool,
    pub classifier: DomainClassifier,
}

impl ImportContext {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            classifier: DomainClassifier::default(),
        }
    }
}

/// Anything that can hand the pipeline a batch of opportunities in the
/// canonical format.
#[async_trait::async_trait]
pub trait OpportunitySource: Send + Sync {
    async fn load(&self) -> Result<OpportunityBatch>;

    fn name(&self) -> &'static str;
}
