pub mod canonical;
pub mod error;
pub mod sources;
pub mod traits;

pub use error::{ImporterError, Result};
pub use sources::{CanonicalFile, SampleCatalog, load_validated};
pub use traits::{ImportContext, OpportunitySource};
