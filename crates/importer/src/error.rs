use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ImporterError {
    /// A failed write that is worth retrying on the next run.
    pub fn is_retryable(&self) -> bool {
        match self {
            ImporterError::StorageError(e) => e.is_retryable(),
            ImporterError::DatabaseError(_) => true,
            _ => false,
        }
    }
}
