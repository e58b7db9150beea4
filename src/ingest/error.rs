use thiserror::Error;

use crate::db::ConnectionError;

/// Batch-level failures. Per-row failures are logged and never show up here.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File missing, unreadable, or its header row could not be parsed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required columns are absent from the header row.
    #[error("CSV file does not contain the required columns: missing {missing:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        headers: Vec<String>,
    },

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("failed to begin batch transaction: {0}")]
    Transaction(#[source] sqlx::Error),

    #[error("failed to commit batch: {0}")]
    Commit(#[source] sqlx::Error),
}
