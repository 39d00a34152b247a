use thiserror::Error;

use shelf_lib::CollectionError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened
    #[error("Database error: {0}")]
    Database(String),

    /// Collection operation failed
    #[error("{0}")]
    Collection(#[from] CollectionError),

    /// Seed or export file error
    #[error("{0}")]
    Seed(#[from] shelf_catalog::SeedError),

    /// Missing or malformed command arguments
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn arguments(msg: impl Into<String>) -> Self {
        Self::Arguments(msg.into())
    }
}
