use thiserror::Error;

use shelf_sync_scraper::SyncError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Sync pipeline failure
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Interactive prompt failed or was not possible
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
