//! CLI error types

use adapter_feeds::FeedError;
use infra_config::ConfigError;
use infra_store::StoreError;
use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The destination table could not be created; nothing can be written
    #[error("Schema creation failed: {0}")]
    Schema(#[source] StoreError),

    /// Storage error outside the per-year loop
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Holiday feed error outside the per-year loop
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
