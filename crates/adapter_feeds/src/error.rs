//! Feed errors.

use thiserror::Error;

/// Errors that can occur while fetching or parsing holiday data.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No data published for the year
    #[error("No holiday data found: {0}")]
    NotFound(String),

    /// Payload is not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record parsed but violates the entry rules
    #[error("Malformed record {index} ('{name}'): {message}")]
    MalformedRecord {
        index: usize,
        name: String,
        message: String,
    },
}

impl FeedError {
    /// Whether a retry might succeed: connect failures, timeouts, 429 and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::Http(e) => e.is_connect() || e.is_timeout(),
            FeedError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}
