//! Error types for the intake assistant.

use thiserror::Error;

/// Failure reported by a ticket submitter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Complaints API returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl SubmitError {
    /// Errors a later identical attempt could plausibly get past
    pub fn is_transient(&self) -> bool {
        match self {
            SubmitError::Http(_) | SubmitError::Timeout(_) => true,
            SubmitError::Status { status, .. } => *status >= 500 || *status == 429,
        }
    }
}

/// Configuration loading failure
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Failure talking to a conversation session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Utterance is empty")]
    EmptyUtterance,

    #[error("Conversation session has stopped")]
    Closed,
}
