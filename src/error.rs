//! Error types for the alauda crate.

use thiserror::Error;

/// Errors surfaced by indexing, rule lookup, query building, and search.
///
/// Query relaxation and time-limited scans are deliberately *not* errors;
/// they are reported as flags on [`SearchResult`](crate::search::SearchResult).
#[derive(Error, Debug)]
pub enum AlaudaError {
    /// No rule with the requested composite id exists in the rule source.
    #[error("rule not found: {0}")]
    RuleNotFound(String),

    /// Index construction or access failure. Partial indexes are never
    /// returned; a build that fails leaves nothing to query.
    #[error("index error: {0}")]
    Index(String),

    /// Invalid argument error.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A rule element or exception clause carries a malformed regular
    /// expression.
    #[error("invalid pattern: {0}")]
    Pattern(String),

    /// The verification predicate failed for every candidate it was given.
    #[error("verification failed: {0}")]
    Verification(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AlaudaError {
    /// Create a rule-not-found error for a composite rule id.
    pub fn rule_not_found<S: Into<String>>(id: S) -> Self {
        AlaudaError::RuleNotFound(id.into())
    }

    /// Create an index error.
    pub fn index<S: Into<String>>(message: S) -> Self {
        AlaudaError::Index(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        AlaudaError::InvalidArgument(message.into())
    }

    /// Create an invalid pattern error.
    pub fn pattern<S: Into<String>>(message: S) -> Self {
        AlaudaError::Pattern(message.into())
    }

    /// Create a verification error.
    pub fn verification<S: Into<String>>(message: S) -> Self {
        AlaudaError::Verification(message.into())
    }
}

/// Result type alias for the alauda crate.
pub type Result<T> = std::result::Result<T, AlaudaError>;
