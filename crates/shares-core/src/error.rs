//! Error types for pipeline operations.
//!
//! This module defines [`SharesError`] which covers every failure that can occur
//! while fetching, validating, reducing, or caching shares-outstanding data.
//! None of them are fatal: the orchestrator logs and absorbs each kind.

use thiserror::Error;

/// Errors that can occur during pipeline operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharesError {
    /// Transport-level failure (DNS, connection refused, body read aborted).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with a non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be parsed as JSON.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The payload parsed but lacks the required fields.
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// No observation survived the fiscal-year and numeric filter.
    #[error("No observations after {cutoff} survived filtering")]
    EmptyAfterFilter {
        /// The fiscal-year cutoff that was applied.
        cutoff: String,
    },

    /// The stored snapshot is unreadable or fails validation.
    #[error("Corrupt cache entry: {0}")]
    CorruptCache(String),

    /// The storage backend itself failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using [`SharesError`].
pub type Result<T> = std::result::Result<T, SharesError>;
