//! Error types for name resolution and batch aggregation.

use thiserror::Error;

/// Failure reported by a compound source (service or file).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from resolving a single input name.
///
/// A name with no match is not an error; resolvers return `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A matched record lacks the fields needed to derive a canonical form.
    #[error("malformed record for '{name}': {reason}")]
    MalformedRecord { name: String, reason: String },

    /// The matching source could not be reached or parsed.
    #[error("source unavailable while resolving '{name}': {message}")]
    SourceUnavailable { name: String, message: String },
}

/// Errors that abort a whole batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("batch aborted at input {index}: {source}")]
    SourceUnavailable {
        index: usize,
        #[source]
        source: ResolveError,
    },

    #[error("batch aborted at input {index} (strict mode): {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: ResolveError,
    },
}
