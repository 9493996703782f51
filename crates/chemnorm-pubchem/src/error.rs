//! Error types for PubChem requests.

use chemnorm_map::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PubChemError {
    /// Network request failed or timed out.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an unexpected status.
    #[error("PubChem API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Fault message or response body.
        message: String,
    },

    /// The service asked us to slow down.
    #[error("PubChem is busy, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds suggested by the `Retry-After` header.
        retry_after_secs: u64,
    },

    /// Failed to parse a JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The configured base URL cannot carry a request path.
    #[error("invalid base URL '{0}'")]
    InvalidUrl(String),
}

impl PubChemError {
    /// Returns whether a retry could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for PubChemError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PubChemError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<PubChemError> for SourceError {
    fn from(err: PubChemError) -> Self {
        SourceError::new(err.to_string())
    }
}

/// Result type alias for PubChem operations.
pub type Result<T> = std::result::Result<T, PubChemError>;
