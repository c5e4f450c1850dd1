//! Error types for seolens-core

use thiserror::Error;

/// Result type for seolens-core operations.
pub type Result<T> = std::result::Result<T, SeoError>;

/// Errors raised while fetching a page or asking an advisor for suggestions.
///
/// The scoring engine itself never fails; invalid URLs and fetch failures reach it as
/// [`crate::PageData::Error`] carrying this error's display text.
#[derive(Debug, Error)]
pub enum SeoError {
    /// The URL could not be parsed, even after adding a scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network failure, timeout, or non-success status
    #[error("Could not fetch website: {0}")]
    Fetch(String),

    /// The advisor is not configured (e.g. missing API key)
    #[error("Advisor unavailable: {0}")]
    AdvisorUnavailable(String),

    /// The advisor was reachable but the call failed
    #[error("Advisor error: {0}")]
    Advisor(String),
}

impl SeoError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn advisor(msg: impl Into<String>) -> Self {
        Self::Advisor(msg.into())
    }
}
