use thiserror::Error;

/// Malformed source configuration. Always fatal for the whole check.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tag filter {pattern:?}: {source}")]
    InvalidTagFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid semver constraint {constraint:?}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("Invalid order_by {0:?}: expected \"version\" or \"time\"")]
    InvalidOrderBy(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to list releases: {0}")]
    Source(#[from] SourceError),
}
