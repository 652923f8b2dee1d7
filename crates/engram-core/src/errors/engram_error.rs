/// Top-level error type for the memory bank.
///
/// Benign conditions (feedback for an evicted chunk, retrieval against an
/// empty store, a query with no similar chunks) are not errors and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("chunk already stored: {id}")]
    DuplicateChunk { id: String },

    #[error("cannot promote an empty window")]
    EmptyWindow,

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

impl EngramError {
    /// Shorthand for an [`EngramError::InvalidConfiguration`].
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias.
pub type EngramResult<T> = Result<T, EngramError>;
