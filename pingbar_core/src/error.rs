use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key not configured")]
    NoApiKey,

    #[error("API key rejected by the search provider")]
    InvalidKey,

    #[error("search provider request limit reached")]
    LimitReached,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected status from search provider: {0}")]
    Status(u16),

    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
