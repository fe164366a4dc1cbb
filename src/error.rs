//! Error types for ytscout.

use thiserror::Error;

/// Library-level error type for ytscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Transient network or quota condition reported by the remote source.
    /// Callers own the retry policy; nothing is retried internally.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A response record was missing its identifier field. `index` is the
    /// position in the aggregated result stream, not within its page.
    #[error("Malformed record at index {index}: missing field '{field}'")]
    MalformedRecord { field: &'static str, index: usize },

    #[error("API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ytscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
