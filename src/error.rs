use thiserror::Error;

/// Errors raised at the edges of the crate (configuration, input, remote responses).
///
/// The scoring and ranking algorithms themselves never fail; they degrade to
/// weaker results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a configuration or input file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The remote entity-recognition service did not produce a usable response
    #[error("entity recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
}

/// Why a remote entity-recognition call produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("request timed out")]
    Timeout,

    #[error("service returned status {0}")]
    Status(u16),

    #[error("request aborted")]
    Aborted,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
