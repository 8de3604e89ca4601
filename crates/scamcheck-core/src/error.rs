//! Error types for ScamCheck

/// Result type alias using ScamCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ScamCheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Classifier construction/execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Network/service errors calling the remote classifier
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// Remote classifier response could not be parsed
    #[error("invalid response format: {0}")]
    InvalidResponseFormat(String),

    /// Remote classifier response parsed but lacks required fields
    #[error("invalid response schema: {0}")]
    InvalidResponseSchema(String),

    /// Remote call exceeded its deadline
    #[error("operation timed out")]
    Timeout,

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new remote call error
    pub fn remote_call(msg: impl Into<String>) -> Self {
        Self::RemoteCall(msg.into())
    }

    /// Create a new invalid response format error
    pub fn invalid_response_format(msg: impl Into<String>) -> Self {
        Self::InvalidResponseFormat(msg.into())
    }

    /// Create a new invalid response schema error
    pub fn invalid_response_schema(msg: impl Into<String>) -> Self {
        Self::InvalidResponseSchema(msg.into())
    }
}
