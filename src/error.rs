//! Top-level error types for Zapbot.

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error enum wrapping domain-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingKey(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Credential store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read credentials from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write credentials to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("corrupt credential blob at {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
}

/// Transport session and delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to transport bridge at {path}: {source}")]
    Connect {
        path: String,
        source: std::io::Error,
    },

    #[error("transport bridge connection lost: {0}")]
    ConnectionLost(String),

    #[error("failed to send command to transport: {0}")]
    Send(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Generation backend errors. These never escape the backend client; they
/// exist so the failure can be logged with its diagnostic payload before
/// the fixed fallback reply is substituted.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),
}
