//! Error types for Wayfinder.

use std::time::Duration;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// A should-never-happen internal inconsistency: a missing question
    /// definition at a valid index, or a completed profile without an email.
    /// Indicates a catalog/controller bug, not user error.
    #[error("Consistency error: {0}")]
    Consistency(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session store errors.
///
/// An expired or never-created session is *not* an error — `get` returns
/// `None` for both. These variants cover genuine store failures, which are
/// fatal for the turn they occur on.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to open session store: {0}")]
    Open(String),

    #[error("Session write failed: {0}")]
    Write(String),

    #[error("Session read failed: {0}")]
    Read(String),

    #[error("Session state serialization failed: {0}")]
    Serialization(String),
}

/// Profile persistence errors, classified for retry decisions.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Profile is missing a valid email address")]
    MissingEmail,

    #[error("A profile with this email already exists")]
    AlreadyExists,

    #[error("Profile table missing or schema mismatch: {0}")]
    Schema(String),

    #[error("Could not reach the profile store: {0}")]
    Connect(String),

    #[error("Profile store request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Profile store returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from the profile store: {0}")]
    InvalidResponse(String),
}

impl PersistError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Unique-constraint and schema errors are permanent; network-class
    /// failures (connect, timeout, 5xx) go through the retry loop.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Timeout(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::MissingEmail
            | Self::AlreadyExists
            | Self::Schema(_)
            | Self::InvalidResponse(_) => false,
        }
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
