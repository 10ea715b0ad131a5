//! Error types for the Rythu application.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A shared error type for the Rythu crates.
///
/// Dispatch and voice failures have their own enums because they are turned
/// into chat turns or inline notices rather than propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RythuError {
    /// Outbound message was empty or whitespace-only
    #[error("Message must not be empty")]
    EmptyMessage,

    /// A dispatch is already outstanding for this session
    #[error("A request is already in progress for this session")]
    RequestInFlight,

    /// The conversation was reset while a request was in flight
    #[error("Conversation was reset before the response arrived")]
    SessionReset,

    /// Caller supplied an out-of-range or unparseable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RythuError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if the error was a local validation rejection
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::InvalidInput(_))
    }

    /// Check if the error came from the single-flight guard
    pub fn is_request_in_flight(&self) -> bool {
        matches!(self, Self::RequestInFlight)
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for RythuError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RythuError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RythuError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RythuError>`.
pub type Result<T> = std::result::Result<T, RythuError>;

/// Failure of a single round-trip to the generative-language backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No credential was configured
    #[error("API key is not configured")]
    NotConfigured,

    /// The backend rejected the credential
    #[error("API key was rejected: {0}")]
    InvalidCredential(String),

    /// Network failure or non-2xx response
    #[error("Transport error{}: {message}", .status_code.map(|c| format!(" (HTTP {c})")).unwrap_or_default())]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// No response within the client-side timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse classification of a [`DispatchError`], kept on the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchErrorKind {
    Configuration,
    Transport,
    MalformedResponse,
}

impl DispatchError {
    pub fn transport(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> DispatchErrorKind {
        match self {
            Self::NotConfigured | Self::InvalidCredential(_) => DispatchErrorKind::Configuration,
            Self::Transport { .. } | Self::Timeout(_) => DispatchErrorKind::Transport,
            Self::MalformedResponse(_) => DispatchErrorKind::MalformedResponse,
        }
    }
}

/// Voice capture failure, surfaced inline near the input control.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceError {
    #[error("Speech recognition is not supported on this platform")]
    Unsupported,

    #[error("Could not start recognition: {0}")]
    StartFailed(String),

    #[error("Speech recognition error: {0}")]
    Platform(String),
}
