//! Error types for userlink
//!
//! All modules use `UserlinkResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for userlink operations
pub type UserlinkResult<T> = Result<T, UserlinkError>;

/// All errors that can occur in userlink
#[derive(Error, Debug)]
pub enum UserlinkError {
    // API errors
    #[error("Server rejected request with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {context}")]
    Request {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    // Credential errors
    #[error("Session credential expired, sign in again")]
    CredentialExpired,

    // Cache errors
    #[error("Query cancelled: {0}")]
    QueryCancelled(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Patch apply error: {0}")]
    Patch(#[from] json_patch::PatchError),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserlinkError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP request error with context
    pub fn request(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            context: context.into(),
            source,
        }
    }

    /// Check whether the mutation flow absorbs this error (rollback plus
    /// user notice) rather than treating it as a programming error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::Request { .. }
                | Self::CredentialExpired
                | Self::QueryCancelled(_)
        )
    }
}
