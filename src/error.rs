//! Error types for keystamp
//!
//! All modules use `KeystampResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for keystamp operations
pub type KeystampResult<T> = Result<T, KeystampError>;

/// All errors that can occur in keystamp
#[derive(Error, Debug)]
pub enum KeystampError {
    // Contract errors
    #[error("No state container registered")]
    UninitializedStore,

    // State errors
    #[error("Corrupt state file {path}: {reason}")]
    StateCorrupt { path: PathBuf, reason: String },

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

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl KeystampError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an error for a lock poisoned by a panicking writer
    pub fn poisoned(what: &str) -> Self {
        Self::Internal(format!("{} lock poisoned", what))
    }

    /// Check if error is retryable
    ///
    /// Contract violations such as a missing container are programming
    /// errors and never succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UninitializedStore => {
                Some("Register a state container with KeyTracker::register first")
            }
            Self::StateCorrupt { .. } => {
                Some("Remove or repair the state file; keys will read as unset")
            }
            Self::ConfigInvalid { .. } => Some("Run: keystamp config init --force"),
            _ => None,
        }
    }
}
