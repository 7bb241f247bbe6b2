//! Actions consumed by the key reducer

use std::fmt;

/// Kind string for key writes
pub const UPDATE: &str = "keystamp/UPDATE";

/// Kind string for forced expiry
pub const INVALIDATE: &str = "keystamp/INVALIDATE";

/// A requested change to the key state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Mark `key` as freshly written
    Update { key: String },
    /// Expire `key` without consuming a timestamp
    Invalidate { key: String },
    /// An action owned by someone else; the reducer ignores it
    Foreign { kind: String },
}

impl Action {
    pub fn update(key: impl Into<String>) -> Self {
        Self::Update { key: key.into() }
    }

    pub fn invalidate(key: impl Into<String>) -> Self {
        Self::Invalidate { key: key.into() }
    }

    pub fn foreign(kind: impl Into<String>) -> Self {
        Self::Foreign { kind: kind.into() }
    }

    /// Kind string identifying this action
    pub fn kind(&self) -> &str {
        match self {
            Self::Update { .. } => UPDATE,
            Self::Invalidate { .. } => INVALIDATE,
            Self::Foreign { kind } => kind,
        }
    }

    /// Key this action targets, if it is one of ours
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Update { key } | Self::Invalidate { key } => Some(key),
            Self::Foreign { .. } => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{}({})", self.kind(), key),
            None => write!(f, "{}", self.kind()),
        }
    }
}
