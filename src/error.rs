//! Error types for asset-cache
//!
//! All modules use `CacheResult<T>` as their return type. The reconcile
//! path is the exception: it swallows every error and reports an outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for asset-cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur in asset-cache
#[derive(Error, Debug)]
pub enum CacheError {
    // Slot errors
    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Invalid slot name {name:?}: {reason}")]
    InvalidSlotName { name: String, reason: String },

    #[error("Slot {name} does not hold UTF-8 text")]
    InvalidText { name: String },

    // Asset errors
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    // Page errors
    #[error("Page operation failed: {0}")]
    Page(String),

    #[error("Unknown object URL: {0}")]
    UnknownObjectUrl(String),

    #[error("Invalid URL {url}: {reason}")]
    UrlInvalid { url: String, reason: String },

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

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid slot name error
    pub fn invalid_slot(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSlotName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the underlying cause is a missing file or slot
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::SlotNotFound(_) => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SlotNotFound(_) => Some("Run: asset-cache list"),
            Self::ConfigInvalid { .. } => Some("Run: asset-cache config init --force"),
            Self::InvalidSlotName { .. } => {
                Some("Slot names are a single file name, e.g. main.css")
            }
            _ => None,
        }
    }
}
