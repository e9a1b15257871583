//! Reconcile outcomes

use serde::Serialize;
use std::fmt;

/// What a single reconcile did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Reconciled {
    /// Asset loaded, slot still fresh, nothing written
    Fresh,

    /// Asset loaded, slot was stale or absent and has been rewritten
    Stored { bytes: usize },

    /// Asset missing, applied to the page from its slot
    Restored,

    /// Asset missing and nothing cached for it
    Miss,

    /// Gave up on this asset; the page keeps its default behavior
    Skipped { reason: String },
}

impl Reconciled {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stored { .. } => "stored",
            Self::Restored => "restored",
            Self::Miss => "miss",
            Self::Skipped { .. } => "skipped",
        }
    }
}

impl fmt::Display for Reconciled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored { bytes } => write!(f, "stored ({} bytes)", bytes),
            Self::Skipped { reason } => write!(f, "skipped: {}", reason),
            other => f.write_str(other.as_str()),
        }
    }
}
