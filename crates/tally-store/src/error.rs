//! Error types for the persistence layer.
//!
//! [`StoreError`] covers slot I/O and serialization failures, which are
//! returned to the caller, and corrupt stored data, which the loader only
//! reports after substituting defaults.

use std::path::PathBuf;

/// A top-level field of the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateField {
    /// The document as a whole.
    Document,
    /// The `actions` sequence.
    Actions,
    /// The `multipliers` sequence.
    Multipliers,
    /// The `dailyTotals` map.
    DailyTotals,
}

impl StateField {
    /// The field's name in the persisted document.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Actions => "actions",
            Self::Multipliers => "multipliers",
            Self::DailyTotals => "dailyTotals",
        }
    }
}

impl core::fmt::Display for StateField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the durable slot failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The state could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage key cannot name a slot.
    #[error("invalid storage key {0:?}: must be non-empty and contain no path separators")]
    InvalidKey(String),

    /// Stored data is unparsable or does not match the schema.
    ///
    /// Never returned from a load; the loader substitutes defaults for the
    /// field and lists this condition in its
    /// [`LoadReport`](crate::LoadReport).
    #[error("persisted {field} is corrupt: {reason}")]
    PersistenceCorrupt {
        /// The field that was replaced by its default.
        field: StateField,
        /// What was wrong with it.
        reason: String,
    },
}
