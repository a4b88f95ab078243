//! Error types for tracker operations.

use tally_ledger::LedgerError;
use tally_store::StoreError;

/// Which sequence an id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The action sequence.
    Action,
    /// The multiplier sequence.
    Multiplier,
}

impl EntityKind {
    /// Lowercase name for messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Multiplier => "multiplier",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`Tracker`](crate::Tracker) operations.
///
/// `Validation` and `NotFound` leave the state untouched. `Store` is
/// returned after the in-memory mutation has been applied but could not be
/// persisted.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Input rejected before any mutation.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending input field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The id is not present in the relevant sequence.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The sequence searched.
        kind: EntityKind,
        /// The id or name that was looked up.
        id: String,
    },

    /// Points arithmetic failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The state could not be persisted.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl TrackerError {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
