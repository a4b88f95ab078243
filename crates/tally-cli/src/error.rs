//! Error types for the `tally` binary.

use tally_core::{ConfigError, TrackerError};

/// Top-level error for a command run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A tracker operation failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// A destructive command was run without `--yes`.
    #[error("`{command}` cannot be undone; run it again with --yes to confirm")]
    ConfirmationRequired {
        /// The command that needs confirmation.
        command: &'static str,
    },

    /// A move target outside the list.
    #[error("position {position} is out of range 1..={len}")]
    InvalidPosition {
        /// The requested 1-based position.
        position: usize,
        /// Length of the list.
        len: usize,
    },

    /// `verify` found inconsistent days.
    #[error("{count} day(s) out of balance")]
    Unbalanced {
        /// Number of inconsistent days.
        count: usize,
    },
}
