//! Tracker operations, views, clock and configuration for Tally.
//!
//! [`Tracker`] owns the root state and exposes every user-facing
//! operation: crediting an activation, toggling multipliers, editing and
//! reordering the action and multiplier sequences, resets, and the
//! read-only today and history views. Each mutation is persisted through a
//! [`StateStore`](tally_store::StateStore) before it returns.
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with the system and fixed clocks.
//! - [`config`] -- Configuration loading from `tally.yaml`.
//! - [`error`] -- [`TrackerError`] and [`EntityKind`].
//! - [`reorder`] -- Positional move shared by both sequences.
//! - [`tracker`] -- The [`Tracker`] and its input drafts.
//! - [`validation`] -- Name and value checks run before any mutation.
//! - [`views`] -- Today and history projections.

pub mod clock;
pub mod config;
pub mod error;
pub mod reorder;
pub mod tracker;
pub mod validation;
pub mod views;

pub use clock::{Clock, ClockError, FixedClock, SystemClock};
pub use config::{ConfigError, LogFormat, LoggingConfig, StorageConfig, TallyConfig};
pub use error::{EntityKind, TrackerError};
pub use tracker::{ActionDraft, MultiplierDraft, Tracker};
