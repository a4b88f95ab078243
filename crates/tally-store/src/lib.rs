//! Persistence of the Tally root record.
//!
//! The whole state is one JSON document stored under one key of a durable
//! key-value slot. Every save rewrites the full document; loading is
//! tolerant and falls back to the default record field by field.
//!
//! # Modules
//!
//! - [`slot`] -- The [`StateSlot`] trait and the in-memory [`MemorySlot`]
//! - [`file`] -- [`FileSlot`]: one JSON file per key, replaced atomically
//! - [`document`] -- Tolerant decoding and the [`LoadReport`]
//! - [`store`] -- [`StateStore`] and [`get_or_create_bucket`]
//! - [`error`] -- Shared error types

pub mod document;
pub mod error;
pub mod file;
pub mod slot;
pub mod store;

// Re-export primary types for convenience.
pub use document::{LoadReport, LoadSource};
pub use error::{StateField, StoreError};
pub use file::FileSlot;
pub use slot::{MemorySlot, StateSlot};
pub use store::{get_or_create_bucket, StateStore, DEFAULT_STORAGE_KEY};
