//! The state store: load and save the root record through a slot.

use tally_types::{default_state, DailyBucket, DateKey, TrackerState};

use crate::document::{decode_document, encode_document, LoadReport, LoadSource};
use crate::error::StoreError;
use crate::slot::StateSlot;

/// Storage key used by the browser version of the tracker.
pub const DEFAULT_STORAGE_KEY: &str = "customActionPointsApp_v2";

/// Loads and saves the root record under a fixed key of a [`StateSlot`].
#[derive(Debug, Clone)]
pub struct StateStore<S> {
    slot: S,
    key: String,
}

impl<S: StateSlot> StateStore<S> {
    /// Create a store for `key` in `slot`.
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// Create a store under [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(slot: S) -> Self {
        Self::new(slot, DEFAULT_STORAGE_KEY)
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying slot.
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Mutable access to the underlying slot.
    pub const fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    /// Load the persisted state.
    ///
    /// Never fails: missing or corrupt data yields the default record (per
    /// field where possible) and the corruption is logged.
    pub fn load(&self) -> TrackerState {
        self.load_with_report().0
    }

    /// Load the persisted state and report any recovery that took place.
    pub fn load_with_report(&self) -> (TrackerState, LoadReport) {
        match self.slot.read(&self.key) {
            Ok(None) => {
                tracing::info!(key = %self.key, "no persisted state, starting from defaults");
                (default_state(), LoadReport::new(LoadSource::Empty))
            }
            Ok(Some(raw)) => {
                let mut report = LoadReport::new(LoadSource::Stored);
                let state = decode_document(&raw, &mut report);
                tracing::info!(
                    key = %self.key,
                    actions = state.actions.len(),
                    multipliers = state.multipliers.len(),
                    days = state.daily_totals.len(),
                    clean = report.is_clean(),
                    "persisted state loaded"
                );
                (state, report)
            }
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "failed to read persisted state, using defaults");
                let mut report = LoadReport::new(LoadSource::Unreadable);
                report.corrupt.push(error);
                (default_state(), report)
            }
        }
    }

    /// Serialize the full state and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the slot write fails; the
    /// previously stored value is then left in place.
    pub fn save(&mut self, state: &TrackerState) -> Result<(), StoreError> {
        let document = encode_document(state)?;
        self.slot.write(&self.key, &document)?;
        tracing::debug!(key = %self.key, bytes = document.len(), "state saved");
        Ok(())
    }
}

/// Return the bucket for `date`, creating an empty one first if absent.
///
/// Creation inserts the bucket into `daily_totals`; calling again for the
/// same date returns the same bucket.
pub fn get_or_create_bucket(state: &mut TrackerState, date: DateKey) -> &mut DailyBucket {
    state.daily_totals.entry(date).or_insert_with(|| {
        tracing::debug!(date = %date, "created daily bucket");
        DailyBucket::default()
    })
}
