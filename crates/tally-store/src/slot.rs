//! The durable key-value slot abstraction.
//!
//! The tracker persists one document under one key. A [`StateSlot`] is any
//! storage that can hold such a document and replace it with a single
//! write; the write either fully replaces the previous value or leaves it
//! in place.

use std::collections::BTreeMap;

use crate::error::StoreError;

/// A durable key-value slot holding serialized documents.
pub trait StateSlot {
    /// Read the value stored under `key`, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails. The previous value is then
    /// still in place.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// An in-process slot, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: BTreeMap<String, String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Create a slot that already holds `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.to_owned(), value.to_owned());
        Self { values }
    }

    /// The raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl StateSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
