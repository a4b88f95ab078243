//! File-backed slot: one JSON file per key in a data directory.
//!
//! Writes go to a sibling temporary file that is renamed over the target,
//! so a crash mid-write leaves the previous document intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::slot::StateSlot;

/// A slot that stores each key as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    data_dir: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `data_dir`. The directory is created on the
    /// first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory holding the documents.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The file that stores `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `key` is empty, is a relative
    /// path component, or contains a path separator.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\'])
            || key.contains(std::path::MAIN_SEPARATOR);
        if invalid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.data_dir.join(format!("{key}.json")))
    }
}

impl StateSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        // Write to temp file first, then rename over the target.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "state written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps_to_json_file() {
        let slot = FileSlot::new("/tmp/tally");
        let path = slot.path_for("customActionPointsApp_v2").ok();
        assert_eq!(
            path,
            Some(PathBuf::from("/tmp/tally/customActionPointsApp_v2.json"))
        );
    }

    #[test]
    fn path_like_keys_rejected() {
        let slot = FileSlot::new("/tmp/tally");
        for key in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            assert!(
                matches!(slot.path_for(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
