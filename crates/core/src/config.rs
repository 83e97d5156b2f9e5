//! Store runtime configuration.
//!
//! Configuration is resolved once at startup and then handed to the stores.
//! The intent is to settle the storage location in one place rather than
//! reading paths ad hoc, which can lead to inconsistent behaviour in test
//! harnesses.

use crate::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Store configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    /// Create a new `StoreConfig` rooted at `data_dir`.
    ///
    /// The directory is created if it does not exist yet. An existing path
    /// that is not a directory is rejected.
    pub fn new(data_dir: PathBuf) -> StoreResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput(
                "data_dir cannot be empty".into(),
            ));
        }

        if data_dir.exists() && !data_dir.is_dir() {
            return Err(StoreError::InvalidInput(
                "data_dir exists but is not a directory".into(),
            ));
        }

        std::fs::create_dir_all(&data_dir).map_err(StoreError::StorageDirCreation)?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve the on-disk path for a named storage slot.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(format!("{slot}.json"))
    }
}

// =============================================================================================
// TESTS
// =============================================================================================
