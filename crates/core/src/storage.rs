//! Whole-value JSON persistence for named storage slots.
//!
//! A slot is a single JSON document on disk, read and written in full.
//! There is no partial update; the stores keep their working set in
//! memory and rewrite the affected slot after every mutation.

use crate::config::StoreConfig;
use crate::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::sync::Arc;

/// Reads and writes named slots beneath the configured data directory.
#[derive(Clone, Debug)]
pub struct SlotStore {
    cfg: Arc<StoreConfig>,
}

impl SlotStore {
    pub fn new(cfg: Arc<StoreConfig>) -> Self {
        Self { cfg }
    }

    /// Load a slot, treating anything unreadable as absent.
    ///
    /// A missing file is the normal first-run case and yields `None`. A file
    /// that cannot be read or parsed is logged, cleared where possible and
    /// also reported as `None`, so one damaged slot never wedges the store.
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let path = self.cfg.slot_path(slot);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read storage slot: {} - {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    "clearing unparseable storage slot: {} - {}",
                    path.display(),
                    e
                );
                // Best effort; a slot that cannot be removed is overwritten by
                // the next save anyway.
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    /// Write a slot as one JSON document, replacing any previous value.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(StoreError::Serialization)?;
        std::fs::write(self.cfg.slot_path(slot), json).map_err(StoreError::SlotWrite)
    }

    /// Remove a slot. Removing a slot that does not exist is not an error.
    pub fn remove(&self, slot: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.cfg.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::SlotRemove(e)),
        }
    }

    pub fn exists(&self, slot: &str) -> bool {
        self.cfg.slot_path(slot).is_file()
    }
}

// =============================================================================================
// TESTS
// =============================================================================================
