// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory `ConfigStore` for tests and embedded hosts.

use crate::config::{ConfigError, ConfigStore};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Keeps config blobs in a map; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Create a store pre-populated with one blob.
    pub fn with_blob(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store.blobs.borrow_mut().insert(key.to_owned(), data.into());
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
