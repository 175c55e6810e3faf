// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed JSON documents over a key → blob storage port.
//!
//! Keys are logical names such as `"collisions"`. They must be a single
//! non-empty segment of ASCII letters, digits, `-` or `_`, which lets the
//! filesystem store map a key straight onto `<base>/<key>.json`.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Where raw config blobs live.
pub trait ConfigStore {
    /// Reads the blob stored under `key`; [`ConfigError::NotFound`] when absent.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Writes `data` under `key`, replacing any previous blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failures while reading or writing config documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing is stored under the key.
    #[error("not found")]
    NotFound,
    /// The key is empty or not a single `[A-Za-z0-9_-]` segment.
    #[error("invalid config key: {0:?}")]
    InvalidKey(String),
    /// The platform has no per-user config directory.
    #[error("could not resolve config dir")]
    NoConfigDir,
    /// Reading or writing the backing store failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The blob is not a valid document of the requested type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Checks that `key` is usable by every store.
pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Serializes documents as pretty JSON and hands the bytes to a [`ConfigStore`].
#[derive(Debug)]
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the document under `key`.
    ///
    /// A missing key and an empty blob both yield `Ok(None)`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        validate_key(key)?;
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Writes `value` under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        validate_key(key)?;
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}
