// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage ports for Bending.
//!
//! Values are serialized as JSON blobs keyed by a logical name (for example
//! `"collisions"`). The service is storage-agnostic; [`FsConfigStore`] keeps
//! blobs as files under a directory and [`MemoryConfigStore`] keeps them in
//! memory for tests and embedding.

pub mod config;
mod fs;
mod memory;

pub use config::{validate_key, ConfigError, ConfigService, ConfigStore};
pub use fs::FsConfigStore;
pub use memory::MemoryConfigStore;
