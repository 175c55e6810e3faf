// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable collision declarations loaded through the config service.
//!
//! Stored as JSON under [`CONFIG_KEY`]:
//!
//! ```json
//! {
//!   "layers": [["AirSwipe", "FireBlast"], ["EarthBlast"]],
//!   "pairs": [
//!     { "first": ["WaterManipulation"], "second": ["FireBlast"],
//!       "remove_first": false, "remove_second": true }
//!   ]
//! }
//! ```

use crate::pair::{CollisionPairBuilder, CollisionRules, RuleError};
use crate::registry::AbilityRegistry;
use bending_config::{ConfigError, ConfigService, ConfigStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config key the declarations are stored under.
pub const CONFIG_KEY: &str = "collisions";

/// One explicit pair declaration (cross product of `first` and `second`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDeclaration {
    /// Kinds on the first side.
    pub first: Vec<String>,
    /// Kinds on the second side.
    pub second: Vec<String>,
    /// Remove the first side on collision.
    #[serde(default)]
    pub remove_first: bool,
    /// Remove the second side on collision.
    #[serde(default)]
    pub remove_second: bool,
}

/// The full ruleset document: ordered layers plus explicit pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionDeclarations {
    /// Layers from lowest (removed by everything above) to highest.
    #[serde(default)]
    pub layers: Vec<Vec<String>>,
    /// Explicit pairs; these override layer-derived rules.
    #[serde(default)]
    pub pairs: Vec<PairDeclaration>,
}

impl CollisionDeclarations {
    /// Loads the document stored under [`CONFIG_KEY`]; `Ok(None)` when absent.
    pub fn load<S: ConfigStore>(service: &ConfigService<S>) -> Result<Option<Self>, ConfigError> {
        service.load(CONFIG_KEY)
    }

    /// Loads the document, falling back to an empty ruleset on any failure.
    pub fn load_or_empty<S: ConfigStore>(service: &ConfigService<S>) -> Self {
        match Self::load(service) {
            Ok(Some(doc)) => doc,
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(error = %err, key = CONFIG_KEY, "failed to load collision declarations; using none");
                Self::default()
            }
        }
    }

    /// Persists the document under [`CONFIG_KEY`].
    pub fn save<S: ConfigStore>(&self, service: &ConfigService<S>) -> Result<(), ConfigError> {
        service.save(CONFIG_KEY, self)
    }

    /// Replays the document into a builder, layers first.
    pub fn to_builder(&self) -> CollisionPairBuilder {
        let mut builder = CollisionPairBuilder::new();
        for layer in &self.layers {
            builder.layer(layer.iter().cloned());
        }
        for pair in &self.pairs {
            builder.add(
                pair.first.iter().cloned(),
                pair.second.iter().cloned(),
                pair.remove_first,
                pair.remove_second,
            );
        }
        builder
    }

    /// Resolves the document against `registry`.
    ///
    /// # Errors
    /// Returns [`RuleError::UnknownAbility`] for unregistered names.
    pub fn build(&self, registry: &AbilityRegistry) -> Result<CollisionRules, RuleError> {
        self.to_builder().build(registry)
    }
}
