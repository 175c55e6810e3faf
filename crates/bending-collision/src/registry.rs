// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry of known ability kinds.
//!
//! Collision declarations refer to abilities by name; the registry resolves
//! those names to [`AbilityKey`]s and rejects names that were never
//! registered so typos surface when the rules are built, not mid-game.

use crate::ident::{make_ability_key, AbilityKey};
use crate::pair::RuleError;
use rustc_hash::FxHashMap;

/// Name → key table populated while abilities are registered at startup.
#[derive(Debug, Default, Clone)]
pub struct AbilityRegistry {
    by_name: FxHashMap<String, AbilityKey>,
    names: FxHashMap<AbilityKey, String>,
}

impl AbilityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, returning its key.
    ///
    /// # Errors
    /// Returns [`RuleError::DuplicateAbility`] if the name was already registered.
    pub fn register(&mut self, name: &str) -> Result<AbilityKey, RuleError> {
        if self.by_name.contains_key(name) {
            return Err(RuleError::DuplicateAbility(name.to_owned()));
        }
        let key = make_ability_key(name);
        self.by_name.insert(name.to_owned(), key);
        self.names.insert(key, name.to_owned());
        Ok(key)
    }

    /// Registers every name in `names`.
    pub fn register_all<I, S>(&mut self, names: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.register(name.as_ref())?;
        }
        Ok(())
    }

    /// Resolves a registered name.
    pub fn get(&self, name: &str) -> Option<AbilityKey> {
        self.by_name.get(name).copied()
    }

    /// Resolves a registered name or fails with [`RuleError::UnknownAbility`].
    pub fn get_or_err(&self, name: &str) -> Result<AbilityKey, RuleError> {
        self.get(name)
            .ok_or_else(|| RuleError::UnknownAbility(name.to_owned()))
    }

    /// Name a key was registered under.
    pub fn name_of(&self, key: &AbilityKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Number of registered abilities.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = AbilityRegistry::new();
        registry.register("AirBlast").unwrap();
        let err = registry.register("AirBlast").unwrap_err();
        assert_eq!(err, RuleError::DuplicateAbility("AirBlast".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = AbilityRegistry::new();
        assert_eq!(
            registry.get_or_err("Nope").unwrap_err(),
            RuleError::UnknownAbility("Nope".into())
        );
    }

    #[test]
    fn keys_map_back_to_names() {
        let mut registry = AbilityRegistry::new();
        let key = registry.register("EarthBlast").unwrap();
        assert_eq!(registry.get("EarthBlast"), Some(key));
        assert_eq!(registry.name_of(&key), Some("EarthBlast"));
    }
}
