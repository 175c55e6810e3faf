// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision rules: which ability kinds interact and which side is removed.
//!
//! Rules are declared by ability name through [`CollisionPairBuilder`], either
//! as explicit pairs or as ordered layers, and resolved once at startup into an
//! immutable [`CollisionRules`] table keyed by the unordered pair of
//! [`AbilityKey`]s.
//!
//! When several declarations cover the same unordered pair, explicit pairs
//! take precedence over layer-derived ones, and within the same origin the
//! later declaration replaces the earlier one.

use crate::ident::AbilityKey;
use crate::registry::AbilityRegistry;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving ability names into rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A declaration named an ability that was never registered.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),
    /// The same ability name was registered twice.
    #[error("ability registered twice: {0}")]
    DuplicateAbility(String),
}

/// Order-independent key for a pair of ability kinds: `(min, max)`.
pub type PairKey = (AbilityKey, AbilityKey);

/// Canonical key for the unordered pair `{a, b}`.
pub fn pair_key(a: AbilityKey, b: AbilityKey) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A single rule: when `first` meets `second`, which of them is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    first: AbilityKey,
    second: AbilityKey,
    remove_first: bool,
    remove_second: bool,
}

impl CollisionPair {
    /// Creates a rule between `first` and `second`.
    pub fn new(first: AbilityKey, second: AbilityKey, remove_first: bool, remove_second: bool) -> Self {
        Self {
            first,
            second,
            remove_first,
            remove_second,
        }
    }

    /// Kind declared first.
    pub fn first(&self) -> AbilityKey {
        self.first
    }

    /// Kind declared second.
    pub fn second(&self) -> AbilityKey {
        self.second
    }

    /// Whether the first kind is removed on collision.
    pub fn remove_first(&self) -> bool {
        self.remove_first
    }

    /// Whether the second kind is removed on collision.
    pub fn remove_second(&self) -> bool {
        self.remove_second
    }

    /// Symmetric lookup key.
    pub fn key(&self) -> PairKey {
        pair_key(self.first, self.second)
    }

    /// Remove flags as `(remove_a, remove_b)` for the given orientation.
    ///
    /// `a` must be one of the pair's kinds; when it is `first` the flags are
    /// returned as declared, otherwise swapped.
    pub fn oriented(&self, a: AbilityKey) -> (bool, bool) {
        if a == self.first {
            (self.remove_first, self.remove_second)
        } else {
            (self.remove_second, self.remove_first)
        }
    }
}

impl fmt::Display for CollisionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (remove: {}) - {} (remove: {})",
            self.first, self.remove_first, self.second, self.remove_second
        )
    }
}

/// Immutable rule table looked up once per candidate pair per tick.
#[derive(Debug, Clone, Default)]
pub struct CollisionRules {
    rules: FxHashMap<PairKey, CollisionPair>,
}

impl CollisionRules {
    /// Rule covering `{a, b}`, in either order.
    pub fn get(&self, a: AbilityKey, b: AbilityKey) -> Option<&CollisionPair> {
        self.rules.get(&pair_key(a, b))
    }

    /// Remove flags `(remove_a, remove_b)` oriented to the argument order, or
    /// `None` when the two kinds do not interact.
    pub fn rule_for(&self, a: AbilityKey, b: AbilityKey) -> Option<(bool, bool)> {
        self.get(a, b).map(|pair| pair.oriented(a))
    }

    /// Number of distinct unordered pairs.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules were declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates every rule (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CollisionPair> + '_ {
        self.rules.values()
    }
}

#[derive(Debug, Clone)]
struct Declared {
    first: Vec<String>,
    second: Vec<String>,
    remove_first: bool,
    remove_second: bool,
}

/// Declarative builder for [`CollisionRules`].
///
/// Names are kept as written and resolved against an [`AbilityRegistry`] in
/// [`CollisionPairBuilder::build`], so declarations may be assembled before
/// every ability is registered.
#[derive(Debug, Clone, Default)]
pub struct CollisionPairBuilder {
    pairs: Vec<Declared>,
    layers: Vec<Vec<String>>,
}

#[derive(Clone, Copy, Debug)]
enum Origin {
    Layer,
    Explicit,
}

impl CollisionPairBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a rule for every `(f, s)` in `first × second`.
    ///
    /// A single name is a one-element batch: `add(["A"], ["B"], true, false)`.
    pub fn add<I, J, S, T>(&mut self, first: I, second: J, remove_first: bool, remove_second: bool) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.pairs.push(Declared {
            first: first.into_iter().map(Into::into).collect(),
            second: second.into_iter().map(Into::into).collect(),
            remove_first,
            remove_second,
        });
        self
    }

    /// Appends a layer.
    ///
    /// Kinds in the same layer cancel each other, including themselves. Every
    /// kind of an earlier layer is removed by every kind of a later layer,
    /// which survives.
    pub fn layer<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.push(names.into_iter().map(Into::into).collect());
        self
    }

    /// Number of explicit declarations (before cross-product expansion).
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Number of declared layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Resolves every declaration into a rule table.
    ///
    /// # Errors
    /// Returns [`RuleError::UnknownAbility`] for the first name the registry
    /// does not know.
    pub fn build(&self, registry: &AbilityRegistry) -> Result<CollisionRules, RuleError> {
        let mut table = RuleTable::default();

        let layers = self
            .layers
            .iter()
            .map(|layer| resolve_all(registry, layer))
            .collect::<Result<Vec<_>, _>>()?;
        for (i, layer) in layers.iter().enumerate() {
            for (a_idx, &a) in layer.iter().enumerate() {
                for &b in &layer[a_idx..] {
                    table.insert(CollisionPair::new(a, b, true, true), Origin::Layer);
                }
            }
            for higher in &layers[i + 1..] {
                for &lower in layer {
                    for &upper in higher {
                        table.insert(CollisionPair::new(lower, upper, true, false), Origin::Layer);
                    }
                }
            }
        }

        for declared in &self.pairs {
            let firsts = resolve_all(registry, &declared.first)?;
            let seconds = resolve_all(registry, &declared.second)?;
            for &f in &firsts {
                for &s in &seconds {
                    table.insert(
                        CollisionPair::new(f, s, declared.remove_first, declared.remove_second),
                        Origin::Explicit,
                    );
                }
            }
        }

        debug!(rules = table.rules.len(), "collision rules built");
        Ok(CollisionRules { rules: table.rules })
    }
}

fn resolve_all(registry: &AbilityRegistry, names: &[String]) -> Result<Vec<AbilityKey>, RuleError> {
    names.iter().map(|n| registry.get_or_err(n)).collect()
}

#[derive(Default)]
struct RuleTable {
    rules: FxHashMap<PairKey, CollisionPair>,
}

impl RuleTable {
    // Layers are inserted before explicit pairs, so replacing on every insert
    // yields explicit > layer and later > earlier within an origin.
    fn insert(&mut self, pair: CollisionPair, origin: Origin) {
        if let Some(previous) = self.rules.insert(pair.key(), pair) {
            if previous.oriented(pair.first) != pair.oriented(pair.first) {
                debug!(%previous, replacement = %pair, ?origin, "collision rule overridden");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> AbilityRegistry {
        let mut reg = AbilityRegistry::new();
        reg.register_all(names.iter().copied()).unwrap();
        reg
    }

    #[test]
    fn rule_is_symmetric_and_oriented() {
        let reg = registry(&["FireBlast", "AirSwipe"]);
        let mut b = CollisionPairBuilder::new();
        b.add(["FireBlast"], ["AirSwipe"], true, false);
        let rules = b.build(&reg).unwrap();

        let fire = reg.get("FireBlast").unwrap();
        let air = reg.get("AirSwipe").unwrap();
        assert_eq!(rules.rule_for(fire, air), Some((true, false)));
        assert_eq!(rules.rule_for(air, fire), Some((false, true)));
        assert_eq!(rules.get(fire, air), rules.get(air, fire));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn batch_add_expands_cross_product() {
        let reg = registry(&["A", "B", "C", "D"]);
        let mut b = CollisionPairBuilder::new();
        b.add(["A", "B"], ["C", "D"], false, true);
        let rules = b.build(&reg).unwrap();
        assert_eq!(rules.len(), 4);
        let a = reg.get("A").unwrap();
        let b_key = reg.get("B").unwrap();
        assert_eq!(rules.rule_for(a, b_key), None);
    }

    #[test]
    fn unknown_name_fails_build() {
        let reg = registry(&["A"]);
        let mut b = CollisionPairBuilder::new();
        b.layer(["A", "Typo"]);
        assert_eq!(b.build(&reg).unwrap_err(), RuleError::UnknownAbility("Typo".into()));
    }

    #[test]
    fn display_names_both_sides_and_flags() {
        let reg = registry(&["A", "B"]);
        let pair = CollisionPair::new(reg.get("A").unwrap(), reg.get("B").unwrap(), true, false);
        let text = pair.to_string();
        assert!(text.contains("(remove: true) - "), "{text}");
        assert!(text.ends_with("(remove: false)"), "{text}");
    }
}
