// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier and hashing utilities.
use blake3::Hasher;

/// Canonical 256-bit hash used for ability kinds.
pub type Hash = [u8; 32];

/// Strongly typed identifier for an ability kind (e.g. `FireBlast`).
///
/// Produced by [`make_ability_key`] which hashes the ability name; keys are
/// totally ordered so a pair of them can be canonicalized as `(min, max)`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AbilityKey(pub Hash);

impl AbilityKey {
    /// Returns the canonical byte representation of this key.
    #[must_use]
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

/// Short form: the first eight bytes in lower-case hex.
impl std::fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Produces a stable, domain‑separated ability identifier (prefix `b"ability:"`) using BLAKE3.
pub fn make_ability_key(name: &str) -> AbilityKey {
    let mut hasher = Hasher::new();
    hasher.update(b"ability:");
    hasher.update(name.as_bytes());
    AbilityKey(hasher.finalize().into())
}

/// Opaque identity of a player or entity (a UUID's 128 bits).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EntityId(pub u128);
