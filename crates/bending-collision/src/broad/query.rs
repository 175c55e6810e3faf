// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::FxHashSet;
use std::ptr;

/// Unordered candidate pairs produced by a hierarchy query.
///
/// Pair identity is element identity: `(a, b)` and `(b, a)` are the same
/// pair, and an element is never paired with itself. Elements are compared by
/// address, so `E` must not be a zero-sized type.
///
/// Iteration follows insertion order, which is deterministic for a given
/// hierarchy because traversal order is.
#[derive(Debug)]
pub struct CollisionQuery<'a, E> {
    pairs: Vec<(&'a E, &'a E)>,
    seen: FxHashSet<(usize, usize)>,
}

impl<E> Default for CollisionQuery<'_, E> {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            seen: FxHashSet::default(),
        }
    }
}

impl<'a, E> CollisionQuery<'a, E> {
    /// Creates an empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the unordered pair `{a, b}`.
    ///
    /// Returns `false` when the pair was already present or `a` and `b` are
    /// the same element.
    pub fn add(&mut self, a: &'a E, b: &'a E) -> bool {
        if ptr::eq(a, b) {
            return false;
        }
        if self.seen.insert(pair_key(a, b)) {
            self.pairs.push((a, b));
            true
        } else {
            false
        }
    }

    /// Returns `true` if `{a, b}` was recorded, in either order.
    pub fn contains(&self, a: &E, b: &E) -> bool {
        self.seen.contains(&pair_key(a, b))
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair was found.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a E, &'a E)> + '_ {
        self.pairs.iter().copied()
    }

    /// Consumes the result, returning the pairs in discovery order.
    pub fn into_pairs(self) -> Vec<(&'a E, &'a E)> {
        self.pairs
    }
}

impl<'a, E> IntoIterator for CollisionQuery<'a, E> {
    type Item = (&'a E, &'a E);
    type IntoIter = std::vec::IntoIter<(&'a E, &'a E)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

fn pair_key<E>(a: &E, b: &E) -> (usize, usize) {
    let x = ptr::from_ref(a).addr();
    let y = ptr::from_ref(b).addr();
    (x.min(y), x.max(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_pair_is_a_duplicate() {
        let items = [1_u32, 2, 3];
        let mut q = CollisionQuery::new();
        assert!(q.add(&items[0], &items[1]));
        assert!(!q.add(&items[1], &items[0]));
        assert!(q.add(&items[1], &items[2]));
        assert_eq!(q.len(), 2);
        assert!(q.contains(&items[1], &items[0]));
        assert!(!q.contains(&items[0], &items[2]));
    }

    #[test]
    fn self_pair_is_rejected() {
        let items = [7_u32];
        let mut q = CollisionQuery::new();
        assert!(!q.add(&items[0], &items[0]));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_values_at_distinct_addresses_are_distinct_elements() {
        let items = [5_u32, 5];
        let mut q = CollisionQuery::new();
        assert!(q.add(&items[0], &items[1]));
        assert_eq!(q.len(), 1);
    }
}
