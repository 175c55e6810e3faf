// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-sided collision record handed to both abilities of a realized pair.
//!
//! The record owns the two remove flags. Each side sees it through a
//! [`CollisionView`] where "self" and "other" are swapped, so a side can veto
//! its own removal or request the other's without knowing which side it is.
//! Flags are `Cell`s: both views share them while the caller holds only
//! shared borrows of the record.

use crate::system::Ability;
use std::cell::Cell;

/// Per-pair, per-tick resolution state.
#[derive(Debug)]
pub struct CollisionResolution<C> {
    first: usize,
    second: usize,
    first_collider: C,
    second_collider: C,
    remove_first: Cell<bool>,
    remove_second: Cell<bool>,
}

impl<C> CollisionResolution<C> {
    /// Creates a record for instances `first` and `second` (indices into the
    /// tick's ability slice) with flags initialised from the matching rule.
    pub fn new(
        first: usize,
        second: usize,
        first_collider: C,
        second_collider: C,
        remove_first: bool,
        remove_second: bool,
    ) -> Self {
        Self {
            first,
            second,
            first_collider,
            second_collider,
            remove_first: Cell::new(remove_first),
            remove_second: Cell::new(remove_second),
        }
    }

    /// Index of the first instance.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Index of the second instance.
    pub fn second(&self) -> usize {
        self.second
    }

    /// Collider of the first instance that touched the second.
    pub fn first_collider(&self) -> &C {
        &self.first_collider
    }

    /// Collider of the second instance that touched the first.
    pub fn second_collider(&self) -> &C {
        &self.second_collider
    }

    /// Current remove flag of the first instance.
    pub fn remove_first(&self) -> bool {
        self.remove_first.get()
    }

    /// Current remove flag of the second instance.
    pub fn remove_second(&self) -> bool {
        self.remove_second.get()
    }

    /// Overrides the first instance's remove flag.
    pub fn set_remove_first(&self, remove: bool) {
        self.remove_first.set(remove);
    }

    /// Overrides the second instance's remove flag.
    pub fn set_remove_second(&self, remove: bool) {
        self.remove_second.set(remove);
    }

    /// Indices of the instances that must be removed, first before second.
    pub fn removed(&self) -> impl Iterator<Item = usize> {
        [
            (self.first, self.remove_first.get()),
            (self.second, self.remove_second.get()),
        ]
        .into_iter()
        .filter_map(|(idx, remove)| remove.then_some(idx))
    }
}

impl<C> CollisionResolution<C> {
    /// View from the first instance's side; `other` is the second instance.
    pub fn first_view<'a, A>(&'a self, other: &'a A) -> CollisionView<'a, A>
    where
        A: Ability<Collider = C>,
    {
        CollisionView {
            record: self,
            other,
            is_first: true,
        }
    }

    /// View from the second instance's side; `other` is the first instance.
    pub fn second_view<'a, A>(&'a self, other: &'a A) -> CollisionView<'a, A>
    where
        A: Ability<Collider = C>,
    {
        CollisionView {
            record: self,
            other,
            is_first: false,
        }
    }
}

/// One side's view of a [`CollisionResolution`].
pub struct CollisionView<'a, A: Ability> {
    record: &'a CollisionResolution<A::Collider>,
    other: &'a A,
    is_first: bool,
}

impl<'a, A: Ability> CollisionView<'a, A> {
    /// The ability this side collided with.
    pub fn collided_ability(&self) -> &'a A {
        self.other
    }

    /// Slice index of this side's instance.
    pub fn self_index(&self) -> usize {
        if self.is_first {
            self.record.first
        } else {
            self.record.second
        }
    }

    /// Slice index of the other instance.
    pub fn other_index(&self) -> usize {
        if self.is_first {
            self.record.second
        } else {
            self.record.first
        }
    }

    /// This side's collider that made contact.
    pub fn collider_self(&self) -> &'a A::Collider {
        if self.is_first {
            &self.record.first_collider
        } else {
            &self.record.second_collider
        }
    }

    /// The other side's collider that made contact.
    pub fn collider_other(&self) -> &'a A::Collider {
        if self.is_first {
            &self.record.second_collider
        } else {
            &self.record.first_collider
        }
    }

    /// Whether this side will be removed.
    pub fn remove_self(&self) -> bool {
        self.own_flag().get()
    }

    /// Whether the other side will be removed.
    pub fn remove_other(&self) -> bool {
        self.other_flag().get()
    }

    /// Sets whether this side will be removed.
    pub fn set_remove_self(&self, remove: bool) {
        self.own_flag().set(remove);
    }

    /// Sets whether the other side will be removed.
    pub fn set_remove_other(&self, remove: bool) {
        self.other_flag().set(remove);
    }

    fn own_flag(&self) -> &'a Cell<bool> {
        if self.is_first {
            &self.record.remove_first
        } else {
            &self.record.remove_second
        }
    }

    fn other_flag(&self) -> &'a Cell<bool> {
        if self.is_first {
            &self.record.remove_second
        } else {
            &self.record.remove_first
        }
    }
}

impl<A: Ability> std::fmt::Debug for CollisionView<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionView")
            .field("self_index", &self.self_index())
            .field("other_index", &self.other_index())
            .field("remove_self", &self.remove_self())
            .field("remove_other", &self.remove_other())
            .finish()
    }
}
