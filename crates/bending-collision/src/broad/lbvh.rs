// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Linear bounding volume hierarchy over Morton-sorted elements.
//!
//! Construction follows Karras, "Maximizing Parallelism in the Construction
//! of BVHs, Octrees, and k-d Trees" (HPG 2012): every internal node derives
//! its leaf range and split independently from the sorted keys, so the loop
//! below could run in parallel even though it runs sequentially here.
//!
//! Nodes live in two arenas (`n` leaves, `n - 1` internal nodes) and refer to
//! each other through [`NodeRef`] indices. Internal node `0` is the root; a
//! single-element hierarchy has no internal nodes and leaf `0` is the root.

use crate::broad::query::CollisionQuery;
use bending_geom::{combine, Aabb, Boundable, MortonEncoded};
use std::ptr;
use thiserror::Error;

/// Errors produced while building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LbvhError {
    /// A hierarchy needs at least one element.
    #[error("cannot build a hierarchy over zero elements")]
    Empty,
}

/// Child reference into one of the two node arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    /// Index into the leaf arena (equal to the element's sorted index).
    Leaf(usize),
    /// Index into the internal-node arena.
    Internal(usize),
}

#[derive(Debug, Clone)]
struct InternalNode {
    left: NodeRef,
    right: NodeRef,
    parent: Option<usize>,
    bounds: Aabb,
}

#[derive(Debug, Clone)]
struct LeafNode {
    parent: Option<usize>,
    bounds: Aabb,
}

/// Broad-phase hierarchy rebuilt from scratch every evaluation pass.
#[derive(Debug)]
pub struct Lbvh<E> {
    elements: Vec<E>,
    internal: Vec<InternalNode>,
    leaves: Vec<LeafNode>,
}

impl<E> Lbvh<E>
where
    E: Boundable + MortonEncoded,
{
    /// Sorts `elements` by Morton key and builds the hierarchy over them.
    ///
    /// The sort is stable, so elements sharing a key keep their input order.
    ///
    /// # Errors
    /// Returns [`LbvhError::Empty`] when `elements` is empty.
    pub fn build(mut elements: Vec<E>) -> Result<Self, LbvhError> {
        if elements.is_empty() {
            return Err(LbvhError::Empty);
        }
        elements.sort_by_key(MortonEncoded::morton);
        let keys: Vec<u32> = elements.iter().map(MortonEncoded::morton).collect();
        let n = elements.len();

        let mut leaves: Vec<LeafNode> = elements
            .iter()
            .map(|e| LeafNode {
                parent: None,
                bounds: e.bounds(),
            })
            .collect();

        let mut links: Vec<(NodeRef, NodeRef)> = Vec::with_capacity(n - 1);
        for idx in 0..n - 1 {
            let (first, last) = determine_range(&keys, idx);
            let split = find_split(&keys, first, last);
            let left = if split == first {
                NodeRef::Leaf(split)
            } else {
                NodeRef::Internal(split)
            };
            let right = if split + 1 == last {
                NodeRef::Leaf(split + 1)
            } else {
                NodeRef::Internal(split + 1)
            };
            links.push((left, right));
        }

        let mut parents: Vec<Option<usize>> = vec![None; n - 1];
        for (idx, &(left, right)) in links.iter().enumerate() {
            for child in [left, right] {
                match child {
                    NodeRef::Leaf(i) => leaves[i].parent = Some(idx),
                    NodeRef::Internal(i) => parents[i] = Some(idx),
                }
            }
        }

        let bounds = hierarchy_bounds(&links, &leaves);
        let internal = links
            .into_iter()
            .zip(parents)
            .zip(bounds)
            .map(|(((left, right), parent), bounds)| InternalNode {
                left,
                right,
                parent,
                bounds,
            })
            .collect();

        Ok(Self {
            elements,
            internal,
            leaves,
        })
    }
}

impl<E> Lbvh<E> {
    /// Number of indexed elements (leaves).
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always `false`: empty hierarchies cannot be built.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of internal nodes (`len() - 1`).
    pub fn internal_count(&self) -> usize {
        self.internal.len()
    }

    /// Elements in Morton order; leaf `i` wraps `elements()[i]`.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Consumes the hierarchy, returning the Morton-sorted elements.
    pub fn into_elements(self) -> Vec<E> {
        self.elements
    }

    /// The root node.
    pub fn root(&self) -> NodeRef {
        if self.internal.is_empty() {
            NodeRef::Leaf(0)
        } else {
            NodeRef::Internal(0)
        }
    }

    /// Bounds of `node`.
    pub fn bounds_of(&self, node: NodeRef) -> Aabb {
        match node {
            NodeRef::Leaf(i) => self.leaves[i].bounds,
            NodeRef::Internal(i) => self.internal[i].bounds,
        }
    }

    /// Bounds enclosing every element.
    pub fn root_bounds(&self) -> Aabb {
        self.bounds_of(self.root())
    }

    /// Children of an internal node; `None` for leaves.
    pub fn children(&self, node: NodeRef) -> Option<(NodeRef, NodeRef)> {
        match node {
            NodeRef::Leaf(_) => None,
            NodeRef::Internal(i) => Some((self.internal[i].left, self.internal[i].right)),
        }
    }

    /// Parent of `node` (always an internal node); `None` for the root.
    pub fn parent(&self, node: NodeRef) -> Option<usize> {
        match node {
            NodeRef::Leaf(i) => self.leaves[i].parent,
            NodeRef::Internal(i) => self.internal[i].parent,
        }
    }

    /// Internal node that owns leaf `leaf`; `None` when the leaf is the root.
    pub fn leaf_parent(&self, leaf: usize) -> Option<usize> {
        self.leaves[leaf].parent
    }

    /// Number of edges between leaf `leaf` and the root.
    pub fn leaf_depth(&self, leaf: usize) -> usize {
        let mut depth = 0;
        let mut cursor = self.leaves[leaf].parent;
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.internal[p].parent;
        }
        depth
    }

    /// Deepest leaf depth in the hierarchy.
    pub fn depth(&self) -> usize {
        (0..self.leaves.len())
            .map(|i| self.leaf_depth(i))
            .max()
            .unwrap_or(0)
    }
}

impl<E> Lbvh<E>
where
    E: Boundable,
{
    /// Finds every unordered pair of indexed elements whose bounds overlap.
    pub fn query_all(&self) -> CollisionQuery<'_, E> {
        let mut result = CollisionQuery::new();
        let mut stack = Vec::new();
        for element in &self.elements {
            self.descend(element, &mut stack, &mut result);
        }
        result
    }

    /// Finds every indexed element whose bounds overlap `element`.
    ///
    /// `element` may or may not belong to the hierarchy; if it does, it is not
    /// paired with itself.
    pub fn query<'a>(&'a self, element: &'a E) -> CollisionQuery<'a, E> {
        let mut result = CollisionQuery::new();
        let mut stack = Vec::new();
        self.descend(element, &mut stack, &mut result);
        result
    }

    // Depth-first, left before right; same visiting order as the recursive form.
    fn descend<'a>(
        &'a self,
        probe: &'a E,
        stack: &mut Vec<NodeRef>,
        out: &mut CollisionQuery<'a, E>,
    ) {
        let probe_bounds = probe.bounds();
        stack.clear();
        stack.push(self.root());
        while let Some(node) = stack.pop() {
            match node {
                NodeRef::Leaf(i) => {
                    let other = &self.elements[i];
                    if ptr::eq(other, probe) {
                        continue;
                    }
                    if probe_bounds.intersects(&self.leaves[i].bounds) {
                        out.add(probe, other);
                    }
                }
                NodeRef::Internal(i) => {
                    let inner = &self.internal[i];
                    if probe_bounds.intersects(&inner.bounds) {
                        stack.push(inner.right);
                        stack.push(inner.left);
                    }
                }
            }
        }
    }
}

fn common_prefix(a: u32, b: u32) -> u32 {
    (a ^ b).leading_zeros()
}

/// Leaf range `[first, last]` covered by internal node `idx`.
fn determine_range(keys: &[u32], idx: usize) -> (usize, usize) {
    let last = keys.len() - 1;
    if idx == 0 {
        return (0, last);
    }
    let curr = keys[idx];
    let prev = keys[idx - 1];
    let next = keys[idx + 1];

    // Inside a run of identical keys the prefix search has no direction; walk
    // forward to the end of the run instead.
    if prev == curr && next == curr {
        let mut end = idx;
        while end < last {
            end += 1;
            if end >= last || keys[end] != keys[end + 1] {
                break;
            }
        }
        return (idx, end);
    }

    let to_prev = common_prefix(curr, prev);
    let to_next = common_prefix(curr, next);
    let (dir, min_prefix): (isize, u32) = if to_prev > to_next {
        (-1, to_next)
    } else {
        (1, to_prev)
    };

    let origin = idx as isize;
    let in_bounds = |i: isize| i >= 0 && i <= last as isize;
    let extends = |i: isize| in_bounds(i) && common_prefix(curr, keys[i as usize]) > min_prefix;

    let mut span: isize = 2;
    while extends(origin + span * dir) {
        span *= 2;
    }

    let mut len: isize = 0;
    let mut div: isize = 2;
    while span / div >= 1 {
        let step = span / div;
        if extends(origin + (len + step) * dir) {
            len += step;
        }
        div *= 2;
    }

    let other = (origin + len * dir) as usize;
    if dir > 0 {
        (idx, other)
    } else {
        (other, idx)
    }
}

/// Index of the last leaf belonging to the left child of range `[first, last]`.
fn find_split(keys: &[u32], first: usize, last: usize) -> usize {
    let first_code = keys[first];
    let last_code = keys[last];
    if first_code == last_code {
        return first;
    }
    let node_prefix = common_prefix(first_code, last_code);

    let mut split = first;
    let mut step = last - first;
    loop {
        step = (step + 1) >> 1;
        let candidate = split + step;
        if candidate < last && common_prefix(first_code, keys[candidate]) > node_prefix {
            split = candidate;
        }
        if step <= 1 {
            break;
        }
    }
    split
}

/// Internal-node bounds, children before parents.
fn hierarchy_bounds(links: &[(NodeRef, NodeRef)], leaves: &[LeafNode]) -> Vec<Aabb> {
    let Some(first_leaf) = leaves.first() else {
        return Vec::new();
    };
    if links.is_empty() {
        return Vec::new();
    }

    // Pre-order from the root; reversed, every node follows its descendants.
    let mut order = Vec::with_capacity(links.len());
    let mut stack = vec![0_usize];
    while let Some(idx) = stack.pop() {
        order.push(idx);
        let (left, right) = links[idx];
        for child in [left, right] {
            if let NodeRef::Internal(c) = child {
                stack.push(c);
            }
        }
    }

    let mut bounds = vec![first_leaf.bounds; links.len()];
    for &idx in order.iter().rev() {
        let (left, right) = links[idx];
        let bound_of = |node: NodeRef| match node {
            NodeRef::Leaf(i) => leaves[i].bounds,
            NodeRef::Internal(i) => bounds[i],
        };
        let joined = combine(&bound_of(left), &bound_of(right));
        bounds[idx] = joined;
    }
    bounds
}
