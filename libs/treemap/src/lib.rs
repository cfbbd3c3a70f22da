// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # An arena-backed red-black counter map.
//!
//! [`TreeMap`] maps integer keys to strictly positive integer counts and keeps them sorted in a
//! red-black tree. Besides point updates it answers the ordered questions a plain hash map
//! can't: the sum of all counts inside a key range, and the nearest key above or below any
//! probe (present in the map or not).
//!
//! Nodes live in a single `Vec` and refer to each other by index. Index 0 is a shared, always
//! black *sentinel* that stands in for every absent child and for the root's parent, which lets
//! the rebalancing code treat "no node" like any other black node.
//!
//! This crate is `no_std` but requires `alloc`.
//!
//! ## when to use this
//!
//! - **counting things by integer id** - repeated `increase`s of the same key merge, and an
//!   entry disappears on its own once `reduce` takes its count to zero or below.
//! - **range totals** - [`TreeMap::range_sum`] only visits the nodes on the two boundary paths
//!   plus the nodes inside the range.
//! - **bulk loading** - sorted input can be turned into a valid tree in linear time with
//!   [`TreeMap::from_sorted`], without a single rotation.
//!
//! ## features
//!
//! The following features are available:
//!
//! | Feature | Default | Explanation                                                                              |
//! |:--------|:--------|:-----------------------------------------------------------------------------------------|
//! | `dot`   | `false` | Enables the `TreeMap::dot` method, which allows display of the tree in [graphviz format] |
//!
//! [graphviz format]: https://graphviz.org/doc/info/lang.html

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bulk;
#[cfg(feature = "dot")]
mod dot;
mod dump;
mod error;
mod insert;
mod iter;
mod node;
mod query;
mod remove;
mod rotate;
mod utils;

use core::fmt;

#[cfg(feature = "dot")]
pub use crate::dot::Dot;
pub use crate::dump::{Dump, DumpEntry};
pub use crate::error::Error;
pub use crate::iter::Iter;
pub use crate::node::Color;
use crate::node::{NodeId, NodeStore};
use crate::utils::Side;

/// Type of the keys stored in a [`TreeMap`].
pub type Key = i64;
/// Type of the counts stored in a [`TreeMap`]. Stored counts are always `> 0`.
pub type Count = i64;

/// An ordered map from [`Key`] to a positive [`Count`].
pub struct TreeMap {
    pub(crate) store: NodeStore,
    pub(crate) root: NodeId,
    len: usize,
}

impl Default for TreeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TreeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl TreeMap {
    /// Creates a new, empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
            root: NodeId::NIL,
            len: 0,
        }
    }

    /// Creates a map from `pairs`, which must be strictly ascending by key with positive counts.
    ///
    /// Returns the map together with its height, see [`TreeMap::build_from_sorted`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`TreeMap::build_from_sorted`], except for [`Error::NotEmpty`].
    pub fn from_sorted(pairs: &[(Key, Count)]) -> Result<(Self, usize), Error> {
        let mut tree = Self::new();
        let height = tree.build_from_sorted(pairs)?;
        Ok((tree, height))
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `amount` to the count of `key`, inserting the key if it is absent.
    ///
    /// Returns the new count of `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::NonPositiveAmount`] if `amount <= 0`. The map is left unchanged.
    /// - [`Error::Overflow`] if the new count does not fit into a [`Count`].
    /// - [`Error::AllocError`] if a new node could not be allocated.
    pub fn increase(&mut self, key: Key, amount: Count) -> Result<Count, Error> {
        if amount <= 0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        self.insert(key, amount)
    }

    /// Subtracts `amount` from the count of `key`, removing the entry once its count drops to
    /// zero or below.
    ///
    /// Returns the remaining count, which is 0 if the key is absent or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveAmount`] if `amount <= 0`. The map is left unchanged.
    pub fn reduce(&mut self, key: Key, amount: Count) -> Result<Count, Error> {
        if amount <= 0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        let node = self.find(key);
        if node.is_nil() {
            return Ok(0);
        }

        // `count > 0` and `amount > 0`, so this can't wrap
        let remaining = self.store.get(node).count - amount;
        if remaining > 0 {
            self.store.get_mut(node).count = remaining;
            Ok(remaining)
        } else {
            tracing::trace!(key, "count dropped to zero, removing entry");
            self.remove_node(node);
            Ok(0)
        }
    }

    /// Returns the count of `key`, or 0 if the key is absent.
    #[must_use]
    pub fn count(&self, key: Key) -> Count {
        let node = self.find(key);
        if node.is_nil() {
            0
        } else {
            self.store.get(node).count
        }
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        !self.find(key).is_nil()
    }

    /// Returns the sum of counts of all keys in `low..=high`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRange`] if `low > high`.
    /// - [`Error::Overflow`] if the sum does not fit into a [`Count`].
    pub fn range_sum(&self, low: Key, high: Key) -> Result<Count, Error> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }

        self.sum_range(self.root, low, high)
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    ///
    /// `key` does not need to be present in the map.
    #[must_use]
    pub fn next(&self, key: Key) -> Option<(Key, Count)> {
        self.entry(self.strict_neighbor(key, Side::Right))
    }

    /// Returns the entry with the greatest key strictly less than `key`.
    ///
    /// `key` does not need to be present in the map.
    #[must_use]
    pub fn previous(&self, key: Key) -> Option<(Key, Count)> {
        self.entry(self.strict_neighbor(key, Side::Left))
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(Key, Count)> {
        if self.root.is_nil() {
            return None;
        }
        self.entry(utils::find_minimum(&self.store, self.root))
    }

    /// Returns the entry with the greatest key.
    #[must_use]
    pub fn max(&self) -> Option<(Key, Count)> {
        if self.root.is_nil() {
            return None;
        }
        self.entry(utils::find_maximum(&self.store, self.root))
    }

    /// Returns the depth of the deepest node (the root being at depth 0), or `None` if the map
    /// is empty.
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.subtree_height(self.root)
    }

    /// Returns an iterator over all entries, sorted by key.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let (head, tail) = if self.root.is_nil() {
            (NodeId::NIL, NodeId::NIL)
        } else {
            (
                utils::find_minimum(&self.store, self.root),
                utils::find_maximum(&self.store, self.root),
            )
        };

        Iter {
            head,
            tail,
            len: self.len,
            tree: self,
        }
    }

    /// Returns an iterator over all nodes in level order (breadth-first, left to right), along
    /// with their depth, color and parent key.
    ///
    /// Each call starts a fresh traversal.
    #[must_use]
    pub fn dump(&self) -> Dump<'_> {
        Dump::new(self)
    }

    /// Removes all entries from the map.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = NodeId::NIL;
        self.len = 0;
    }

    /// Returns a value that renders the tree in [graphviz] `dot` format when displayed.
    ///
    /// [graphviz]: https://graphviz.org/doc/info/lang.html
    #[cfg(feature = "dot")]
    #[must_use]
    pub fn dot(&self) -> Dot<'_> {
        Dot { tree: self }
    }

    /// Asserts all structural invariants of the tree and returns its black height.
    ///
    /// The black height is the number of black nodes on any path from the root down to the
    /// sentinel, excluding the sentinel itself.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[track_caller]
    pub fn assert_valid(&self) -> usize {
        let sentinel = self.store.get(NodeId::NIL);
        assert_eq!(sentinel.color, Color::Black, "sentinel must be black");
        assert!(
            sentinel.parent.is_nil() && sentinel.left.is_nil() && sentinel.right.is_nil(),
            "sentinel must only link to itself; sentinel = {sentinel:?}"
        );

        if self.root.is_nil() {
            assert_eq!(self.len, 0, "empty tree must have length 0");
            assert_eq!(self.store.live(), 0, "empty tree must not hold any nodes");
            return 0;
        }

        assert_eq!(
            self.store.color(self.root),
            Color::Black,
            "root must be black"
        );
        assert!(
            self.store.parent(self.root).is_nil(),
            "root's parent must be the sentinel"
        );

        let mut visited = 0;
        let black_height = self.assert_valid_inner(self.root, None, None, &mut visited);

        assert_eq!(
            visited, self.len,
            "tree length is {}, but {visited} nodes are reachable",
            self.len
        );
        assert_eq!(
            self.store.live(),
            self.len,
            "store holds {} nodes, but the tree has length {}",
            self.store.live(),
            self.len
        );

        black_height
    }

    #[track_caller]
    fn assert_valid_inner(
        &self,
        id: NodeId,
        lower: Option<Key>,
        upper: Option<Key>,
        visited: &mut usize,
    ) -> usize {
        if id.is_nil() {
            return 0;
        }

        *visited += 1;
        assert!(
            *visited <= self.store.live(),
            "more nodes reachable than allocated, the tree contains a cycle"
        );

        let node = self.store.get(id);
        assert!(
            node.count > 0,
            "count of key {} must be positive, but was {}",
            node.key,
            node.count
        );
        if let Some(lower) = lower {
            assert!(
                node.key > lower,
                "Ordering violation: key {} in right subtree of {lower}",
                node.key
            );
        }
        if let Some(upper) = upper {
            assert!(
                node.key < upper,
                "Ordering violation: key {} in left subtree of {upper}",
                node.key
            );
        }

        for side in [Side::Left, Side::Right] {
            let child = node.child(side);
            if child.is_nil() {
                continue;
            }

            assert_eq!(
                self.store.parent(child),
                id,
                "{side} child of {} does not link back to it",
                node.key
            );
            if node.color == Color::Red {
                assert_eq!(
                    self.store.color(child),
                    Color::Black,
                    "red node {} has a red {side} child",
                    node.key
                );
            }
        }

        let left = self.assert_valid_inner(node.left, lower, Some(node.key), visited);
        let right = self.assert_valid_inner(node.right, Some(node.key), upper, visited);
        assert_eq!(
            left, right,
            "black height below {} differs: left = {left}, right = {right}",
            node.key
        );

        left + usize::from(node.color == Color::Black)
    }

    fn subtree_height(&self, id: NodeId) -> Option<usize> {
        if id.is_nil() {
            return None;
        }

        let node = self.store.get(id);
        let below = self
            .subtree_height(node.left)
            .max(self.subtree_height(node.right));

        Some(below.map_or(0, |height| height + 1))
    }

    fn entry(&self, id: NodeId) -> Option<(Key, Count)> {
        if id.is_nil() {
            return None;
        }

        let node = self.store.get(id);
        Some((node.key, node.count))
    }
}
