// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Order-statistics queries.
//!
//! None of these mutate the tree. "Not found" is always reported as the sentinel handle.

use core::cmp::Ordering;

use crate::node::NodeId;
use crate::utils::{self, Side};
use crate::{Count, Error, Key, TreeMap};

impl TreeMap {
    /// Returns the node holding `key` or the sentinel.
    pub(crate) fn find(&self, key: Key) -> NodeId {
        let mut curr = self.root;

        while !curr.is_nil() {
            let node = self.store.get(curr);
            curr = match key.cmp(&node.key) {
                Ordering::Equal => return curr,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }

        NodeId::NIL
    }

    /// Returns the node with the greatest key `<= key` (`side == Left`) or the node with the
    /// smallest key `>= key` (`side == Right`), or the sentinel if there is none.
    ///
    /// Single descent that remembers the last node passed on the correct side of `key`.
    fn find_bound(&self, key: Key, side: Side) -> NodeId {
        let mut bound = NodeId::NIL;
        let mut curr = self.root;

        while !curr.is_nil() {
            let node = self.store.get(curr);
            match (key.cmp(&node.key), side) {
                (Ordering::Equal, _) => return curr,
                (Ordering::Greater, Side::Left) | (Ordering::Less, Side::Right) => {
                    bound = curr;
                }
                _ => {}
            }

            curr = if key < node.key { node.left } else { node.right };
        }

        bound
    }

    /// Strict neighbor of `key` towards `side`: the smallest key `> key` for `Right`, the
    /// greatest key `< key` for `Left`.
    pub(crate) fn strict_neighbor(&self, key: Key, side: Side) -> NodeId {
        if self.root.is_nil() {
            return NodeId::NIL;
        }

        // Everything in the tree lies beyond `key`, so the extreme node on the near end wins
        let nearest = utils::find_extreme(&self.store, self.root, side.opposite());
        let beyond = match side {
            Side::Right => key < self.store.key(nearest),
            Side::Left => key > self.store.key(nearest),
        };
        if beyond {
            return nearest;
        }

        // Otherwise there is a node on the near side of `key` (possibly `key` itself), and the
        // answer is its in-order neighbor.
        let enclosing = self.find_bound(key, side.opposite());
        debug_assert!(!enclosing.is_nil());
        utils::neighbor(&self.store, enclosing, side)
    }

    /// Sums the counts of all keys in `low..=high`, skipping subtrees that lie outside.
    pub(crate) fn sum_range(&self, node: NodeId, low: Key, high: Key) -> Result<Count, Error> {
        if node.is_nil() {
            return Ok(0);
        }

        let n = self.store.get(node);
        let mut sum = 0;

        if low < n.key {
            sum = self.sum_range(n.left, low, high)?;
        }
        if low <= n.key && n.key <= high {
            sum = checked_add(sum, n.count)?;
        }
        if high > n.key {
            sum = checked_add(sum, self.sum_range(n.right, low, high)?)?;
        }

        Ok(sum)
    }
}

fn checked_add(a: Count, b: Count) -> Result<Count, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}
