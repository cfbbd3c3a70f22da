// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::cmp::Ordering;

use crate::node::{Color, NodeId};
use crate::utils::Side;
use crate::{Count, Error, Key, TreeMap};

impl TreeMap {
    /// Adds `count` to the entry for `key`, linking in a new red node if there is none.
    ///
    /// Returns the resulting count of the entry.
    pub(crate) fn insert(&mut self, key: Key, count: Count) -> Result<Count, Error> {
        let mut parent = NodeId::NIL;
        let mut side = Side::Left;
        let mut curr = self.root;

        while !curr.is_nil() {
            let node = self.store.get(curr);

            side = match key.cmp(&node.key) {
                Ordering::Equal => {
                    // duplicate keys merge their counts, the structure stays the same
                    let total = node.count.checked_add(count).ok_or(Error::Overflow)?;
                    self.store.get_mut(curr).count = total;
                    return Ok(total);
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };

            parent = curr;
            curr = node.child(side);
        }

        let node = self.store.alloc(key, count, Color::Red)?;
        self.store.set_parent(node, parent);
        if parent.is_nil() {
            self.root = node;
        } else {
            self.store.set_child(parent, side, node);
        }
        self.len += 1;

        tracing::trace!(key, count, parent = ?parent, %side, "linked new node");

        self.balance_after_insert(node);

        Ok(count)
    }

    /// Restores the red-black invariants after `x` was linked in as a red leaf.
    ///
    /// The only invariant that can be broken is "no red node has a red child", between `x` and
    /// its parent. The violation is either pushed up the tree by recoloring (red uncle), or
    /// resolved with at most two rotations (black uncle).
    fn balance_after_insert(&mut self, mut x: NodeId) {
        // The sentinel parent of the root is black, so this also terminates at the root
        while self.store.is_red(self.store.parent(x)) {
            let mut parent = self.store.parent(x);
            // a red parent is never the root, so the grandparent is a real node
            let grandparent = self.store.parent(parent);
            debug_assert!(!grandparent.is_nil());

            let side = self.store.side_of(parent);
            let uncle = self.store.child(grandparent, side.opposite());

            if self.store.is_red(uncle) {
                tracing::trace!(node = ?x, "red uncle, recoloring");
                self.store.set_color(parent, Color::Black);
                self.store.set_color(uncle, Color::Black);
                self.store.set_color(grandparent, Color::Red);
                x = grandparent;
                continue;
            }

            if self.store.child(parent, side.opposite()) == x {
                tracing::trace!(node = ?x, "black uncle, inner child, rotating {side} at parent");
                // turn the inner child into an outer child
                x = parent;
                self.rotate(x, side);
                parent = self.store.parent(x);
            }

            tracing::trace!(node = ?x, "black uncle, outer child, rotating {} at grandparent", side.opposite());
            self.store.set_color(parent, Color::Black);
            self.store.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.store.set_color(root, Color::Black);
    }
}
