// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::TreeMap;
use crate::node::NodeId;
use crate::utils::Side;

impl TreeMap {
    /// Rotates the subtree rooted at `x` towards `side`.
    ///
    /// The child of `x` on the opposite side (`y`) takes over `x`'s position and `x` becomes
    /// `y`'s `side`-child. `y`'s former `side`-subtree moves over to `x`. A left rotation is
    /// `rotate(x, Side::Left)`, a right rotation `rotate(x, Side::Right)`.
    ///
    /// Colors are left untouched and the in-order sequence of keys is preserved.
    pub(crate) fn rotate(&mut self, x: NodeId, side: Side) {
        let y = self.store.child(x, side.opposite());
        debug_assert!(
            !y.is_nil(),
            "cannot rotate {side} at {x:?} without a {} child",
            side.opposite()
        );

        // make y's inner subtree the `opposite side`-child of x
        let inner = self.store.child(y, side);
        self.store.set_child(x, side.opposite(), inner);
        if !inner.is_nil() {
            self.store.set_parent(inner, x);
        }

        // lift y into x's place
        let parent = self.store.parent(x);
        self.store.set_parent(y, parent);
        self.replace_child(parent, x, y);

        // make x the `side`-child of y
        self.store.set_child(y, side, x);
        self.store.set_parent(x, y);
    }

    /// Points the link of `parent` that references `old` at `new` instead.
    ///
    /// If `parent` is the sentinel, `old` was the root and `new` becomes the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.store.left(parent) == old {
            self.store.set_child(parent, Side::Left, new);
        } else {
            debug_assert_eq!(self.store.right(parent), old, "{parent:?} is not the parent of {old:?}");
            self.store.set_child(parent, Side::Right, new);
        }
    }
}
