// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::TreeMap;
use crate::node::{Color, NodeId};
use crate::utils;

impl TreeMap {
    /// Unlinks the entry stored at `node` from the tree and releases one node.
    ///
    /// If `node` has two children, its in-order successor's entry is moved into `node` and the
    /// successor's node is the one that gets spliced out instead.
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        debug_assert!(!node.is_nil());

        // Figure out which node we need to splice out, it has at most one real child
        let spliced = if self.store.left(node).is_nil() || self.store.right(node).is_nil() {
            node
        } else {
            utils::find_minimum(&self.store, self.store.right(node))
        };

        let child = if self.store.left(spliced).is_nil() {
            self.store.right(spliced)
        } else {
            self.store.left(spliced)
        };

        // Replace `spliced` with its child. The child may be the sentinel, whose parent link
        // is pointed at the spliced node's parent so the fixup can walk up from it.
        let parent = self.store.parent(spliced);
        self.store.set_parent(child, parent);
        self.replace_child(parent, spliced, child);

        if spliced != node {
            let (key, count) = {
                let successor = self.store.get(spliced);
                (successor.key, successor.count)
            };
            let target = self.store.get_mut(node);
            target.key = key;
            target.count = count;
        }

        let removed_color = self.store.color(spliced);
        tracing::trace!(node = ?node, spliced = ?spliced, child = ?child, color = %removed_color, "spliced out node");

        // removing a red node leaves all black-heights untouched
        if removed_color == Color::Black {
            self.balance_after_remove(child);
        }

        self.store.release(spliced);
        self.store.reset_sentinel();
        self.len -= 1;
    }

    /// Restores the red-black invariants after a black node was spliced out above `x`.
    ///
    /// Every path through `x` is one black node short. The deficiency is either pushed up the
    /// tree (black sibling with black children) or resolved with at most three rotations.
    fn balance_after_remove(&mut self, mut x: NodeId) {
        while x != self.root && !self.store.is_red(x) {
            let parent = self.store.parent(x);
            let side = self.store.side_of(x);
            let mut sibling = self.store.child(parent, side.opposite());
            // the sibling subtree has a black-height of at least one, so it is a real node
            debug_assert!(!sibling.is_nil());

            if self.store.is_red(sibling) {
                tracing::trace!(node = ?x, "red sibling, rotating {side} at parent");
                self.store.set_color(sibling, Color::Black);
                self.store.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.store.child(parent, side.opposite());
            }

            let near = self.store.child(sibling, side);
            let far = self.store.child(sibling, side.opposite());

            if !self.store.is_red(near) && !self.store.is_red(far) {
                tracing::trace!(node = ?x, "black sibling with black children, moving up");
                self.store.set_color(sibling, Color::Red);
                x = parent;
                continue;
            }

            if !self.store.is_red(far) {
                tracing::trace!(node = ?x, "black sibling with red near child, rotating {} at sibling", side.opposite());
                self.store.set_color(near, Color::Black);
                self.store.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.store.child(parent, side.opposite());
            }

            tracing::trace!(node = ?x, "black sibling with red far child, rotating {side} at parent");
            let parent_color = self.store.color(parent);
            self.store.set_color(sibling, parent_color);
            self.store.set_color(parent, Color::Black);
            let far = self.store.child(sibling, side.opposite());
            self.store.set_color(far, Color::Black);
            self.rotate(parent, side);

            x = self.root;
        }

        self.store.set_color(x, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use rand::prelude::SliceRandom;

    use super::*;

    fn keys(tree: &TreeMap) -> Vec<i64> {
        tree.iter().map(|(key, _)| key).collect()
    }

    #[test]
    fn remove_only_node() {
        let mut tree = TreeMap::new();
        tree.insert(1, 1).unwrap();
        let root = tree.root;

        tree.remove_node(root);

        assert!(tree.is_empty());
        assert_eq!(tree.root, NodeId::NIL);
        assert_eq!(tree.store.live(), 0);
        tree.assert_valid();
    }

    #[test]
    fn remove_red_leaf_needs_no_fixup() {
        let mut tree = TreeMap::new();
        for key in [2, 1, 3] {
            tree.insert(key, 1).unwrap();
        }
        let one = tree.find(1);
        assert!(tree.store.is_red(one));

        tree.remove_node(one);

        assert_eq!(keys(&tree), [2, 3]);
        assert_eq!(tree.store.color(tree.root), Color::Black);
        tree.assert_valid();
    }

    #[test]
    fn remove_with_two_children_moves_successor() {
        let (mut tree, _) = TreeMap::from_sorted(&[(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]).unwrap();
        let root = tree.root;
        assert_eq!(tree.store.key(root), 3);

        tree.remove_node(root);

        // the root node now carries the successor's entry
        assert_eq!(tree.store.key(tree.root), 4);
        assert_eq!(tree.count(4), 40);
        assert_eq!(tree.count(3), 0);
        assert_eq!(keys(&tree), [1, 2, 4, 5]);
        tree.assert_valid();
    }

    #[test]
    fn remove_black_leaf_with_red_sibling() {
        let mut tree = TreeMap::new();
        for key in 1..=6 {
            tree.insert(key, 1).unwrap();
        }
        //        2
        //      /   \
        //     1     4 (red)
        //          / \
        //         3   5
        //              \
        //               6 (red)
        let one = tree.find(1);
        assert!(!tree.store.is_red(one));
        assert!(tree.store.is_red(tree.find(4)));

        tree.remove_node(one);

        assert_eq!(keys(&tree), [2, 3, 4, 5, 6]);
        tree.assert_valid();
    }

    #[test]
    fn remove_pushes_deficiency_up() {
        let (mut tree, height) = TreeMap::from_sorted(&(1..=7).map(|key| (key, 1)).collect::<Vec<_>>()).unwrap();
        assert_eq!(height, 2);

        for key in [1, 3, 5, 7, 2] {
            let node = tree.find(key);
            tree.remove_node(node);
            tree.assert_valid();
        }

        assert_eq!(keys(&tree), [4, 6]);
    }

    #[test]
    fn sentinel_is_restored_after_remove() {
        let mut tree = TreeMap::new();
        for key in 0..32 {
            tree.insert(key, 1).unwrap();
        }
        for key in (0..32).step_by(3) {
            let node = tree.find(key);
            tree.remove_node(node);

            let nil = tree.store.get(NodeId::NIL);
            assert_eq!(nil.parent, NodeId::NIL);
            assert_eq!(nil.color, Color::Black);
        }
        tree.assert_valid();
    }

    #[test]
    fn random_inserts_and_removals() {
        let mut tree = TreeMap::new();

        let mut rng = rand::rng();

        let mut nums = (0..500).collect::<Vec<_>>();
        nums.shuffle(&mut rng);

        for i in nums.clone() {
            tree.insert(i, 1).unwrap();
            tree.assert_valid();
        }

        nums.shuffle(&mut rng);

        for (removed, i) in nums.into_iter().enumerate() {
            let node = tree.find(i);
            assert!(!node.is_nil(), "{i} should still be present");
            tree.remove_node(node);
            tree.assert_valid();
            assert_eq!(tree.len(), 499 - removed);
        }

        assert!(tree.is_empty());
        assert_eq!(tree.store.live(), 0);
    }
}
