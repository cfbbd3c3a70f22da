// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Linear-time construction from presorted input.
//!
//! Instead of `n` individual insertions, the tree is built as a perfectly height-balanced BST
//! (every subtree root is the middle element of its range) with all nodes black, and then the
//! deepest level is painted red. All levels above the deepest one are full, so every path to a
//! sentinel crosses exactly `height` black nodes, and red nodes only appear as leaves.

use crate::node::{Color, NodeId};
use crate::utils::Side;
use crate::{Count, Error, Key, TreeMap};

impl TreeMap {
    /// Builds the tree from `pairs`, which must be strictly ascending by key with positive counts.
    ///
    /// Returns the height of the resulting tree (the depth of its deepest node, the root being
    /// at depth 0). Loading an empty slice leaves the tree empty and returns 0.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEmpty`] if the tree already holds entries.
    /// - [`Error::Unsorted`] if the keys are not strictly ascending.
    /// - [`Error::NonPositiveAmount`] if any count is zero or negative.
    /// - [`Error::AllocError`] if the nodes could not be allocated.
    pub fn build_from_sorted(&mut self, pairs: &[(Key, Count)]) -> Result<usize, Error> {
        if !self.is_empty() {
            return Err(Error::NotEmpty);
        }

        for (index, window) in pairs.windows(2).enumerate() {
            if window[0].0 >= window[1].0 {
                return Err(Error::Unsorted { index: index + 1 });
            }
        }
        if let Some(&(_, count)) = pairs.iter().find(|(_, count)| *count <= 0) {
            return Err(Error::NonPositiveAmount(count));
        }

        self.store.reserve(pairs.len())?;

        let mut max_depth = 0;
        let root = match self.build_balanced(pairs, 0, &mut max_depth) {
            Ok(root) => root,
            Err(err) => {
                // nodes of the partial build are not reachable from anywhere
                self.store.clear();
                return Err(err);
            }
        };
        self.root = root;
        self.store.set_parent(root, NodeId::NIL);
        self.len = pairs.len();

        self.color_balanced(max_depth);

        tracing::debug!(len = self.len, height = max_depth, "built tree from sorted input");

        Ok(max_depth)
    }

    /// Recursively links `pairs` into a perfectly balanced subtree of black nodes and returns its
    /// root. `max_depth` tracks the deepest level reached.
    fn build_balanced(
        &mut self,
        pairs: &[(Key, Count)],
        depth: usize,
        max_depth: &mut usize,
    ) -> Result<NodeId, Error> {
        if pairs.is_empty() {
            return Ok(NodeId::NIL);
        }

        let mid = (pairs.len() - 1) / 2;
        let (key, count) = pairs[mid];
        let node = self.store.alloc(key, count, Color::Black)?;
        *max_depth = (*max_depth).max(depth);

        let left = self.build_balanced(&pairs[..mid], depth + 1, max_depth)?;
        let right = self.build_balanced(&pairs[mid + 1..], depth + 1, max_depth)?;

        for (side, child) in [(Side::Left, left), (Side::Right, right)] {
            self.store.set_child(node, side, child);
            if !child.is_nil() {
                self.store.set_parent(child, node);
            }
        }

        Ok(node)
    }

    /// Paints every node on level `max_depth` red, unless that level is the root's.
    fn color_balanced(&mut self, max_depth: usize) {
        if max_depth == 0 {
            return;
        }

        let root = self.root;
        self.color_level(root, 0, max_depth);
    }

    fn color_level(&mut self, node: NodeId, depth: usize, max_depth: usize) {
        if node.is_nil() {
            return;
        }

        let (left, right) = (self.store.left(node), self.store.right(node));

        self.color_level(left, depth + 1, max_depth);
        if depth == max_depth {
            self.store.set_color(node, Color::Red);
        }
        self.color_level(right, depth + 1, max_depth);
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    fn pairs(n: i64) -> Vec<(Key, Count)> {
        (0..n).map(|key| (key * 2, key + 1)).collect()
    }

    #[test]
    fn heights_and_invariants() {
        for n in 0..=300 {
            let (tree, height) = TreeMap::from_sorted(&pairs(n)).unwrap();

            assert_eq!(tree.len(), usize::try_from(n).unwrap());
            tree.assert_valid();

            if n == 0 {
                assert_eq!(height, 0);
                assert_eq!(tree.height(), None);
            } else {
                // floor(log2(n))
                assert_eq!(height, usize::try_from(n.ilog2()).unwrap(), "n = {n}");
                assert_eq!(tree.height(), Some(height));
            }
        }
    }

    #[test]
    fn fifteen_keys_form_perfect_tree() {
        let (tree, height) = TreeMap::from_sorted(&pairs(15)).unwrap();
        assert_eq!(height, 3);
        assert_eq!(tree.store.key(tree.root), 14);

        let red = tree.dump().filter(|entry| entry.color == Color::Red).count();
        assert_eq!(red, 8);
        assert_eq!(tree.assert_valid(), 3);
    }

    #[test]
    fn middle_element_is_root() {
        let (tree, height) = TreeMap::from_sorted(&[(1, 1), (2, 1)]).unwrap();
        assert_eq!(height, 1);
        // mid = begin + (end - begin) / 2 rounds down
        assert_eq!(tree.store.key(tree.root), 1);
        assert!(tree.store.is_red(tree.store.right(tree.root)));
    }

    #[test]
    fn single_element_stays_black() {
        let (tree, height) = TreeMap::from_sorted(&[(7, 3)]).unwrap();
        assert_eq!(height, 0);
        assert_eq!(tree.store.color(tree.root), Color::Black);
        assert_eq!(tree.count(7), 3);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            TreeMap::from_sorted(&[(1, 1), (3, 1), (2, 1)]).unwrap_err(),
            Error::Unsorted { index: 2 }
        );
        assert_eq!(
            TreeMap::from_sorted(&[(1, 1), (1, 1)]).unwrap_err(),
            Error::Unsorted { index: 1 }
        );
        assert_eq!(
            TreeMap::from_sorted(&[(1, 1), (2, 0)]).unwrap_err(),
            Error::NonPositiveAmount(0)
        );
    }

    #[test]
    fn rejects_non_empty_tree() {
        let mut tree = TreeMap::new();
        tree.increase(1, 1).unwrap();

        assert_eq!(tree.build_from_sorted(&[(2, 1)]), Err(Error::NotEmpty));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn mutations_after_bulk_load() {
        let (mut tree, _) = TreeMap::from_sorted(&pairs(100)).unwrap();

        for key in (0..200).filter(|key| key % 2 == 1) {
            tree.increase(key, 1).unwrap();
            tree.assert_valid();
        }
        for key in (0..200).step_by(3) {
            tree.reduce(key, Count::MAX).unwrap();
            tree.assert_valid();
        }
    }
}
