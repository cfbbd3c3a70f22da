// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use alloc::collections::VecDeque;
use core::iter::FusedIterator;

use crate::node::{Color, NodeId};
use crate::{Count, Key, TreeMap};

/// A node as seen by [`TreeMap::dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpEntry {
    /// Depth of the node, the root is at level 0.
    pub level: usize,
    /// The key of the entry.
    pub key: Key,
    /// The count stored for the key.
    pub count: Count,
    /// The node's color.
    pub color: Color,
    /// Key of the parent node, `None` for the root.
    pub parent: Option<Key>,
}

/// Level-order (breadth-first) traversal of a [`TreeMap`], see [`TreeMap::dump`].
pub struct Dump<'a> {
    pub(crate) queue: VecDeque<(NodeId, usize)>,
    pub(crate) tree: &'a TreeMap,
}

impl Dump<'_> {
    pub(crate) fn new(tree: &TreeMap) -> Dump<'_> {
        let mut queue = VecDeque::new();
        if !tree.root.is_nil() {
            queue.push_back((tree.root, 0));
        }

        Dump { queue, tree }
    }
}

impl Iterator for Dump<'_> {
    type Item = DumpEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, level) = self.queue.pop_front()?;
        let store = &self.tree.store;
        let node = store.get(id);

        for child in [node.left, node.right] {
            if !child.is_nil() {
                self.queue.push_back((child, level + 1));
            }
        }

        Some(DumpEntry {
            level,
            key: node.key,
            count: node.count,
            color: node.color,
            parent: (!node.parent.is_nil()).then(|| store.key(node.parent)),
        })
    }
}

impl FusedIterator for Dump<'_> {}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn empty_tree_dumps_nothing() {
        assert_eq!(TreeMap::new().dump().count(), 0);
    }

    #[test]
    fn level_order() {
        let (tree, _) = TreeMap::from_sorted(&[(1, 5), (3, 2), (7, 9)]).unwrap();

        let entries = tree.dump().collect::<Vec<_>>();
        assert_eq!(
            entries,
            [
                DumpEntry { level: 0, key: 3, count: 2, color: Color::Black, parent: None },
                DumpEntry { level: 1, key: 1, count: 5, color: Color::Red, parent: Some(3) },
                DumpEntry { level: 1, key: 7, count: 9, color: Color::Red, parent: Some(3) },
            ]
        );
    }

    #[test]
    fn dump_is_restartable() {
        let (mut tree, _) = TreeMap::from_sorted(&(0..20).map(|key| (key, 1)).collect::<Vec<_>>()).unwrap();

        let first = tree.dump().collect::<Vec<_>>();
        let second = tree.dump().collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
        assert!(first.windows(2).all(|w| w[0].level <= w[1].level));

        tree.reduce(0, 1).unwrap();
        assert_eq!(tree.dump().count(), 19);
    }
}
