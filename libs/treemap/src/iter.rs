// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::iter::FusedIterator;

use crate::node::NodeId;
use crate::{Count, Key, TreeMap, utils};

/// An iterator over the `(key, count)` entries of a [`TreeMap`], sorted by key.
pub struct Iter<'a> {
    pub(crate) head: NodeId,
    pub(crate) tail: NodeId,
    pub(crate) len: usize,
    pub(crate) tree: &'a TreeMap,
}

impl Clone for Iter<'_> {
    #[inline]
    fn clone(&self) -> Self {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            tree: self.tree,
        }
    }
}

impl Iter<'_> {
    fn entry(&self, id: NodeId) -> (Key, Count) {
        let node = self.tree.store.get(id);
        (node.key, node.count)
    }
}

impl Iterator for Iter<'_> {
    type Item = (Key, Count);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;

        self.len -= 1;
        self.head = utils::successor(&self.tree.store, head);

        Some(self.entry(head))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let tail = self.tail;

        self.len -= 1;
        self.tail = utils::predecessor(&self.tree.store, tail);

        Some(self.entry(tail))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a TreeMap {
    type Item = (Key, Count);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn forward_and_backward() {
        let mut tree = TreeMap::new();
        for key in [5, 1, 9, 3, 7] {
            tree.increase(key, key).unwrap();
        }

        assert_eq!(
            tree.iter().collect::<Vec<_>>(),
            [(1, 1), (3, 3), (5, 5), (7, 7), (9, 9)]
        );
        assert_eq!(
            tree.iter().rev().map(|(key, _)| key).collect::<Vec<_>>(),
            [9, 7, 5, 3, 1]
        );
    }

    #[test]
    fn meets_in_the_middle() {
        let mut tree = TreeMap::new();
        for key in 0..4 {
            tree.increase(key, 1).unwrap();
        }

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((0, 1)));
        assert_eq!(iter.next_back(), Some((3, 1)));
        assert_eq!(iter.next(), Some((1, 1)));
        assert_eq!(iter.next_back(), Some((2, 1)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn empty() {
        let tree = TreeMap::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!((&tree).into_iter().next_back(), None);
    }
}
