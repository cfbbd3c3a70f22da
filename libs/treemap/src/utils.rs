// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;

use crate::node::{NodeId, NodeStore};

/// A direction in the tree. Mirrored rebalancing cases are written once in terms of a `Side`
/// and its [`opposite`](Side::opposite).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Descends towards `side` until the next step would reach the sentinel.
///
/// Returns the sentinel only if `curr` is the sentinel.
pub(crate) fn find_extreme(store: &NodeStore, mut curr: NodeId, side: Side) -> NodeId {
    if curr.is_nil() {
        return curr;
    }

    loop {
        let next = store.child(curr, side);
        if next.is_nil() {
            return curr;
        }
        curr = next;
    }
}

pub(crate) fn find_minimum(store: &NodeStore, curr: NodeId) -> NodeId {
    find_extreme(store, curr, Side::Left)
}

pub(crate) fn find_maximum(store: &NodeStore, curr: NodeId) -> NodeId {
    find_extreme(store, curr, Side::Right)
}

/// Returns the in-order neighbor of `node` towards `side` (`Right` is the successor, `Left` the
/// predecessor) or the sentinel if `node` is the last node in that direction.
pub(crate) fn neighbor(store: &NodeStore, mut node: NodeId, side: Side) -> NodeId {
    debug_assert!(!node.is_nil());

    let child = store.child(node, side);
    if !child.is_nil() {
        return find_extreme(store, child, side.opposite());
    }

    let mut parent = store.parent(node);
    while !parent.is_nil() && store.child(parent, side) == node {
        node = parent;
        parent = store.parent(node);
    }
    parent
}

pub(crate) fn successor(store: &NodeStore, node: NodeId) -> NodeId {
    neighbor(store, node, Side::Right)
}

pub(crate) fn predecessor(store: &NodeStore, node: NodeId) -> NodeId {
    neighbor(store, node, Side::Left)
}
