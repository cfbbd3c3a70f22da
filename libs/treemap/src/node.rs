// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Arena storage for tree nodes.
//!
//! All nodes of a [`TreeMap`](crate::TreeMap) live in a single `Vec` and refer to each other
//! through [`NodeId`] indices. Slot zero is reserved for the sentinel: a permanently BLACK node
//! that stands in for every absent child and for the parent of the root. Parent links are plain
//! back-references into the same arena, only the tree structure itself (root and child links)
//! determines which slots are alive.

use alloc::vec::Vec;
use core::fmt;

use crate::utils::Side;
use crate::{Count, Error, Key};

/// Handle of a node inside a [`NodeStore`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The sentinel node.
    pub(crate) const NIL: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("NIL")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// The color of a node in the red-black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red nodes never have a red child and don't count towards the black-height.
    Red,
    /// Black nodes; the root and the sentinel are always black.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) count: Count,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    /// The sentinel's key and count are never read, only its color and identity matter.
    const SENTINEL: Node = Node::new(0, 0, Color::Black);

    const fn new(key: Key, count: Count, color: Color) -> Self {
        Self {
            key,
            count,
            color,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    fn child_mut(&mut self, side: Side) -> &mut NodeId {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

pub(crate) struct NodeStore {
    nodes: Vec<Node>,
    /// Released slots, handed out again before the arena grows.
    free: Vec<NodeId>,
}

impl NodeStore {
    pub(crate) fn new() -> Self {
        Self {
            nodes: alloc::vec![Node::SENTINEL],
            free: Vec::new(),
        }
    }

    /// Makes sure `additional` nodes can be allocated without growing the arena.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let additional = additional.saturating_sub(self.free.len());
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Allocates a detached node, both children and the parent reference the sentinel.
    pub(crate) fn alloc(&mut self, key: Key, count: Count, color: Color) -> Result<NodeId, Error> {
        let node = Node::new(key, count, color);

        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return Ok(id);
        }

        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Returns a node's slot to the store. The node must already be unlinked from the tree.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(!id.is_nil(), "the sentinel cannot be released");

        self.nodes[id.index()] = Node::SENTINEL;
        self.free.push(id);
    }

    /// Drops every node but the sentinel.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.reset_sentinel();
    }

    /// Restores the sentinel to BLACK and self-linked.
    ///
    /// The deletion path temporarily points the sentinel's parent at the spliced node's parent,
    /// this undoes that once rebalancing is done.
    pub(crate) fn reset_sentinel(&mut self) {
        self.nodes[NodeId::NIL.index()] = Node::SENTINEL;
    }

    /// The number of nodes currently handed out.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        debug_assert!(!id.is_nil(), "the sentinel's payload is never written");
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> Key {
        debug_assert!(!id.is_nil(), "the sentinel's key is never read");
        self.get(id).key
    }

    #[inline]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.get(id).color
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).parent
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.get(id).left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.get(id).right
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> NodeId {
        self.get(id).child(side)
    }

    /// Returns on which side of its parent `id` hangs.
    ///
    /// For the sentinel this relies on its parent link having been set by the deletion path.
    #[inline]
    pub(crate) fn side_of(&self, id: NodeId) -> Side {
        if self.left(self.parent(id)) == id {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Sets the parent link. Unlike every other setter this may target the sentinel.
    #[inline]
    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.index()].parent = parent;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        *self.get_mut(id).child_mut(side) = child;
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        // Painting the sentinel black is a harmless no-op the fixups rely on
        if id.is_nil() {
            debug_assert_eq!(color, Color::Black, "the sentinel must stay black");
            return;
        }
        self.get_mut(id).color = color;
    }
}
