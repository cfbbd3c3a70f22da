// Copyright 2025 Jonas Kruckenberg
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use core::fmt;

use crate::TreeMap;
use crate::node::{Color, NodeId};
use crate::utils::Side;

/// Renders a [`TreeMap`] in [graphviz] `dot` format, see [`TreeMap::dot`].
///
/// [graphviz]: https://graphviz.org/doc/info/lang.html
pub struct Dot<'a> {
    pub(crate) tree: &'a TreeMap,
}

impl Dot<'_> {
    fn node_fmt(&self, f: &mut fmt::Formatter, id: NodeId) -> fmt::Result {
        let node = self.tree.store.get(id);
        let key = node.key;

        let fill = match node.color {
            Color::Red => "red",
            Color::Black => "black",
        };
        writeln!(
            f,
            r#"  {key} [label="{key} ({count})" style=filled fillcolor={fill} fontcolor=white];"#,
            count = node.count,
        )?;

        for side in [Side::Left, Side::Right] {
            let child = node.child(side);
            if !child.is_nil() {
                writeln!(
                    f,
                    r#"  {key} -> {} [label="{side}"];"#,
                    self.tree.store.key(child)
                )?;
                self.node_fmt(f, child)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph {\n")?;
        if !self.tree.root.is_nil() {
            self.node_fmt(f, self.tree.root)?;
        }
        f.write_str("}\n")
    }
}

impl fmt::Debug for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
