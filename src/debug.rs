extern crate std;

use core::ptr::NonNull;
use std::{collections::VecDeque, fmt, prelude::v1::*};

use crate::{Links, SplayNode, SplayTree};

impl<T, C> SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
{
    /// Writes the shape of the tree as a Graphviz digraph.
    ///
    /// Nodes are laid out one rank per tree level and labelled with `label`, which may include the
    /// node's augmentation. Missing children are drawn as points so that left and right stay
    /// distinguishable.
    pub fn dotgraph<W, F>(&self, name: &str, mut w: W, label: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(&T) -> String,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item<T> {
            Node(usize, NonNull<T>),
            Missing(usize),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(0, root));
        let mut next_id = 1;

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut edges = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let Some(item) = queue.pop_front() else {
                    break;
                };

                let (id, node) = match item {
                    Item::Node(id, node) => (id, node),
                    Item::Missing(id) => {
                        write!(w, "\"{name}-{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let text = label(unsafe { node.as_ref() }).replace('"', "\\\"");
                write!(w, "\"{name}-{id}\" [label=\"{text}\"]; ")?;

                let links = unsafe { T::links(node).as_ref() };
                for child in [links.left(), links.right()] {
                    let child_id = next_id;
                    next_id += 1;

                    queue.push_back(match child {
                        Some(child) => Item::Node(child_id, child),
                        None => Item::Missing(child_id),
                    });
                    writeln!(edges, "\"{name}-{id}\" -> \"{name}-{child_id}\";")?;
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&edges)?;

        w.write_str(" }\n}")
    }
}
