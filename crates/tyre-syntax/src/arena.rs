//! Node storage for one source unit.

use crate::base::NodeIndex;
use crate::node::{Node, NodeData};
use tyre_common::Span;

/// Flat storage of a unit's nodes. Children are added before their parents;
/// adding a parent fills in the children's `parent` links.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and link its children back to it.
    pub fn add(&mut self, data: NodeData, span: Span) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len() as u32);
        for child in data.children() {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = idx;
            }
        }
        self.nodes.push(Node {
            data,
            span,
            parent: NodeIndex::NONE,
        });
        idx
    }

    #[inline]
    #[must_use]
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        if idx.is_none() {
            return None;
        }
        self.nodes.get(idx.0 as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut Node> {
        if idx.is_none() {
            return None;
        }
        self.nodes.get_mut(idx.0 as usize)
    }

    #[inline]
    #[must_use]
    pub fn data(&self, idx: NodeIndex) -> Option<&NodeData> {
        self.get(idx).map(|node| &node.data)
    }

    #[must_use]
    pub fn parent(&self, idx: NodeIndex) -> NodeIndex {
        self.get(idx).map_or(NodeIndex::NONE, |node| node.parent)
    }

    #[must_use]
    pub fn span(&self, idx: NodeIndex) -> Span {
        self.get(idx).map_or_else(Span::default, |node| node.span)
    }

    #[must_use]
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.data(idx).map_or_else(Vec::new, NodeData::children)
    }

    /// Ancestors of `idx`, nearest first (excluding `idx` itself).
    pub fn ancestors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut current = self.parent(idx);
        std::iter::from_fn(move || {
            if current.is_none() {
                return None;
            }
            let out = current;
            current = self.parent(current);
            Some(out)
        })
    }
}
