//! Internal nodes.

use crate::bounding_box::BoundingBox;
use crate::context::Context;

use super::Node;

/// An internal node that owns its children.
///
/// Internal nodes are always conventional whatever the leaf representation:
/// they hold references to other nodes, not payloads, so compacting them would
/// save little.
#[derive(Debug, Clone)]
pub struct NonLeaf<T, S> {
    children: Vec<Node<T, S>>,
    mbr: BoundingBox,
    context: Context,
}

impl<T, S> NonLeaf<T, S> {
    pub fn new(children: Vec<Node<T, S>>, context: Context) -> Self {
        let mbr = BoundingBox::union_all(children.iter().map(Node::mbr));
        Self {
            children,
            mbr,
            context,
        }
    }

    pub fn children(&self) -> &[Node<T, S>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node<T, S>> {
        self.children.get(index)
    }

    pub fn count(&self) -> usize {
        self.children.len()
    }

    pub fn mbr(&self) -> BoundingBox {
        self.mbr
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_children(self) -> Vec<Node<T, S>> {
        self.children
    }
}
