//! The node capability set shared by every tree node.
//!
//! A node is either a [`Leaf`] holding entries or a [`NonLeaf`] holding child
//! nodes. Structural algorithms match on that distinction only; which physical
//! representation backs a leaf is decided by the factory that built it and is
//! hidden behind [`Leaf`].

mod leaf;
mod non_leaf;

pub use leaf::{Entries, Leaf, LeafDefault};
pub use non_leaf::NonLeaf;

use crate::bounding_box::BoundingBox;
use crate::context::Context;

/// A node of the tree.
#[derive(Debug, Clone)]
pub enum Node<T, S> {
    Leaf(Leaf<T, S>),
    NonLeaf(NonLeaf<T, S>),
}

impl<T, S> Node<T, S> {
    /// Bounding box of everything below this node.
    pub fn mbr(&self) -> BoundingBox {
        match self {
            Node::Leaf(leaf) => leaf.mbr(),
            Node::NonLeaf(non_leaf) => non_leaf.mbr(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Entries of a leaf, or children of a non-leaf.
    pub fn count(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.count(),
            Node::NonLeaf(non_leaf) => non_leaf.count(),
        }
    }

    pub fn context(&self) -> &Context {
        match self {
            Node::Leaf(leaf) => leaf.context(),
            Node::NonLeaf(non_leaf) => non_leaf.context(),
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf<T, S>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::NonLeaf(_) => None,
        }
    }

    pub fn as_non_leaf(&self) -> Option<&NonLeaf<T, S>> {
        match self {
            Node::Leaf(_) => None,
            Node::NonLeaf(non_leaf) => Some(non_leaf),
        }
    }
}

impl<T, S> From<Leaf<T, S>> for Node<T, S> {
    fn from(leaf: Leaf<T, S>) -> Self {
        Node::Leaf(leaf)
    }
}

impl<T, S> From<NonLeaf<T, S>> for Node<T, S> {
    fn from(non_leaf: NonLeaf<T, S>) -> Self {
        Node::NonLeaf(non_leaf)
    }
}
