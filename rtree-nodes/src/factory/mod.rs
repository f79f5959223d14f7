//! Node factories.
//!
//! A tree is configured with exactly one [`Factory`] when it is built and asks
//! it for every new node: a leaf when entries are (re)distributed, a non-leaf
//! when children are. The factory decides which physical leaf representation
//! backs the result; the tree only ever sees [`Leaf`] and [`NonLeaf`].
//!
//! - [`DefaultFactory`]: leaves hold their entries as live values
//! - [`CompactFactory`]: leaves hold their entries as one encoded buffer

mod compact_factory;
mod default_factory;

pub use compact_factory::{CompactFactory, CompactFactoryBuilder};
pub use default_factory::DefaultFactory;

use crate::context::Context;
use crate::entry::Entry;
use crate::errors::NodeResult;
use crate::geometry::Geometry;
use crate::node::{Leaf, Node, NonLeaf};

/// Builds the nodes of one tree.
///
/// Implementations hold no per-call state and may be shared by every thread
/// operating on the tree.
pub trait Factory<T, S: Geometry>: Send + Sync {
    /// Builds a leaf holding `entries` in the given order.
    ///
    /// An empty `entries` is accepted; fill limits are the tree's concern.
    fn create_leaf(&self, entries: Vec<Entry<T, S>>, context: &Context) -> NodeResult<Leaf<T, S>>;

    /// Builds an internal node owning `children`.
    ///
    /// Internal nodes are always conventional.
    fn create_non_leaf(&self, children: Vec<Node<T, S>>, context: &Context) -> NonLeaf<T, S> {
        NonLeaf::new(children, *context)
    }

    fn create_entry(&self, value: T, geometry: S) -> Entry<T, S> {
        Entry::new(value, geometry)
    }
}
