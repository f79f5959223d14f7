use crate::context::Context;
use crate::entry::Entry;
use crate::errors::NodeResult;
use crate::geometry::Geometry;
use crate::node::{Leaf, LeafDefault};

use super::Factory;

/// Builds conventional leaves that keep entries as live values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl<T, S: Geometry> Factory<T, S> for DefaultFactory {
    fn create_leaf(&self, entries: Vec<Entry<T, S>>, context: &Context) -> NodeResult<Leaf<T, S>> {
        Ok(LeafDefault::new(entries, *context).into())
    }
}
