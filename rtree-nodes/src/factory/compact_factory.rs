use std::fmt;
use std::sync::Arc;

use crate::codec::{Codec, Deserializer, Serializer};
use crate::context::Context;
use crate::entry::Entry;
use crate::errors::{NodeError, NodeResult};
use crate::flat::CompactLeaf;
use crate::geometry::Geometry;
use crate::node::Leaf;

use super::Factory;

/// Builds compact leaves that store their entries as one encoded buffer.
///
/// Uses less memory than [`DefaultFactory`](super::DefaultFactory), especially
/// for larger `max_children`, at the cost of decoding a payload every time it
/// is read. Every payload is encoded when its leaf is created.
///
/// # Examples
///
/// ```rust
/// use rtree_nodes::{BoundingBox, CompactFactory, Context, Entry, Factory};
///
/// let factory = CompactFactory::builder()
///     .serializer(|v: &i64| Ok(v.to_string().into_bytes()))
///     .deserializer(|bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?))
///     .build()
///     .unwrap();
///
/// let entries = vec![
///     Entry::new(1, BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
///     Entry::new(2, BoundingBox::new(2.0, 2.0, 3.0, 3.0)),
/// ];
/// let leaf = factory.create_leaf(entries.clone(), &Context::default()).unwrap();
///
/// assert_eq!(leaf.count(), 2);
/// assert_eq!(leaf.mbr(), BoundingBox::new(0.0, 0.0, 3.0, 3.0));
/// assert_eq!(leaf.to_vec().unwrap(), entries);
/// ```
pub struct CompactFactory<T> {
    codec: Codec<T>,
}

impl<T> CompactFactory<T> {
    pub fn new(codec: Codec<T>) -> Self {
        Self { codec }
    }

    pub fn builder() -> CompactFactoryBuilder<T> {
        CompactFactoryBuilder::default()
    }

    pub fn codec(&self) -> &Codec<T> {
        &self.codec
    }

    pub fn serializer(&self) -> &Serializer<T> {
        self.codec.serializer()
    }

    pub fn deserializer(&self) -> &Deserializer<T> {
        self.codec.deserializer()
    }
}

impl<T, S: Geometry> Factory<T, S> for CompactFactory<T> {
    fn create_leaf(&self, entries: Vec<Entry<T, S>>, context: &Context) -> NodeResult<Leaf<T, S>> {
        let leaf = CompactLeaf::from_entries(&entries, self.codec.clone(), *context)?;
        Ok(leaf.into())
    }
}

impl<T> Clone for CompactFactory<T> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
        }
    }
}

impl<T> fmt::Debug for CompactFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactFactory")
            .field("codec", &self.codec)
            .finish()
    }
}

/// Builder for [`CompactFactory`]; both functions are required.
pub struct CompactFactoryBuilder<T> {
    serializer: Option<Serializer<T>>,
    deserializer: Option<Deserializer<T>>,
}

impl<T> Default for CompactFactoryBuilder<T> {
    fn default() -> Self {
        Self {
            serializer: None,
            deserializer: None,
        }
    }
}

impl<T> CompactFactoryBuilder<T> {
    pub fn serializer<F>(mut self, serializer: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    pub fn deserializer<F>(mut self, deserializer: F) -> Self
    where
        F: Fn(&[u8]) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.deserializer = Some(Arc::new(deserializer));
        self
    }

    /// Fails with [`NodeError::Configuration`] if either function is missing.
    pub fn build(self) -> NodeResult<CompactFactory<T>> {
        let serializer = self
            .serializer
            .ok_or_else(|| NodeError::Configuration("serializer is required".into()))?;
        let deserializer = self
            .deserializer
            .ok_or_else(|| NodeError::Configuration("deserializer is required".into()))?;
        Ok(CompactFactory::new(Codec::from_parts(serializer, deserializer)))
    }
}
