//! Leaf nodes and their representations.

use std::slice;

use crate::bounding_box::BoundingBox;
use crate::context::Context;
use crate::entry::Entry;
use crate::errors::{NodeError, NodeResult};
use crate::factory::Factory;
use crate::flat::{CompactEntries, CompactLeaf};
use crate::geometry::Geometry;

/// A conventional leaf owning its entries as live values.
#[derive(Debug, Clone)]
pub struct LeafDefault<T, S> {
    entries: Vec<Entry<T, S>>,
    mbr: BoundingBox,
    context: Context,
}

impl<T, S: Geometry> LeafDefault<T, S> {
    pub fn new(entries: Vec<Entry<T, S>>, context: Context) -> Self {
        let mbr = BoundingBox::union_all(entries.iter().map(|e| e.geometry().mbr()));
        Self {
            entries,
            mbr,
            context,
        }
    }
}

impl<T, S> LeafDefault<T, S> {
    pub fn entries(&self) -> &[Entry<T, S>] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn mbr(&self) -> BoundingBox {
        self.mbr
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_entries(self) -> Vec<Entry<T, S>> {
        self.entries
    }
}

#[derive(Debug, Clone)]
enum LeafRepr<T, S> {
    Default(LeafDefault<T, S>),
    Compact(CompactLeaf<T, S>),
}

/// A tree node holding terminal entries.
///
/// The physical representation is chosen by the factory that built the leaf
/// and is not observable through this type: every leaf answers the same
/// questions (entries, count, bounding box) in the same way.
///
/// Reading entries requires `T: Clone` because a conventional leaf hands out
/// copies of the values it owns. A compact leaf decodes fresh values and has no
/// such requirement; payload types that cannot be cloned can still be read
/// through [`CompactLeaf`] directly.
#[derive(Debug, Clone)]
pub struct Leaf<T, S> {
    repr: LeafRepr<T, S>,
}

impl<T, S> From<LeafDefault<T, S>> for Leaf<T, S> {
    fn from(leaf: LeafDefault<T, S>) -> Self {
        Self {
            repr: LeafRepr::Default(leaf),
        }
    }
}

impl<T, S> From<CompactLeaf<T, S>> for Leaf<T, S> {
    fn from(leaf: CompactLeaf<T, S>) -> Self {
        Self {
            repr: LeafRepr::Compact(leaf),
        }
    }
}

impl<T, S> Leaf<T, S> {
    /// Number of entries. Never decodes anything.
    pub fn count(&self) -> usize {
        match &self.repr {
            LeafRepr::Default(leaf) => leaf.count(),
            LeafRepr::Compact(leaf) => leaf.count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Union of the entries' bounding rectangles. Never decodes anything.
    pub fn mbr(&self) -> BoundingBox {
        match &self.repr {
            LeafRepr::Default(leaf) => leaf.mbr(),
            LeafRepr::Compact(leaf) => leaf.mbr(),
        }
    }

    pub fn context(&self) -> &Context {
        match &self.repr {
            LeafRepr::Default(leaf) => leaf.context(),
            LeafRepr::Compact(leaf) => leaf.context(),
        }
    }
}

impl<T, S> Leaf<T, S>
where
    T: Clone,
    S: Geometry,
{
    /// Entries in the order they were supplied at construction.
    ///
    /// The iterator can be requested any number of times and always yields
    /// the same sequence. Items are `Err` only for compact leaves whose slot
    /// fails to decode.
    pub fn entries(&self) -> Entries<'_, T, S> {
        let inner = match &self.repr {
            LeafRepr::Default(leaf) => EntriesInner::Default(leaf.entries().iter()),
            LeafRepr::Compact(leaf) => EntriesInner::Compact(leaf.entries()),
        };
        Entries { inner }
    }

    /// Entry at `index`.
    pub fn entry(&self, index: usize) -> NodeResult<Entry<T, S>> {
        match &self.repr {
            LeafRepr::Default(leaf) => leaf
                .entries()
                .get(index)
                .cloned()
                .ok_or(NodeError::OutOfBounds {
                    index,
                    count: leaf.count(),
                }),
            LeafRepr::Compact(leaf) => leaf.entry(index),
        }
    }

    /// Geometry of the entry at `index`, without touching its payload.
    pub fn geometry(&self, index: usize) -> NodeResult<S> {
        match &self.repr {
            LeafRepr::Default(leaf) => leaf
                .entries()
                .get(index)
                .map(|e| e.geometry().clone())
                .ok_or(NodeError::OutOfBounds {
                    index,
                    count: leaf.count(),
                }),
            LeafRepr::Compact(leaf) => leaf.geometry(index),
        }
    }

    /// All entries, failing on the first one that cannot be decoded.
    pub fn to_vec(&self) -> NodeResult<Vec<Entry<T, S>>> {
        self.entries().collect()
    }

    /// A new leaf holding this leaf's entries followed by `entry`.
    ///
    /// The new leaf is built by `factory`; this leaf is left as it is.
    pub fn with_entry<F>(
        &self,
        entry: Entry<T, S>,
        factory: &F,
        context: &Context,
    ) -> NodeResult<Leaf<T, S>>
    where
        F: Factory<T, S> + ?Sized,
    {
        let mut entries = self.to_vec()?;
        entries.push(entry);
        factory.create_leaf(entries, context)
    }

    /// A new leaf holding this leaf's entries except the one at `index`.
    ///
    /// The new leaf is built by `factory`; this leaf is left as it is.
    pub fn without_entry<F>(
        &self,
        index: usize,
        factory: &F,
        context: &Context,
    ) -> NodeResult<Leaf<T, S>>
    where
        F: Factory<T, S> + ?Sized,
    {
        if index >= self.count() {
            return Err(NodeError::OutOfBounds {
                index,
                count: self.count(),
            });
        }
        let mut entries = self.to_vec()?;
        entries.remove(index);
        factory.create_leaf(entries, context)
    }
}

enum EntriesInner<'a, T, S> {
    Default(slice::Iter<'a, Entry<T, S>>),
    Compact(CompactEntries<'a, T, S>),
}

/// Iterator over the entries of a [`Leaf`].
pub struct Entries<'a, T, S> {
    inner: EntriesInner<'a, T, S>,
}

impl<T: Clone, S: Geometry> Iterator for Entries<'_, T, S> {
    type Item = NodeResult<Entry<T, S>>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Default(iter) => iter.next().cloned().map(Ok),
            EntriesInner::Compact(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            EntriesInner::Default(iter) => iter.size_hint(),
            EntriesInner::Compact(iter) => iter.size_hint(),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Default(iter) => iter.nth(n).cloned().map(Ok),
            EntriesInner::Compact(iter) => iter.nth(n),
        }
    }
}

impl<T: Clone, S: Geometry> DoubleEndedIterator for Entries<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Default(iter) => iter.next_back().cloned().map(Ok),
            EntriesInner::Compact(iter) => iter.next_back(),
        }
    }
}

impl<T: Clone, S: Geometry> ExactSizeIterator for Entries<'_, T, S> {}

impl<'a, T: Clone, S: Geometry> IntoIterator for &'a Leaf<T, S> {
    type Item = NodeResult<Entry<T, S>>;
    type IntoIter = Entries<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
