//! Leaf whose entries live in one encoded buffer.

use std::fmt;
use std::marker::PhantomData;

use crate::bounding_box::BoundingBox;
use crate::codec::Codec;
use crate::context::Context;
use crate::entry::Entry;
use crate::errors::{NodeError, NodeResult};
use crate::geometry::Geometry;

use super::node_table::{NodeTable, NodeTableEncoder};

/// A leaf that trades CPU for memory.
///
/// Every entry is encoded once, when the leaf is built: its geometry with
/// bincode and its payload with the configured [`Codec`]. Both go into a single
/// [`NodeTable`]. Reads decode only the slot asked for, so a failing slot never
/// prevents the others from being read. The bounding box is computed at
/// construction and cached, so pruning a leaf never decodes anything.
///
/// The leaf is immutable. Changing its contents means building a new leaf
/// through the node factory; the old buffer is dropped as a whole.
pub struct CompactLeaf<T, S> {
    table: NodeTable,
    mbr: BoundingBox,
    codec: Codec<T>,
    context: Context,
    _geometry: PhantomData<fn() -> S>,
}

impl<T, S> CompactLeaf<T, S>
where
    S: Geometry,
{
    /// Encodes `entries` into a new leaf.
    ///
    /// Fails with [`NodeError::Encoding`] on the first entry whose geometry or
    /// payload cannot be encoded. Nothing is kept from a failed call.
    pub fn from_entries(
        entries: &[Entry<T, S>],
        codec: Codec<T>,
        context: Context,
    ) -> NodeResult<Self> {
        let mut encoder = NodeTableEncoder::with_capacity(entries.len().max(context.max_children()));
        let mut mbr = BoundingBox::empty();

        for (index, entry) in entries.iter().enumerate() {
            let geometry = bincode::serde::encode_to_vec(entry.geometry(), bincode::config::legacy())
                .map_err(|e| NodeError::Encoding {
                    index,
                    source: anyhow::anyhow!("geometry encode failed: {}", e),
                })?;
            let payload = codec
                .encode(entry.value())
                .map_err(|source| NodeError::Encoding { index, source })?;

            encoder.push(index, &geometry, &payload)?;
            mbr = mbr.union(&entry.geometry().mbr());
        }

        let table = encoder.finish()?;
        log::debug!(
            "Encoded compact leaf with {} entries into {} bytes",
            table.len(),
            table.encoded_len()
        );

        Ok(Self {
            table,
            mbr,
            codec,
            context,
            _geometry: PhantomData,
        })
    }

    /// Wraps a table read back from storage, e.g. one checked by
    /// [`NodeTable::from_bytes`].
    ///
    /// Every geometry slot is decoded once to rebuild the cached bounding box;
    /// payloads stay encoded. Fails with [`NodeError::Decode`] on the first
    /// geometry that cannot be decoded.
    pub fn from_table(table: NodeTable, codec: Codec<T>, context: Context) -> NodeResult<Self> {
        let mut leaf = Self {
            table,
            mbr: BoundingBox::empty(),
            codec,
            context,
            _geometry: PhantomData,
        };
        let mut mbr = BoundingBox::empty();
        for index in 0..leaf.count() {
            mbr = mbr.union(&leaf.geometry(index)?.mbr());
        }
        leaf.mbr = mbr;

        log::debug!(
            "Loaded compact leaf with {} entries from {} bytes",
            leaf.count(),
            leaf.encoded_len()
        );
        Ok(leaf)
    }

    /// Geometry of entry `index`. Never decodes the payload.
    pub fn geometry(&self, index: usize) -> NodeResult<S> {
        let bytes = self.table.geometry_bytes(index)?;
        bincode::serde::decode_from_slice(bytes, bincode::config::legacy())
            .map(|(geometry, _)| geometry)
            .map_err(|e| {
                log::trace!("Geometry slot {} failed to decode: {}", index, e);
                NodeError::Decode {
                    index,
                    source: anyhow::anyhow!("geometry decode failed: {}", e),
                }
            })
    }

    /// Payload of entry `index`, decoded with the leaf's codec.
    pub fn value(&self, index: usize) -> NodeResult<T> {
        let bytes = self.table.payload_bytes(index)?;
        self.codec.decode(bytes).map_err(|source| {
            log::trace!("Payload slot {} failed to decode: {}", index, source);
            NodeError::Decode { index, source }
        })
    }

    /// Entry `index`, decoded independently of every other entry.
    pub fn entry(&self, index: usize) -> NodeResult<Entry<T, S>> {
        let geometry = self.geometry(index)?;
        let value = self.value(index)?;
        Ok(Entry::new(value, geometry))
    }

    /// Lazily decodes the entries in their original order.
    ///
    /// Each call starts over from the first entry. A slot that fails to
    /// decode yields an `Err` and iteration carries on with the next slot.
    pub fn entries(&self) -> CompactEntries<'_, T, S> {
        CompactEntries {
            leaf: self,
            front: 0,
            back: self.count(),
        }
    }
}

impl<T, S> CompactLeaf<T, S> {
    /// Number of entries, read from the table header.
    #[inline]
    pub fn count(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Union of the entries' bounding rectangles, cached at construction.
    #[inline]
    pub fn mbr(&self) -> BoundingBox {
        self.mbr
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn codec(&self) -> &Codec<T> {
        &self.codec
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// The encoded entries.
    pub fn buffer(&self) -> &[u8] {
        self.table.as_bytes()
    }

    /// Size of the encoded entries in bytes.
    pub fn encoded_len(&self) -> usize {
        self.table.encoded_len()
    }
}

impl<T, S> Clone for CompactLeaf<T, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            mbr: self.mbr,
            codec: self.codec.clone(),
            context: self.context,
            _geometry: PhantomData,
        }
    }
}

impl<T, S> fmt::Debug for CompactLeaf<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactLeaf")
            .field("count", &self.count())
            .field("mbr", &self.mbr)
            .field("encoded_len", &self.encoded_len())
            .finish()
    }
}

/// Iterator over the entries of a [`CompactLeaf`].
pub struct CompactEntries<'a, T, S> {
    leaf: &'a CompactLeaf<T, S>,
    front: usize,
    back: usize,
}

impl<T, S: Geometry> Iterator for CompactEntries<'_, T, S> {
    type Item = NodeResult<Entry<T, S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(self.leaf.entry(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        // Skipped slots are never decoded
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T, S: Geometry> DoubleEndedIterator for CompactEntries<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.leaf.entry(self.back))
    }
}

impl<T, S: Geometry> ExactSizeIterator for CompactEntries<'_, T, S> {}
