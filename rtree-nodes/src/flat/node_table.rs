//! Random-access table that backs a compact leaf.
//!
//! # Binary Layout
//!
//! All integers are little-endian `u32`.
//!
//! ```text
//! ┌──────────────────────┐
//! │        Count         │  number of slots (n)
//! ├──────────────────────┤
//! │  Geometry End x n    │  end offset of slot i within the geometry section
//! ├──────────────────────┤
//! │  Payload End x n     │  end offset of slot i within the payload section
//! ├──────────────────────┤
//! │  Geometry Section    │  encoded geometries, back to back
//! ├──────────────────────┤
//! │  Payload Section     │  encoded payloads, back to back
//! └──────────────────────┘
//! ```
//!
//! Slot `i` spans `end[i - 1]..end[i]` of its section (`0..end[0]` for the
//! first slot). Locating a slot reads two words of the offset table and never
//! touches any other slot.

use std::fmt;
use std::sync::Arc;

use crate::constants::TABLE_WORD;
use crate::errors::{NodeError, NodeResult};

/// Collects encoded slots and assembles them into one [`NodeTable`].
pub struct NodeTableEncoder {
    geometries: Vec<u8>,
    payloads: Vec<u8>,
    geometry_ends: Vec<u32>,
    payload_ends: Vec<u32>,
}

impl NodeTableEncoder {
    /// Creates an encoder sized for `slots` entries.
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            geometries: Vec::new(),
            payloads: Vec::new(),
            geometry_ends: Vec::with_capacity(slots),
            payload_ends: Vec::with_capacity(slots),
        }
    }

    /// Number of slots pushed so far.
    pub fn len(&self) -> usize {
        self.payload_ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload_ends.is_empty()
    }

    /// Appends one slot. `index` is only used to attribute a failure.
    pub fn push(&mut self, index: usize, geometry: &[u8], payload: &[u8]) -> NodeResult<()> {
        self.geometries.extend_from_slice(geometry);
        self.payloads.extend_from_slice(payload);
        self.geometry_ends.push(to_word(index, self.geometries.len())?);
        self.payload_ends.push(to_word(index, self.payloads.len())?);
        Ok(())
    }

    /// Writes the header, offset tables and both sections into one buffer.
    pub fn finish(self) -> NodeResult<NodeTable> {
        let count = self.len();
        let header_len = TABLE_WORD * (1 + 2 * count);
        let total = header_len + self.geometries.len() + self.payloads.len();
        check_table_len(count, total)?;

        let mut buffer = Vec::with_capacity(total);
        // fits, since `total` does
        buffer.extend_from_slice(&(count as u32).to_le_bytes());
        for end in &self.geometry_ends {
            buffer.extend_from_slice(&end.to_le_bytes());
        }
        for end in &self.payload_ends {
            buffer.extend_from_slice(&end.to_le_bytes());
        }
        buffer.extend_from_slice(&self.geometries);
        buffer.extend_from_slice(&self.payloads);

        Ok(NodeTable {
            buffer: Arc::from(buffer),
            count,
            geometry_start: header_len,
            payload_start: header_len + self.geometries.len(),
        })
    }
}

/// Fails if a table of `count` slots and `total` bytes cannot be addressed
/// with `u32` offsets. The failure is attributed to the last slot, the one that
/// pushed the table over the limit.
fn check_table_len(count: usize, total: usize) -> NodeResult<()> {
    to_word(count.saturating_sub(1), total).map(|_| ())
}

fn to_word(index: usize, value: usize) -> NodeResult<u32> {
    u32::try_from(value).map_err(|_| NodeError::Encoding {
        index,
        source: anyhow::anyhow!("node table exceeds {} bytes", u32::MAX),
    })
}

/// An immutable, encoded set of `(geometry, payload)` slots.
///
/// Cloning shares the underlying buffer.
#[derive(Clone)]
pub struct NodeTable {
    buffer: Arc<[u8]>,
    count: usize,
    geometry_start: usize,
    payload_start: usize,
}

impl NodeTable {
    /// Wraps an existing buffer after checking its header and offset tables.
    ///
    /// Fails with [`NodeError::Corrupted`] if the buffer is truncated or any
    /// offset is out of order or out of range.
    pub fn from_bytes(buffer: Arc<[u8]>) -> NodeResult<Self> {
        let count = read_word(&buffer, 0)? as usize;
        let header_len = count
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| n.checked_mul(TABLE_WORD))
            .ok_or_else(|| NodeError::Corrupted(format!("slot count {} overflows", count)))?;
        if header_len > buffer.len() {
            return Err(NodeError::Corrupted(format!(
                "header of {} slots needs {} bytes, buffer has {}",
                count,
                header_len,
                buffer.len()
            )));
        }

        let geometry_len = check_ends(&buffer, TABLE_WORD, count, "geometry")?;
        let payload_len = check_ends(&buffer, TABLE_WORD * (1 + count), count, "payload")?;
        let expected = header_len + geometry_len + payload_len;
        if expected != buffer.len() {
            return Err(NodeError::Corrupted(format!(
                "expected {} bytes, buffer has {}",
                expected,
                buffer.len()
            )));
        }

        Ok(Self {
            buffer,
            count,
            geometry_start: header_len,
            payload_start: header_len + geometry_len,
        })
    }

    /// Number of slots, read from the header.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Encoded geometry of slot `index`.
    pub fn geometry_bytes(&self, index: usize) -> NodeResult<&[u8]> {
        self.slot(index, TABLE_WORD, self.geometry_start, self.payload_start)
    }

    /// Encoded payload of slot `index`.
    pub fn payload_bytes(&self, index: usize) -> NodeResult<&[u8]> {
        self.slot(
            index,
            TABLE_WORD * (1 + self.count),
            self.payload_start,
            self.buffer.len(),
        )
    }

    /// The whole encoded table.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Shared handle to the encoded table.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.buffer)
    }

    /// Size of the encoded table in bytes.
    pub fn encoded_len(&self) -> usize {
        self.buffer.len()
    }

    fn slot(
        &self,
        index: usize,
        ends_at: usize,
        section_start: usize,
        section_end: usize,
    ) -> NodeResult<&[u8]> {
        if index >= self.count {
            return Err(NodeError::OutOfBounds {
                index,
                count: self.count,
            });
        }
        let start = if index == 0 {
            0
        } else {
            read_word(&self.buffer, ends_at + TABLE_WORD * (index - 1))? as usize
        };
        let end = read_word(&self.buffer, ends_at + TABLE_WORD * index)? as usize;

        let from = section_start + start;
        let to = section_start + end;
        if start > end || to > section_end {
            return Err(NodeError::Corrupted(format!(
                "slot {} spans {}..{} outside its section",
                index, from, to
            )));
        }
        Ok(&self.buffer[from..to])
    }
}

impl fmt::Debug for NodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTable")
            .field("slots", &self.count)
            .field("bytes", &self.buffer.len())
            .finish()
    }
}

fn read_word(buffer: &[u8], at: usize) -> NodeResult<u32> {
    buffer
        .get(at..at + TABLE_WORD)
        .and_then(|bytes| <[u8; TABLE_WORD]>::try_from(bytes).ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| NodeError::Corrupted(format!("cannot read word at offset {}", at)))
}

/// Verifies an end-offset table is non-decreasing and returns its section length.
fn check_ends(buffer: &[u8], at: usize, count: usize, section: &str) -> NodeResult<usize> {
    let mut previous = 0u32;
    for i in 0..count {
        let end = read_word(buffer, at + TABLE_WORD * i)?;
        if end < previous {
            return Err(NodeError::Corrupted(format!(
                "{} offset {} goes backwards ({} < {})",
                section, i, end, previous
            )));
        }
        previous = end;
    }
    Ok(previous as usize)
}
