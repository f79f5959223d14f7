//! Compact leaf representation.
//!
//! A compact leaf keeps its entries as one immutable byte buffer instead of a
//! vector of live values:
//! - Entries are encoded eagerly, once, when the leaf is created
//! - Payloads are decoded lazily, one slot at a time, when read
//! - Bounding boxes stay available without decoding any payload
//!
//! Leaves hold most of a tree's payload data, so compacting only the leaves
//! captures most of the memory saving while internal nodes stay conventional.

pub mod compact_leaf;
pub mod node_table;

pub use compact_leaf::{CompactEntries, CompactLeaf};
pub use node_table::{NodeTable, NodeTableEncoder};
