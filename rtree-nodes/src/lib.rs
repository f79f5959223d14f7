//! # R-Tree Nodes - Pluggable Node Representations for R-Trees
//!
//! This crate provides the node layer of an R-Tree: the node types a tree is
//! made of and the factories a tree uses to build them. Which physical
//! representation backs a leaf is decided once, by the factory the tree is
//! configured with, and is invisible to the tree's algorithms.
//!
//! ## Features
//!
//! - **Conventional Leaves**: Entries held as live values ([`DefaultFactory`])
//! - **Compact Leaves**: Entries held as one encoded buffer ([`CompactFactory`])
//! - **Lazy Decoding**: Payloads decoded one slot at a time, on read
//! - **Cached Bounding Boxes**: Pruning never decodes a payload
//! - **Random Access**: Any entry can be read without decoding its neighbours
//! - **Thread Safe**: Nodes and factories are `Send + Sync` and immutable
//!
//! ## Quick Start
//!
//! ```rust
//! use rtree_nodes::{BoundingBox, CompactFactory, Context, Entry, Factory, Node};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = CompactFactory::builder()
//!     .serializer(|v: &i64| Ok(v.to_string().into_bytes()))
//!     .deserializer(|bytes: &[u8]| Ok(std::str::from_utf8(bytes)?.parse::<i64>()?))
//!     .build()?;
//! let context = Context::builder().max_children(8).build()?;
//!
//! let leaf = factory.create_leaf(
//!     vec![
//!         Entry::new(1, BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
//!         Entry::new(2, BoundingBox::new(5.0, 5.0, 6.0, 6.0)),
//!     ],
//!     &context,
//! )?;
//! assert_eq!(leaf.mbr(), BoundingBox::new(0.0, 0.0, 6.0, 6.0));
//!
//! // Entries decode lazily, in insertion order
//! for entry in &leaf {
//!     let entry = entry?;
//!     println!("{} -> {}", entry.value(), entry.geometry());
//! }
//!
//! // Internal nodes are always conventional
//! let root = factory.create_non_leaf(vec![Node::Leaf(leaf)], &context);
//! assert_eq!(root.count(), 1);
//! # Ok(())
//! # }
//! ```

// Geometry
pub mod bounding_box;
pub mod geometry;

// Node building blocks
pub mod codec;
pub mod constants;
pub mod context;
pub mod entry;
pub mod errors;

// Nodes and factories
pub mod factory;
pub mod flat;
pub mod node;

// Re-export geometry types
pub use bounding_box::BoundingBox;
pub use geometry::{Geometry, Point};

// Re-export building blocks
pub use codec::{Codec, Deserializer, Serializer};
pub use context::{Context, ContextBuilder};
pub use entry::Entry;
pub use errors::{NodeError, NodeResult};

// Re-export node types
pub use flat::{CompactEntries, CompactLeaf, NodeTable, NodeTableEncoder};
pub use node::{Entries, Leaf, LeafDefault, Node, NonLeaf};

// Re-export factories
pub use factory::{CompactFactory, CompactFactoryBuilder, DefaultFactory, Factory};
