//! Compact leaf integration test module.

mod compact_leaf_test;
