//! Factory integration test module.
//!
//! These tests check that every factory hands out nodes that answer the node
//! capability set identically, whatever representation backs them.

mod factory_config_test;
mod factory_equivalence_test;
