//! Leaf entries.

use serde::{Deserialize, Serialize};

/// A payload paired with the geometry it is indexed under.
///
/// Entries are immutable and compare structurally: two entries are equal when
/// both their values and their geometries are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T, S> {
    value: T,
    geometry: S,
}

impl<T, S> Entry<T, S> {
    pub fn new(value: T, geometry: S) -> Self {
        Self { value, geometry }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn geometry(&self) -> &S {
        &self.geometry
    }

    pub fn into_parts(self) -> (T, S) {
        (self.value, self.geometry)
    }
}
