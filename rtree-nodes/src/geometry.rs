//! Geometry capability consumed by the node layer.
//!
//! Nodes never look inside a geometry. They only ask for its minimum bounding
//! rectangle, which is unioned into the node's aggregate [`BoundingBox`], and
//! they serialize it with serde when a leaf is stored in compact form.
//!
//! Two geometries ship with the crate:
//! - [`Point`] (a degenerate rectangle)
//! - [`BoundingBox`] (its own minimum bounding rectangle)

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

use crate::bounding_box::BoundingBox;

/// A value that occupies a region of the plane.
///
/// Implementors must be cheap to clone and compare, and must serialize to the
/// same bytes every time, since compact leaves store geometries encoded.
pub trait Geometry:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Minimum bounding rectangle of this geometry.
    fn mbr(&self) -> BoundingBox;

    /// Returns true if this geometry touches the rectangle.
    fn intersects(&self, r: &BoundingBox) -> bool {
        self.mbr().intersects(r)
    }

    /// Distance from this geometry to the rectangle; 0 when they intersect.
    fn distance(&self, r: &BoundingBox) -> f64 {
        self.mbr().distance(r)
    }
}

impl Geometry for BoundingBox {
    fn mbr(&self) -> BoundingBox {
        *self
    }
}

/// A 2D point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Gets the x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Gets the y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT({} {})", self.x, self.y)
    }
}

impl Geometry for Point {
    fn mbr(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.x, self.y)
    }

    fn intersects(&self, r: &BoundingBox) -> bool {
        r.contains_point(self.x, self.y)
    }

    fn distance(&self, r: &BoundingBox) -> f64 {
        // An empty box (e.g. the mbr of an empty leaf) is infinitely far away
        if r.is_empty() {
            return f64::INFINITY;
        }
        let dx = (r.min_x - self.x).max(self.x - r.max_x).max(0.0);
        let dy = (r.min_y - self.y).max(self.y - r.max_y).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}
