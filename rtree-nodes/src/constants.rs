//! Constants for node construction.

/// Default maximum number of entries per leaf / children per non-leaf
pub const DEFAULT_MAX_CHILDREN: usize = 4;

/// Smallest `max_children` a tree can be configured with
pub const MIN_MAX_CHILDREN: usize = 3;

/// Default minimum fill, as a fraction of `max_children`
pub const DEFAULT_MIN_FILL_RATIO: f64 = 0.4;

/// Width in bytes of every integer in a node table header
pub const TABLE_WORD: usize = 4;
