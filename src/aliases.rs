//! # Aliases Module — *Shared Type Aliases and the `Key` Bound*

use std::fmt::Debug;
use std::hash::Hash;

/// A stable physical slot in an axis's underlying key array. Coordinates
/// survive filter views and column reordering; ordinals do not.
pub type Coordinate = usize;

/// The 0-based visible position of a key in an axis (possibly a filter view).
/// An ordinal is a coordinate only in an unfiltered, unmapped index.
pub type Ordinal = usize;

/// Trait bound satisfied by any type usable as a row or column key.
///
/// Requires total order so multi-key sorts and `previous_key`/`next_key`
/// have a well-defined answer, and `Hash` so the coordinate map is O(1).
pub trait Key: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static {}

impl<T: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static> Key for T {}
