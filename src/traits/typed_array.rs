//! # TypedArray — *Uniform Per-Variant Column Contract*
//!
//! Every concrete element-type struct in [`crate::array`] (`BooleanArray`,
//! `IntegerArray<T>`, `FloatArray<T>`, `StringArray`, the temporal arrays,
//! `CodedArray<T>`, `ObjectArray`) implements this trait. The [`crate::array::Array`]
//! enum dispatches to it rather than re-deriving these operations per
//! variant.

use crate::enums::Style;
use crate::error::ArrayError;
use crate::value::Value;

/// Uniform operations available on any typed column, independent of its
/// concrete element type or physical storage style.
pub trait TypedArray {
    /// The element type this array's slots hold.
    type Elem: Clone + PartialEq;

    fn length(&self) -> usize;

    fn style(&self) -> Style;

    /// Value returned by [`TypedArray::get`] when no other value was ever
    /// written at that ordinal (i.e. the column's fill/default value).
    fn default_value(&self) -> Self::Elem;

    fn get(&self, ordinal: usize) -> Result<Self::Elem, ArrayError>;

    fn set(&mut self, ordinal: usize, value: Self::Elem) -> Result<(), ArrayError>;

    /// `true` if the slot at `ordinal` holds this array's null representation.
    fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError>;

    /// Value-based equality between two ordinals, without boxing either side.
    fn is_equal_to(&self, ordinal: usize, other: &Self, other_ordinal: usize) -> Result<bool, ArrayError>
    where
        Self: Sized,
    {
        Ok(self.get(ordinal)? == other.get(other_ordinal)?)
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError>;

    /// `-1`/`0`/`1` ordering of this array's values at `i` vs. `j`.
    fn compare(&self, i: usize, j: usize) -> Result<std::cmp::Ordering, ArrayError>;

    /// Reorders `[start, end)` into ascending/descending order of this
    /// array's own values, returning the permutation applied (as original
    /// ordinals, in their new order) so a caller can replay it on sibling
    /// columns and the row index.
    fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError>;

    /// Applies a previously computed permutation (as produced by `sort` or a
    /// `KeyIndex` sort) over `[start, end)`.
    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError>;

    /// Ordinals in `[0, length())` for which `predicate` returns `true`.
    fn filter<F: Fn(&Self::Elem) -> bool>(&self, predicate: F) -> Vec<usize> {
        (0..self.length())
            .filter(|&i| self.get(i).map(|v| predicate(&v)).unwrap_or(false))
            .collect()
    }

    /// Returns a new array holding only the given ordinals, in order.
    fn gather(&self, ordinals: &[usize]) -> Self
    where
        Self: Sized;

    fn copy_range(&self, start: usize, len: usize) -> Self
    where
        Self: Sized;

    fn expand(&mut self, new_len: usize);

    fn fill(&mut self, value: Self::Elem, start: usize, end: usize) -> Result<(), ArrayError>;

    /// Requires the array to already be sorted ascending over `[0, length())`.
    fn binary_search(&self, value: &Self::Elem) -> Result<usize, usize>;

    /// First `limit` distinct values encountered in ordinal order (`None` =
    /// unbounded).
    fn distinct(&self, limit: Option<usize>) -> Vec<Self::Elem> {
        let mut seen = Vec::new();
        for i in 0..self.length() {
            if let Ok(v) = self.get(i) {
                if !seen.contains(&v) {
                    seen.push(v);
                    if let Some(l) = limit {
                        if seen.len() >= l {
                            break;
                        }
                    }
                }
            }
        }
        seen
    }

    /// Erases this array's element type into the crate-wide [`Value`] scalar,
    /// used by the parallel engine and the frame cursor's generic reads.
    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError>;
}
