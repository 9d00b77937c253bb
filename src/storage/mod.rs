//! # Storage Module — *Style-Polymorphic Backing for Typed Arrays*
//!
//! [`Storage<T>`] is the internal backing shared by every fixed-width
//! element-type struct in [`crate::array`] (`BooleanArray`, `IntArray`,
//! `LongArray`, `DoubleArray`, the temporal arrays). It is not part of the
//! public dispatch surface — callers interact with it through
//! [`crate::traits::TypedArray`] on the concrete array structs.

pub mod mapped;
pub mod sparse;

use mapped::{MappedStorage, Steppable};
use sparse::SparseStorage;

use crate::enums::Style;
use crate::error::ArrayError;

/// Backing storage for one column's worth of `T` values, in one of three
/// styles: `Dense`, `Sparse`, or `Mapped`.
#[derive(Debug, Clone)]
pub enum Storage<T> {
    Dense(Vec<T>),
    Sparse(SparseStorage<T>),
    Mapped(MappedStorage<T>),
}

impl<T: Clone + PartialEq + Default> Storage<T> {
    pub fn dense_from(values: Vec<T>) -> Self {
        Storage::Dense(values)
    }

    pub fn sparse(len: usize, default: T, fill_factor: f64) -> Self {
        Storage::Sparse(SparseStorage::new(len, default, fill_factor))
    }

    pub fn style(&self) -> Style {
        match self {
            Storage::Dense(_) => Style::Dense,
            Storage::Sparse(_) => Style::Sparse,
            Storage::Mapped(_) => Style::Mapped,
        }
    }

    pub fn style_name(&self) -> &'static str {
        match self {
            Storage::Dense(_) => "Dense",
            Storage::Sparse(_) => "Sparse",
            Storage::Mapped(_) => "Mapped",
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Storage::Dense(v) => v.len(),
            Storage::Sparse(s) => s.len(),
            Storage::Mapped(m) => m.len(),
        }
    }

    #[inline]
    pub fn default_value(&self, fallback: &T) -> T {
        match self {
            Storage::Dense(_) => fallback.clone(),
            Storage::Sparse(s) => s.default_value().clone(),
            Storage::Mapped(_) => fallback.clone(),
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> T {
        match self {
            Storage::Dense(v) => v[i].clone(),
            Storage::Sparse(s) => s.get(i),
            Storage::Mapped(m) => m.get(i),
        }
    }

    /// Writes `value` at `i`. Mapped storage promotes itself to `Dense` in
    /// place if `value` breaks the affine sequence at that position.
    pub fn set(&mut self, i: usize, value: T) {
        match self {
            Storage::Dense(v) => v[i] = value,
            Storage::Sparse(s) => s.set(i, value),
            Storage::Mapped(m) => {
                if !m.matches(i, value.clone()) {
                    let mut dense = m.to_dense();
                    dense[i] = value;
                    *self = Storage::Dense(dense);
                }
            }
        }
    }

    pub fn fill(&mut self, value: T, start: usize, end: usize) {
        match self {
            Storage::Dense(v) => {
                for i in start..end {
                    v[i] = value.clone();
                }
            }
            Storage::Sparse(s) => s.fill(value, start, end),
            Storage::Mapped(m) => {
                let mut dense = m.to_dense();
                for i in start..end {
                    dense[i] = value.clone();
                }
                *self = Storage::Dense(dense);
            }
        }
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        match self {
            Storage::Dense(v) => v.swap(i, j),
            Storage::Sparse(s) => s.swap(i, j),
            Storage::Mapped(m) => {
                let mut dense = m.to_dense();
                dense.swap(i, j);
                *self = Storage::Dense(dense);
            }
        }
    }

    pub fn expand(&mut self, new_len: usize, default: &T) {
        match self {
            Storage::Dense(v) => v.resize(new_len, default.clone()),
            Storage::Sparse(s) => s.expand(new_len),
            Storage::Mapped(m) => {
                let mut dense = m.to_dense();
                dense.resize(new_len, default.clone());
                *self = Storage::Dense(dense);
            }
        }
    }

    pub fn slice(&self, start: usize, len: usize) -> Storage<T> {
        match self {
            Storage::Dense(v) => Storage::Dense(v[start..start + len].to_vec()),
            Storage::Sparse(s) => Storage::Sparse(s.slice(start, len)),
            Storage::Mapped(m) => Storage::Mapped(m.slice(start, len)),
        }
    }

    pub fn gather(&self, indexes: &[usize]) -> Storage<T> {
        match self {
            Storage::Dense(v) => Storage::Dense(indexes.iter().map(|&i| v[i].clone()).collect()),
            Storage::Sparse(s) => Storage::Sparse(s.gather(indexes)),
            Storage::Mapped(m) => {
                Storage::Dense(indexes.iter().map(|&i| m.get(i)).collect())
            }
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Storage::Dense(v) => v.clone(),
            Storage::Sparse(s) => (0..s.len()).map(|i| s.get(i)).collect(),
            Storage::Mapped(m) => m.to_dense(),
        }
    }
}

impl<T: Steppable + Default> Storage<T> {
    pub fn mapped(start: T, step: T, len: usize) -> Self {
        Storage::Mapped(MappedStorage::new(start, step, len))
    }
}

pub(crate) fn bounds_check(op: &'static str, i: usize, len: usize) -> Result<(), ArrayError> {
    if i >= len {
        Err(ArrayError::OutOfBounds { ordinal: i, length: len })
    } else {
        let _ = op;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_get_set_roundtrip() {
        let mut s: Storage<i32> = Storage::dense_from(vec![1, 2, 3]);
        assert_eq!(s.get(1), 2);
        s.set(1, 9);
        assert_eq!(s.get(1), 9);
    }

    #[test]
    fn sparse_get_set_roundtrip() {
        let mut s: Storage<i32> = Storage::sparse(4, 0, 0.1);
        s.set(2, 7);
        assert_eq!(s.get(2), 7);
        assert_eq!(s.get(0), 0);
    }

    #[test]
    fn mapped_promotes_to_dense_on_divergent_write() {
        let mut s: Storage<i64> = Storage::mapped(0, 1, 5);
        assert_eq!(s.style(), Style::Mapped);
        assert_eq!(s.get(3), 3);
        s.set(3, 100);
        assert_eq!(s.style(), Style::Dense);
        assert_eq!(s.get(3), 100);
        assert_eq!(s.get(2), 2);
    }

    #[test]
    fn mapped_write_matching_sequence_stays_mapped() {
        let mut s: Storage<i64> = Storage::mapped(10, 2, 5);
        s.set(2, 14); // matches start + 2*step
        assert_eq!(s.style(), Style::Mapped);
    }

    #[test]
    fn swap_preserves_multiset() {
        let mut s: Storage<i32> = Storage::dense_from(vec![1, 2, 3]);
        s.swap(0, 2);
        assert_eq!(s.to_vec(), vec![3, 2, 1]);
        s.swap(0, 2);
        assert_eq!(s.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn fill_sets_every_slot_in_range() {
        let mut s: Storage<i32> = Storage::dense_from(vec![0, 0, 0, 0, 0]);
        s.fill(9, 1, 4);
        assert_eq!(s.to_vec(), vec![0, 9, 9, 9, 0]);
    }

    #[test]
    fn gather_reorders_by_index_list() {
        let s: Storage<i32> = Storage::dense_from(vec![10, 20, 30, 40]);
        let g = s.gather(&[3, 1, 0]);
        assert_eq!(g.to_vec(), vec![40, 20, 10]);
    }
}
