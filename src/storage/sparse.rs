//! # Sparse Storage — *Primitive-Keyed, Open-Addressed Map Over a Default*
//!
//! Backs the `Sparse` style of every fixed-width [`crate::array`] variant.
//! Only slots whose value differs from the array's default are materialized;
//! everything else reads as `default` without occupying a map entry.
//! Writing the default value into a slot removes its entry, keeping the
//! map's footprint tied to how many cells actually diverge from default.

use std::collections::HashMap;

#[cfg(feature = "fast_hash")]
type MapImpl<K, V> = HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "fast_hash"))]
type MapImpl<K, V> = HashMap<K, V>;

/// Sparse, ordinal-indexed storage holding only non-default entries.
#[derive(Debug, Clone)]
pub struct SparseStorage<T> {
    len: usize,
    default: T,
    entries: MapImpl<usize, T>,
    fill_factor: f64,
}

impl<T: Clone + PartialEq> SparseStorage<T> {
    pub fn new(len: usize, default: T, fill_factor: f64) -> Self {
        SparseStorage {
            len,
            default,
            entries: MapImpl::default(),
            fill_factor,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.entries.get(&i).cloned().unwrap_or_else(|| self.default.clone())
    }

    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        self.entries.contains_key(&i)
    }

    /// Sets `i` to `value`, inserting an entry unless `value == default`, in
    /// which case any existing entry is removed instead.
    pub fn set(&mut self, i: usize, value: T) {
        if value == self.default {
            self.entries.remove(&i);
        } else {
            self.entries.insert(i, value);
        }
    }

    pub fn fill(&mut self, value: T, start: usize, end: usize) {
        if value == self.default {
            for i in start..end {
                self.entries.remove(&i);
            }
        } else {
            for i in start..end {
                self.entries.insert(i, value.clone());
            }
        }
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let vi = self.entries.remove(&i);
        let vj = self.entries.remove(&j);
        match vj {
            Some(v) => {
                self.entries.insert(i, v);
            }
            None => {}
        }
        match vi {
            Some(v) => {
                self.entries.insert(j, v);
            }
            None => {}
        }
    }

    pub fn expand(&mut self, new_len: usize) {
        debug_assert!(new_len >= self.len);
        self.len = new_len;
    }

    /// Density of non-default entries vs. the configured fill factor hint.
    pub fn density(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.entries.len() as f64 / self.len as f64
        }
    }

    pub fn fill_factor(&self) -> f64 {
        self.fill_factor
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn slice(&self, start: usize, len: usize) -> SparseStorage<T> {
        let mut out = SparseStorage::new(len, self.default.clone(), self.fill_factor);
        for (i, v) in self.entries.iter() {
            if *i >= start && *i < start + len {
                out.entries.insert(*i - start, v.clone());
            }
        }
        out
    }

    pub fn gather(&self, indexes: &[usize]) -> SparseStorage<T> {
        let mut out = SparseStorage::new(indexes.len(), self.default.clone(), self.fill_factor);
        for (new_i, &old_i) in indexes.iter().enumerate() {
            if let Some(v) = self.entries.get(&old_i) {
                out.entries.insert(new_i, v.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_roundtrip() {
        let mut s = SparseStorage::new(4, 0i32, 0.1);
        s.set(1, 5);
        assert_eq!(s.get(0), 0);
        assert_eq!(s.get(1), 5);
        assert!(s.is_set(1));
        assert!(!s.is_set(0));
    }

    #[test]
    fn setting_default_removes_entry() {
        let mut s = SparseStorage::new(3, 0i32, 0.1);
        s.set(1, 7);
        assert!(s.is_set(1));
        s.set(1, 0);
        assert!(!s.is_set(1));
        assert_eq!(s.get(1), 0);
    }

    #[test]
    fn swap_exchanges_entries() {
        let mut s = SparseStorage::new(3, 0i32, 0.1);
        s.set(0, 10);
        s.swap(0, 2);
        assert_eq!(s.get(0), 0);
        assert_eq!(s.get(2), 10);
        s.swap(0, 2);
        assert_eq!(s.get(0), 10);
        assert_eq!(s.get(2), 0);
    }

    #[test]
    fn fill_range_sets_or_clears() {
        let mut s = SparseStorage::new(5, 0i32, 0.1);
        s.fill(9, 1, 4);
        assert_eq!(s.get(0), 0);
        assert_eq!(s.get(1), 9);
        assert_eq!(s.get(3), 9);
        assert_eq!(s.get(4), 0);
        s.fill(0, 1, 4);
        assert!(!s.is_set(1) && !s.is_set(2) && !s.is_set(3));
    }

    #[test]
    fn slice_rebases_coordinates() {
        let mut s = SparseStorage::new(5, 0i32, 0.1);
        s.set(2, 42);
        let sliced = s.slice(1, 3);
        assert_eq!(sliced.len(), 3);
        assert_eq!(sliced.get(1), 42);
        assert_eq!(sliced.get(0), 0);
    }
}
