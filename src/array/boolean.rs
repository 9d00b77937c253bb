//! # BooleanArray

use std::cmp::Ordering;

use crate::enums::Style;
use crate::error::ArrayError;
use crate::storage::{bounds_check, Storage};
use crate::traits::TypedArray;
use crate::value::Value;

/// A column of `bool` values with an optional validity mask. `validity ==
/// None` means every slot is valid (the common case, avoiding a mask
/// allocation for fully-populated columns).
#[derive(Debug, Clone)]
pub struct BooleanArray {
    storage: Storage<bool>,
    validity: Option<Vec<bool>>,
}

impl BooleanArray {
    pub fn dense(values: Vec<bool>) -> Self {
        BooleanArray { storage: Storage::dense_from(values), validity: None }
    }

    pub fn sparse(len: usize, default: bool) -> Self {
        BooleanArray { storage: Storage::sparse(len, default, 0.1), validity: None }
    }

    pub fn sparse_with_fill_factor(len: usize, default: bool, fill_factor: f64) -> Self {
        BooleanArray { storage: Storage::sparse(len, default, fill_factor), validity: None }
    }

    pub fn with_validity(mut self, validity: Vec<bool>) -> Self {
        debug_assert_eq!(validity.len(), self.storage.len());
        self.validity = Some(validity);
        self
    }

    fn mark_valid(&mut self, ordinal: usize) {
        if let Some(v) = &mut self.validity {
            v[ordinal] = true;
        }
    }
}

impl TypedArray for BooleanArray {
    type Elem = bool;

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn style(&self) -> Style {
        self.storage.style()
    }

    fn default_value(&self) -> bool {
        self.storage.default_value(&false)
    }

    fn get(&self, ordinal: usize) -> Result<bool, ArrayError> {
        bounds_check("get", ordinal, self.length())?;
        Ok(self.storage.get(ordinal))
    }

    fn set(&mut self, ordinal: usize, value: bool) -> Result<(), ArrayError> {
        bounds_check("set", ordinal, self.length())?;
        self.storage.set(ordinal, value);
        self.mark_valid(ordinal);
        Ok(())
    }

    fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError> {
        bounds_check("is_null", ordinal, self.length())?;
        Ok(self.validity.as_ref().map(|v| !v[ordinal]).unwrap_or(false))
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        bounds_check("swap", i, self.length())?;
        bounds_check("swap", j, self.length())?;
        self.storage.swap(i, j);
        if let Some(v) = &mut self.validity {
            v.swap(i, j);
        }
        Ok(())
    }

    fn compare(&self, i: usize, j: usize) -> Result<Ordering, ArrayError> {
        Ok(self.get(i)?.cmp(&self.get(j)?))
    }

    fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError> {
        bounds_check("sort", end.saturating_sub(1).max(start), self.length())?;
        let mut slice: Vec<usize> = (start..end).collect();
        slice.sort_by_key(|&i| self.storage.get(i));
        if descending {
            slice.reverse();
        }
        let values: Vec<bool> = slice.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(slice)
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<bool> = permutation.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        BooleanArray { storage: self.storage.gather(ordinals), validity: None }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        BooleanArray { storage: self.storage.slice(start, len), validity: None }
    }

    fn expand(&mut self, new_len: usize) {
        let default = self.default_value();
        self.storage.expand(new_len, &default);
        if let Some(v) = &mut self.validity {
            v.resize(new_len, false);
        }
    }

    fn fill(&mut self, value: bool, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        self.storage.fill(value, start, end);
        if let Some(v) = &mut self.validity {
            for slot in v[start..end].iter_mut() {
                *slot = true;
            }
        }
        Ok(())
    }

    fn binary_search(&self, value: &bool) -> Result<usize, usize> {
        let vec = self.storage.to_vec();
        vec.binary_search(value)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }
        Ok(Value::Boolean(self.get(ordinal)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut a = BooleanArray::dense(vec![true, false, true]);
        a.set(1, true).unwrap();
        assert_eq!(a.get(1).unwrap(), true);
    }

    #[test]
    fn sort_ascending_returns_permutation() {
        let mut a = BooleanArray::dense(vec![true, false, true, false]);
        let perm = a.sort(0, 4, false).unwrap();
        assert_eq!(a.storage.to_vec(), vec![false, false, true, true]);
        assert_eq!(perm.len(), 4);
    }

    #[test]
    fn out_of_bounds_get_errors() {
        let a = BooleanArray::dense(vec![true]);
        assert!(matches!(a.get(5), Err(ArrayError::OutOfBounds { .. })));
    }

    #[test]
    fn validity_mask_tracks_nulls() {
        let a = BooleanArray::dense(vec![true, false]).with_validity(vec![true, false]);
        assert!(!a.is_null(0).unwrap());
        assert!(a.is_null(1).unwrap());
        assert_eq!(a.get_value(1).unwrap(), Value::Null);
    }
}
