//! # IntegerArray — *Generic Fixed-Width Signed Integer Column*

use std::cmp::Ordering;

use crate::enums::Style;
use crate::error::ArrayError;
use crate::numeric::Integer;
use crate::storage::{bounds_check, Storage};
use crate::traits::{NumericArray, TypedArray};
use crate::value::Value;

/// A column of `T` (`i32` or `i64`) values. Type aliases [`IntArray`] and
/// [`LongArray`] below are the ones callers normally reach for.
#[derive(Debug, Clone)]
pub struct IntegerArray<T: Integer> {
    storage: Storage<T>,
    validity: Option<Vec<bool>>,
}

pub type IntArray = IntegerArray<i32>;
pub type LongArray = IntegerArray<i64>;

impl<T: Integer> IntegerArray<T> {
    pub fn dense(values: Vec<T>) -> Self {
        IntegerArray { storage: Storage::dense_from(values), validity: None }
    }

    pub fn sparse(len: usize, default: T) -> Self {
        IntegerArray { storage: Storage::sparse(len, default, 0.1), validity: None }
    }

    pub fn sparse_with_fill_factor(len: usize, default: T, fill_factor: f64) -> Self {
        IntegerArray { storage: Storage::sparse(len, default, fill_factor), validity: None }
    }

    pub fn mapped(start: T, step: T, len: usize) -> Self {
        IntegerArray { storage: Storage::mapped(start, step, len), validity: None }
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

    pub fn to_i64(value: T) -> i64 {
        value.to_i64().unwrap_or(0)
    }
}

impl<T: Integer> TypedArray for IntegerArray<T> {
    type Elem = T;

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn style(&self) -> Style {
        self.storage.style()
    }

    fn default_value(&self) -> T {
        self.storage.default_value(&T::zero())
    }

    fn get(&self, ordinal: usize) -> Result<T, ArrayError> {
        bounds_check("get", ordinal, self.length())?;
        Ok(self.storage.get(ordinal))
    }

    fn set(&mut self, ordinal: usize, value: T) -> Result<(), ArrayError> {
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
        slice.sort_by(|&a, &b| self.storage.get(a).cmp(&self.storage.get(b)));
        if descending {
            slice.reverse();
        }
        let values: Vec<T> = slice.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(slice)
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<T> = permutation.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        IntegerArray { storage: self.storage.gather(ordinals), validity: None }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        IntegerArray { storage: self.storage.slice(start, len), validity: None }
    }

    fn expand(&mut self, new_len: usize) {
        let default = self.default_value();
        self.storage.expand(new_len, &default);
        if let Some(v) = &mut self.validity {
            v.resize(new_len, false);
        }
    }

    fn fill(&mut self, value: T, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        self.storage.fill(value, start, end);
        if let Some(v) = &mut self.validity {
            for slot in v[start..end].iter_mut() {
                *slot = true;
            }
        }
        Ok(())
    }

    fn binary_search(&self, value: &T) -> Result<usize, usize> {
        let vec = self.storage.to_vec();
        vec.binary_search(value)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }
        let v = self.get(ordinal)?;
        Ok(match std::mem::size_of::<T>() {
            4 => Value::Int(v.to_i32().unwrap_or(0)),
            _ => Value::Long(v.to_i64().unwrap_or(0)),
        })
    }
}

impl<T: Integer> NumericArray for IntegerArray<T> {
    fn cum_sum(&mut self, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("cum_sum", end.saturating_sub(1).max(start), self.length())?;
        let mut running = T::zero();
        for i in start..end {
            running = running + self.storage.get(i);
            self.storage.set(i, running);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_get_set() {
        let mut a: IntArray = IntegerArray::dense(vec![1, 2, 3]);
        a.set(0, 9).unwrap();
        assert_eq!(a.get(0).unwrap(), 9);
    }

    #[test]
    fn mapped_reads_affine_sequence() {
        let a: LongArray = IntegerArray::mapped(0, 1, 5);
        assert_eq!(a.get(3).unwrap(), 3);
    }

    #[test]
    fn sort_descending_produces_permutation() {
        let mut a: IntArray = IntegerArray::dense(vec![3, 1, 2]);
        let perm = a.sort(0, 3, true).unwrap();
        assert_eq!(a.storage.to_vec(), vec![3, 2, 1]);
        assert_eq!(perm.len(), 3);
    }

    #[test]
    fn cum_sum_accumulates_in_place() {
        let mut a: IntArray = IntegerArray::dense(vec![1, 2, 3, 4]);
        a.cum_sum(0, 4).unwrap();
        assert_eq!(a.storage.to_vec(), vec![1, 3, 6, 10]);
    }

    #[test]
    fn get_value_picks_int_vs_long_by_width() {
        let a: IntArray = IntegerArray::dense(vec![7]);
        assert_eq!(a.get_value(0).unwrap(), Value::Int(7));
        let b: LongArray = IntegerArray::dense(vec![7]);
        assert_eq!(b.get_value(0).unwrap(), Value::Long(7));
    }
}
