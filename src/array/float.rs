//! # FloatArray — *Generic Floating-Point Column*

use std::cmp::Ordering;

use crate::enums::Style;
use crate::error::ArrayError;
use crate::numeric::Float;
use crate::storage::{bounds_check, Storage};
use crate::traits::{NumericArray, TypedArray};
use crate::value::Value;

/// A column of `T` (`f64`) values. [`DoubleArray`] is the alias callers
/// normally use.
#[derive(Debug, Clone)]
pub struct FloatArray<T: Float> {
    storage: Storage<T>,
    validity: Option<Vec<bool>>,
}

pub type DoubleArray = FloatArray<f64>;

impl<T: Float> FloatArray<T> {
    pub fn dense(values: Vec<T>) -> Self {
        FloatArray { storage: Storage::dense_from(values), validity: None }
    }

    pub fn sparse(len: usize, default: T) -> Self {
        FloatArray { storage: Storage::sparse(len, default, 0.1), validity: None }
    }

    pub fn sparse_with_fill_factor(len: usize, default: T, fill_factor: f64) -> Self {
        FloatArray { storage: Storage::sparse(len, default, fill_factor), validity: None }
    }

    pub fn mapped(start: T, step: T, len: usize) -> Self {
        FloatArray { storage: Storage::mapped(start, step, len), validity: None }
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

    fn cmp_values(a: T, b: T) -> Ordering {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

impl<T: Float> TypedArray for FloatArray<T> {
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
        Ok(Self::cmp_values(self.get(i)?, self.get(j)?))
    }

    fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError> {
        bounds_check("sort", end.saturating_sub(1).max(start), self.length())?;
        let mut slice: Vec<usize> = (start..end).collect();
        slice.sort_by(|&a, &b| Self::cmp_values(self.storage.get(a), self.storage.get(b)));
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
        FloatArray { storage: self.storage.gather(ordinals), validity: None }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        FloatArray { storage: self.storage.slice(start, len), validity: None }
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
        vec.binary_search_by(|probe| Self::cmp_values(*probe, *value))
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }
        Ok(Value::Double(self.get(ordinal)?.to_f64().unwrap_or(0.0)))
    }
}

impl<T: Float> NumericArray for FloatArray<T> {
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
        let mut a: DoubleArray = FloatArray::dense(vec![1.0, 2.0, 3.0]);
        a.set(1, 9.5).unwrap();
        assert_eq!(a.get(1).unwrap(), 9.5);
    }

    #[test]
    fn sort_ascending_orders_values() {
        let mut a: DoubleArray = FloatArray::dense(vec![3.0, 1.0, 2.0]);
        a.sort(0, 3, false).unwrap();
        assert_eq!(a.storage.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn cum_sum_accumulates_in_place() {
        let mut a: DoubleArray = FloatArray::dense(vec![1.0, 1.0, 1.0]);
        a.cum_sum(0, 3).unwrap();
        assert_eq!(a.storage.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn binary_search_finds_present_value() {
        let a: DoubleArray = FloatArray::dense(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.binary_search(&2.0), Ok(1));
        assert_eq!(a.binary_search(&2.5), Err(2));
    }
}
