//! # StringArray

use std::cmp::Ordering;

use crate::enums::Style;
use crate::error::ArrayError;
use crate::storage::{bounds_check, Storage};
use crate::traits::TypedArray;
use crate::value::Value;

/// A column of `String` values, dense or sparse over the empty string.
#[derive(Debug, Clone)]
pub struct StringArray {
    storage: Storage<String>,
    validity: Option<Vec<bool>>,
}

impl StringArray {
    pub fn dense(values: Vec<String>) -> Self {
        StringArray { storage: Storage::dense_from(values), validity: None }
    }

    pub fn sparse(len: usize, default: String) -> Self {
        StringArray { storage: Storage::sparse(len, default, 0.1), validity: None }
    }

    pub fn sparse_with_fill_factor(len: usize, default: String, fill_factor: f64) -> Self {
        StringArray { storage: Storage::sparse(len, default, fill_factor), validity: None }
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

impl TypedArray for StringArray {
    type Elem = String;

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn style(&self) -> Style {
        self.storage.style()
    }

    fn default_value(&self) -> String {
        self.storage.default_value(&String::new())
    }

    fn get(&self, ordinal: usize) -> Result<String, ArrayError> {
        bounds_check("get", ordinal, self.length())?;
        Ok(self.storage.get(ordinal))
    }

    fn set(&mut self, ordinal: usize, value: String) -> Result<(), ArrayError> {
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
        let values: Vec<String> = slice.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(slice)
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<String> = permutation.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        StringArray { storage: self.storage.gather(ordinals), validity: None }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        StringArray { storage: self.storage.slice(start, len), validity: None }
    }

    fn expand(&mut self, new_len: usize) {
        let default = self.default_value();
        self.storage.expand(new_len, &default);
        if let Some(v) = &mut self.validity {
            v.resize(new_len, false);
        }
    }

    fn fill(&mut self, value: String, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        self.storage.fill(value, start, end);
        if let Some(v) = &mut self.validity {
            for slot in v[start..end].iter_mut() {
                *slot = true;
            }
        }
        Ok(())
    }

    fn binary_search(&self, value: &String) -> Result<usize, usize> {
        let vec = self.storage.to_vec();
        vec.binary_search(value)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }
        Ok(Value::String(self.get(ordinal)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut a = StringArray::dense(vec!["a".into(), "b".into()]);
        a.set(0, "z".into()).unwrap();
        assert_eq!(a.get(0).unwrap(), "z");
    }

    #[test]
    fn sort_is_lexicographic() {
        let mut a = StringArray::dense(vec!["banana".into(), "apple".into(), "cherry".into()]);
        a.sort(0, 3, false).unwrap();
        assert_eq!(a.storage.to_vec(), vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn sparse_defaults_to_empty_string() {
        let a = StringArray::sparse(3, String::new());
        assert_eq!(a.get(0).unwrap(), "");
    }
}
