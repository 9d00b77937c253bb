//! # CodedArray — *Dictionary-Encoded Categorical Column*
//!
//! Backs the `Enum` element type and its `CodedDense`/`CodedSparse`
//! styles: values are interned into a shared [`Coding`] table and stored
//! as `i32` codes, so repeated categorical values cost one `i32` each
//! rather than a full clone. The dictionary is shared (`Arc<Mutex<_>>`)
//! so filter views and column copies see the same code space without
//! re-interning.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::enums::Style;
use crate::error::ArrayError;
use crate::storage::{bounds_check, Storage};
use crate::traits::TypedArray;
use crate::value::Value;

/// Bidirectional code/value dictionary shared by one or more [`CodedArray`]s.
#[derive(Debug, Default)]
pub struct Coding<T: Eq + Hash + Clone + Debug> {
    values: Vec<T>,
    codes: HashMap<T, i32>,
}

impl<T: Eq + Hash + Clone + Debug> Coding<T> {
    pub fn new() -> Self {
        Coding { values: Vec::new(), codes: HashMap::new() }
    }

    /// Returns the existing code for `value`, interning a new one if absent.
    pub fn intern(&mut self, value: T) -> i32 {
        if let Some(&code) = self.codes.get(&value) {
            return code;
        }
        let code = self.values.len() as i32;
        self.values.push(value.clone());
        self.codes.insert(value, code);
        code
    }

    pub fn value_of(&self, code: i32) -> Option<&T> {
        self.values.get(code as usize)
    }

    pub fn code_of(&self, value: &T) -> Option<i32> {
        self.codes.get(value).copied()
    }

    pub fn distinct_count(&self) -> usize {
        self.values.len()
    }
}

/// A column of `T` values stored as interned `i32` codes against a shared
/// [`Coding`] dictionary.
#[derive(Debug, Clone)]
pub struct CodedArray<T: Eq + Hash + Clone + Debug + Default + Send + Sync + 'static> {
    codes: Storage<i32>,
    coding: Arc<Mutex<Coding<T>>>,
}

impl<T: Eq + Hash + Clone + Debug + Default + Send + Sync + 'static> CodedArray<T> {
    pub fn new(len: usize) -> Self {
        CodedArray { codes: Storage::sparse(len, -1, 0.1), coding: Arc::new(Mutex::new(Coding::new())) }
    }

    pub fn dense(values: Vec<T>) -> Self {
        let mut coding = Coding::new();
        let codes: Vec<i32> = values.into_iter().map(|v| coding.intern(v)).collect();
        CodedArray { codes: Storage::dense_from(codes), coding: Arc::new(Mutex::new(coding)) }
    }

    /// Shares this array's dictionary with a new, same-length array of
    /// unset codes — used when adding a sibling categorical column that
    /// should reuse the same code space.
    pub fn with_shared_coding(&self, len: usize) -> Self {
        CodedArray { codes: Storage::sparse(len, -1, 0.1), coding: Arc::clone(&self.coding) }
    }

    pub fn distinct_count(&self) -> usize {
        self.coding.lock().unwrap().distinct_count()
    }
}

impl<T: Eq + Hash + Clone + Debug + Default + Send + Sync + 'static> TypedArray for CodedArray<T> {
    type Elem = T;

    fn length(&self) -> usize {
        self.codes.len()
    }

    fn style(&self) -> Style {
        match self.codes.style() {
            Style::Sparse => Style::CodedSparse,
            _ => Style::CodedDense,
        }
    }

    fn default_value(&self) -> T {
        T::default()
    }

    fn get(&self, ordinal: usize) -> Result<T, ArrayError> {
        bounds_check("get", ordinal, self.length())?;
        let code = self.codes.get(ordinal);
        if code < 0 {
            return Ok(T::default());
        }
        let coding = self.coding.lock().unwrap();
        Ok(coding.value_of(code).cloned().unwrap_or_default())
    }

    fn set(&mut self, ordinal: usize, value: T) -> Result<(), ArrayError> {
        bounds_check("set", ordinal, self.length())?;
        let code = self.coding.lock().unwrap().intern(value);
        self.codes.set(ordinal, code);
        Ok(())
    }

    fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError> {
        bounds_check("is_null", ordinal, self.length())?;
        Ok(self.codes.get(ordinal) < 0)
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        bounds_check("swap", i, self.length())?;
        bounds_check("swap", j, self.length())?;
        self.codes.swap(i, j);
        Ok(())
    }

    fn compare(&self, i: usize, j: usize) -> Result<std::cmp::Ordering, ArrayError> {
        let a = self.get(i)?;
        let b = self.get(j)?;
        let coding = self.coding.lock().unwrap();
        let ca = coding.code_of(&a).unwrap_or(-1);
        let cb = coding.code_of(&b).unwrap_or(-1);
        Ok(ca.cmp(&cb))
    }

    fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError> {
        bounds_check("sort", end.saturating_sub(1).max(start), self.length())?;
        let mut slice: Vec<usize> = (start..end).collect();
        slice.sort_by_key(|&i| self.codes.get(i));
        if descending {
            slice.reverse();
        }
        let values: Vec<i32> = slice.iter().map(|&i| self.codes.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.codes.set(start + offset, v);
        }
        Ok(slice)
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<i32> = permutation.iter().map(|&i| self.codes.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.codes.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        CodedArray { codes: self.codes.gather(ordinals), coding: Arc::clone(&self.coding) }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        CodedArray { codes: self.codes.slice(start, len), coding: Arc::clone(&self.coding) }
    }

    fn expand(&mut self, new_len: usize) {
        self.codes.expand(new_len, &-1);
    }

    fn fill(&mut self, value: T, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        let code = self.coding.lock().unwrap().intern(value);
        self.codes.fill(code, start, end);
        Ok(())
    }

    fn binary_search(&self, value: &T) -> Result<usize, usize> {
        let code = match self.coding.lock().unwrap().code_of(value) {
            Some(c) => c,
            None => return Err(self.length()),
        };
        self.codes.to_vec().binary_search(&code)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        bounds_check("get_value", ordinal, self.length())?;
        let code = self.codes.get(ordinal);
        if code < 0 {
            return Ok(Value::Null);
        }
        let value = self.get(ordinal)?;
        Ok(Value::Enum(code, format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_values_share_one_code() {
        let a = CodedArray::dense(vec!["red".to_string(), "blue".to_string(), "red".to_string()]);
        assert_eq!(a.distinct_count(), 2);
        assert_eq!(a.get(0).unwrap(), a.get(2).unwrap());
    }

    #[test]
    fn unset_slots_are_null() {
        let a: CodedArray<String> = CodedArray::new(3);
        assert!(a.is_null(0).unwrap());
    }

    #[test]
    fn shared_coding_reuses_code_space() {
        let a = CodedArray::dense(vec!["x".to_string(), "y".to_string()]);
        let mut b = a.with_shared_coding(2);
        b.set(0, "x".to_string()).unwrap();
        assert_eq!(a.distinct_count(), b.distinct_count());
    }
}
