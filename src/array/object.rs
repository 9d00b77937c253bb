//! # ObjectArray — *Type-Erased Generic Column*
//!
//! Backs the `Object` element type. Rust has no universal object
//! boxing, so the column is monomorphic over [`ObjVal`] — a `dyn`-erased,
//! cloneable, equatable handle (see [`crate::value`]) — rather than over an
//! arbitrary `T`. Callers build entries with [`ObjVal::new`] and read them
//! back with [`ObjVal::downcast_ref`].

use std::cmp::Ordering;

use crate::enums::Style;
use crate::error::ArrayError;
use crate::storage::{bounds_check, Storage};
use crate::traits::TypedArray;
use crate::value::{ObjVal, Value};

#[derive(Debug, Clone, PartialEq)]
struct Slot(Option<ObjVal>);

impl Default for Slot {
    fn default() -> Self {
        Slot(None)
    }
}

#[derive(Debug, Clone)]
pub struct ObjectArray {
    storage: Storage<Slot>,
}

impl ObjectArray {
    pub fn dense(values: Vec<Option<ObjVal>>) -> Self {
        ObjectArray { storage: Storage::dense_from(values.into_iter().map(Slot).collect()) }
    }

    pub fn sparse(len: usize) -> Self {
        ObjectArray { storage: Storage::sparse(len, Slot::default(), 0.1) }
    }

    pub fn get_object(&self, ordinal: usize) -> Result<Option<ObjVal>, ArrayError> {
        bounds_check("get_object", ordinal, self.storage.len())?;
        Ok(self.storage.get(ordinal).0)
    }

    pub fn set_object(&mut self, ordinal: usize, value: Option<ObjVal>) -> Result<(), ArrayError> {
        bounds_check("set_object", ordinal, self.storage.len())?;
        self.storage.set(ordinal, Slot(value));
        Ok(())
    }
}

impl TypedArray for ObjectArray {
    type Elem = Option<ObjVal>;

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn style(&self) -> Style {
        self.storage.style()
    }

    fn default_value(&self) -> Option<ObjVal> {
        None
    }

    fn get(&self, ordinal: usize) -> Result<Option<ObjVal>, ArrayError> {
        self.get_object(ordinal)
    }

    fn set(&mut self, ordinal: usize, value: Option<ObjVal>) -> Result<(), ArrayError> {
        self.set_object(ordinal, value)
    }

    fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError> {
        Ok(self.get_object(ordinal)?.is_none())
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        bounds_check("swap", i, self.length())?;
        bounds_check("swap", j, self.length())?;
        self.storage.swap(i, j);
        Ok(())
    }

    fn compare(&self, i: usize, _j: usize) -> Result<Ordering, ArrayError> {
        bounds_check("compare", i, self.length())?;
        Err(ArrayError::UnsupportedForStyle { op: "compare", style: "Object" })
    }

    fn sort(&mut self, _start: usize, _end: usize, _descending: bool) -> Result<Vec<usize>, ArrayError> {
        Err(ArrayError::UnsupportedForStyle { op: "sort", style: "Object" })
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<Slot> = permutation.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        ObjectArray { storage: self.storage.gather(ordinals) }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        ObjectArray { storage: self.storage.slice(start, len) }
    }

    fn expand(&mut self, new_len: usize) {
        self.storage.expand(new_len, &Slot::default());
    }

    fn fill(&mut self, value: Option<ObjVal>, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        self.storage.fill(Slot(value), start, end);
        Ok(())
    }

    fn binary_search(&self, _value: &Option<ObjVal>) -> Result<usize, usize> {
        Err(0)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        Ok(match self.get_object(ordinal)? {
            Some(o) => Value::Object(o),
            None => Value::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut a = ObjectArray::sparse(3);
        a.set_object(1, Some(ObjVal::new(42i32))).unwrap();
        assert!(a.get_object(1).unwrap().unwrap().downcast_ref::<i32>().copied() == Some(42));
        assert!(a.get_object(0).unwrap().is_none());
    }

    #[test]
    fn null_slots_report_is_null() {
        let a = ObjectArray::sparse(2);
        assert!(a.is_null(0).unwrap());
    }

    #[test]
    fn compare_is_unsupported() {
        let a = ObjectArray::sparse(2);
        assert!(matches!(a.compare(0, 1), Err(ArrayError::UnsupportedForStyle { .. })));
    }
}
