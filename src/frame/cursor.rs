//! # Cursor — *Movable (Row, Column) Read/Write Pointer, and Axis Vectors*
//!
//! A [`Cursor`] pairs a [`FrameContent`] with a mutable `(row_ordinal,
//! col_ordinal)` position, so callers can walk a frame imperatively without
//! re-resolving coordinates on every access. [`Axis`] names which ordinal a
//! relative move (`advance`/`retreat`) changes.
//!
//! [`Row`] and [`Column`] are axis-fixed cursors: each pins one ordinal on
//! its own axis and reads/writes across the other. Both share the
//! one-dimensional operations in [`AxisVector`] (`select`, `filter`,
//! `min_by`/`max_by`, `distinct`, `group_by`, `stats`, a [`DataFrameValue`]
//! `stream`) over whichever axis they're bound to.

use std::cmp::Ordering;

use crate::aliases::{Coordinate, Key, Ordinal};
use crate::array::Array;
use crate::enums::ElementType;
use crate::error::{FrameError, Result};
use crate::frame::content::FrameContent;
use crate::value::{DataFrameValue, ObjVal, Value};

/// Which ordinal a [`Cursor`] move affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// A `(row, col)`-addressed read/write handle into a frame.
pub struct Cursor<'a, R: Key, C: Key> {
    content: &'a FrameContent<R, C>,
    row_ordinal: Ordinal,
    col_ordinal: Ordinal,
}

impl<'a, R: Key, C: Key> Cursor<'a, R, C> {
    pub fn new(content: &'a FrameContent<R, C>) -> Self {
        Cursor { content, row_ordinal: 0, col_ordinal: 0 }
    }

    pub fn at(content: &'a FrameContent<R, C>, row_ordinal: Ordinal, col_ordinal: Ordinal) -> Self {
        Cursor { content, row_ordinal, col_ordinal }
    }

    pub fn row_ordinal(&self) -> Ordinal {
        self.row_ordinal
    }

    pub fn col_ordinal(&self) -> Ordinal {
        self.col_ordinal
    }

    pub fn seek(&mut self, row_ordinal: Ordinal, col_ordinal: Ordinal) {
        self.row_ordinal = row_ordinal;
        self.col_ordinal = col_ordinal;
    }

    /// Moves one step forward along `axis`.
    pub fn advance(&mut self, axis: Axis) {
        match axis {
            Axis::Row => self.row_ordinal += 1,
            Axis::Column => self.col_ordinal += 1,
        }
    }

    /// Moves one step backward along `axis`. Saturates at 0.
    pub fn retreat(&mut self, axis: Axis) {
        match axis {
            Axis::Row => self.row_ordinal = self.row_ordinal.saturating_sub(1),
            Axis::Column => self.col_ordinal = self.col_ordinal.saturating_sub(1),
        }
    }

    pub fn row_key(&self) -> Option<R> {
        self.content.row_index().key_at(self.row_ordinal)
    }

    pub fn col_key(&self) -> Option<C> {
        self.content.col_index().key_at(self.col_ordinal)
    }

    pub fn get(&self) -> Result<Value> {
        self.content.get_value(self.row_ordinal, self.col_ordinal)
    }

    /// Writes `value` at the cursor's current position, applying the
    /// `Int -> Long -> Double` widening rule for numeric columns and
    /// failing with [`FrameError::TypeMismatch`] on any other element-type
    /// conflict (surfaced via [`crate::error::ArrayError::UnsupportedForStyle`]).
    pub fn set(&self, value: Value) -> Result<()> {
        self.content.set_value(self.row_ordinal, self.col_ordinal, value)
    }

    pub fn is_null(&self) -> Result<bool> {
        let col_coord = self.col_ordinal;
        let array = self.content.column_at(col_coord)?;
        let row_coord = self
            .content
            .row_index()
            .coordinate_at(self.row_ordinal)
            .ok_or(FrameError::OrdinalOutOfBounds {
                axis: "row",
                ordinal: self.row_ordinal,
                length: self.content.n_rows(),
            })?;
        Ok(array.is_null(row_coord)?)
    }
}

/// Aggregate summary over one [`AxisVector`]: population count, how many of
/// those were null, the natural-order extremes, and the running sum over
/// whichever cells parsed as numeric (`None` if none did).
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStats {
    pub count: usize,
    pub null_count: usize,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub sum: Option<f64>,
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Int(x) => Some(*x as f64),
        Value::Long(x) => Some(*x as f64),
        Value::Double(x) => Some(*x),
        _ => None,
    }
}

/// Builds a fresh [`Array`] out of `len` values produced by `get`: the
/// columns' shared element type when `uniform` is given, otherwise a fresh
/// Object array (each non-null, non-object value boxed via [`ObjVal::new`]).
fn build_vector_array<F: Fn(usize) -> Result<Value>>(uniform: Option<ElementType>, len: usize, get: F) -> Result<Array> {
    let element_type = uniform.unwrap_or(ElementType::Object);
    let mut array = Array::create(element_type, len, None, None);
    for i in 0..len {
        let value = get(i)?;
        let value = if uniform.is_none() {
            match value {
                Value::Object(_) | Value::Null => value,
                other => Value::Object(ObjVal::new(other)),
            }
        } else {
            value
        };
        array.set_value(i, value)?;
    }
    Ok(array)
}

/// One-dimensional operations shared by [`Row`] and [`Column`]: each reads
/// `len()` cells via `get`, tagging the ordinal it fixes and the one it
/// walks through [`AxisVector::cell`] so a [`DataFrameValue`] always carries
/// both.
pub trait AxisVector {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, i: usize) -> Result<Value>;

    fn cell(&self, i: usize, value: Value) -> DataFrameValue;

    fn values(&self) -> Result<Vec<Value>> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// A [`DataFrameValue`] stream, one per cell, in ordinal order.
    fn stream(&self) -> Result<Vec<DataFrameValue>> {
        (0..self.len()).map(|i| Ok(self.cell(i, self.get(i)?))).collect()
    }

    /// Ordinals (within this vector) for which `predicate` holds.
    fn select<P: Fn(&Value) -> bool>(&self, predicate: P) -> Result<Vec<usize>>
    where
        Self: Sized,
    {
        let mut matches = Vec::new();
        for i in 0..self.len() {
            if predicate(&self.get(i)?) {
                matches.push(i);
            }
        }
        Ok(matches)
    }

    /// Values for which `predicate` holds, in ordinal order.
    fn filter<P: Fn(&Value) -> bool>(&self, predicate: P) -> Result<Vec<Value>>
    where
        Self: Sized,
    {
        Ok(self.values()?.into_iter().filter(|v| predicate(v)).collect())
    }

    /// The smallest non-null cell by `cmp`, as a [`DataFrameValue`] carrying
    /// the ordinal it was found at.
    fn min_by<F: Fn(&Value, &Value) -> Ordering>(&self, cmp: F) -> Result<Option<DataFrameValue>>
    where
        Self: Sized,
    {
        let mut best: Option<DataFrameValue> = None;
        for i in 0..self.len() {
            let value = self.get(i)?;
            if value.is_null() {
                continue;
            }
            let candidate = self.cell(i, value);
            let keep = match &best {
                None => true,
                Some(cur) => cmp(&candidate.value, &cur.value) == Ordering::Less,
            };
            if keep {
                best = Some(candidate);
            }
        }
        Ok(best)
    }

    /// The largest non-null cell by `cmp`.
    fn max_by<F: Fn(&Value, &Value) -> Ordering>(&self, cmp: F) -> Result<Option<DataFrameValue>>
    where
        Self: Sized,
    {
        let mut best: Option<DataFrameValue> = None;
        for i in 0..self.len() {
            let value = self.get(i)?;
            if value.is_null() {
                continue;
            }
            let candidate = self.cell(i, value);
            let keep = match &best {
                None => true,
                Some(cur) => cmp(&candidate.value, &cur.value) == Ordering::Greater,
            };
            if keep {
                best = Some(candidate);
            }
        }
        Ok(best)
    }

    /// First `limit` distinct values, in ordinal order (`None` = unbounded).
    fn distinct(&self, limit: Option<usize>) -> Result<Vec<Value>> {
        let mut seen = Vec::new();
        for i in 0..self.len() {
            let value = self.get(i)?;
            if !seen.contains(&value) {
                seen.push(value);
                if let Some(limit) = limit {
                    if seen.len() >= limit {
                        break;
                    }
                }
            }
        }
        Ok(seen)
    }

    /// Groups this vector's ordinals by equal cell value, preserving the
    /// order each distinct value was first seen in.
    fn group_by(&self) -> Result<Vec<(Value, Vec<usize>)>> {
        let mut groups: Vec<(Value, Vec<usize>)> = Vec::new();
        for i in 0..self.len() {
            let value = self.get(i)?;
            match groups.iter_mut().find(|(v, _)| *v == value) {
                Some((_, ordinals)) => ordinals.push(i),
                None => groups.push((value, vec![i])),
            }
        }
        Ok(groups)
    }

    fn stats(&self) -> Result<VectorStats> {
        let mut count = 0;
        let mut null_count = 0;
        let mut min: Option<Value> = None;
        let mut max: Option<Value> = None;
        let mut sum: Option<f64> = None;
        for i in 0..self.len() {
            let value = self.get(i)?;
            count += 1;
            if value.is_null() {
                null_count += 1;
                continue;
            }
            if min.as_ref().map(|m| value.compare(m) == Some(Ordering::Less)).unwrap_or(true) {
                min = Some(value.clone());
            }
            if max.as_ref().map(|m| value.compare(m) == Some(Ordering::Greater)).unwrap_or(true) {
                max = Some(value.clone());
            }
            if let Some(n) = numeric_value(&value) {
                sum = Some(sum.unwrap_or(0.0) + n);
            }
        }
        Ok(VectorStats { count, null_count, min, max, sum })
    }
}

/// A read/write handle bound to one row, walking across every visible
/// column.
pub struct Row<'a, R: Key, C: Key> {
    content: &'a FrameContent<R, C>,
    ordinal: Ordinal,
}

impl<'a, R: Key, C: Key> Row<'a, R, C> {
    pub fn new(content: &'a FrameContent<R, C>, ordinal: Ordinal) -> Self {
        Row { content, ordinal }
    }

    pub fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Repoints this cursor at a different row, reusing its borrow of
    /// `content` rather than allocating a new cursor.
    pub fn reseek(&mut self, ordinal: Ordinal) {
        self.ordinal = ordinal;
    }

    pub fn key(&self) -> Option<R> {
        self.content.row_index().key_at(self.ordinal)
    }

    pub fn get_by_key(&self, col_key: &C) -> Result<Value> {
        let col_ordinal = self
            .content
            .col_index()
            .ordinal_of_key(col_key)
            .ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        self.content.get_value(self.ordinal, col_ordinal)
    }

    pub fn set(&self, col_ordinal: Ordinal, value: Value) -> Result<()> {
        self.content.set_value(self.ordinal, col_ordinal, value)
    }

    pub fn set_by_key(&self, col_key: &C, value: Value) -> Result<()> {
        let col_ordinal = self
            .content
            .col_index()
            .ordinal_of_key(col_key)
            .ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        self.set(col_ordinal, value)
    }

    /// Materializes this row into a fresh array: the columns' shared
    /// element type when every visible column agrees, a fresh Object array
    /// otherwise.
    pub fn to_array(&self) -> Result<Array> {
        let n = AxisVector::len(self);
        let mut element_types = Vec::with_capacity(n);
        for c in 0..n {
            element_types.push(self.content.column_at(c)?.element_type());
        }
        let uniform = element_types.first().copied().filter(|t| element_types.iter().all(|u| u == t));
        build_vector_array(uniform, n, |i| AxisVector::get(self, i))
    }
}

impl<'a, R: Key, C: Key> AxisVector for Row<'a, R, C> {
    fn len(&self) -> usize {
        self.content.n_cols()
    }

    fn get(&self, i: usize) -> Result<Value> {
        self.content.get_value(self.ordinal, i)
    }

    fn cell(&self, i: usize, value: Value) -> DataFrameValue {
        DataFrameValue { row_ordinal: self.ordinal, col_ordinal: i, value }
    }
}

/// A read/write handle bound to one column, walking across every visible
/// row.
pub struct Column<'a, R: Key, C: Key> {
    content: &'a FrameContent<R, C>,
    ordinal: Ordinal,
}

impl<'a, R: Key, C: Key> Column<'a, R, C> {
    pub fn new(content: &'a FrameContent<R, C>, ordinal: Ordinal) -> Self {
        Column { content, ordinal }
    }

    pub fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// Repoints this cursor at a different column, reusing its borrow of
    /// `content` rather than allocating a new cursor.
    pub fn reseek(&mut self, ordinal: Ordinal) {
        self.ordinal = ordinal;
    }

    pub fn key(&self) -> Option<C> {
        self.content.col_index().key_at(self.ordinal)
    }

    pub fn get_by_key(&self, row_key: &R) -> Result<Value> {
        let row_ordinal = self
            .content
            .row_index()
            .ordinal_of_key(row_key)
            .ok_or_else(|| FrameError::UnknownRowKey(format!("{row_key:?}")))?;
        self.content.get_value(row_ordinal, self.ordinal)
    }

    pub fn set(&self, row_ordinal: Ordinal, value: Value) -> Result<()> {
        self.content.set_value(row_ordinal, self.ordinal, value)
    }

    pub fn set_by_key(&self, row_key: &R, value: Value) -> Result<()> {
        let row_ordinal = self
            .content
            .row_index()
            .ordinal_of_key(row_key)
            .ok_or_else(|| FrameError::UnknownRowKey(format!("{row_key:?}")))?;
        self.set(row_ordinal, value)
    }

    /// This column's values, in the row index's current visible order, as a
    /// standalone array sharing no storage with the frame.
    pub fn to_array(&self) -> Result<Array> {
        let coords: Vec<Coordinate> = (0..self.content.n_rows())
            .map(|o| self.content.row_index().coordinate_at(o).expect("ordinal within bounds"))
            .collect();
        Ok(self.content.column_at(self.ordinal)?.gather(&coords))
    }
}

impl<'a, R: Key, C: Key> AxisVector for Column<'a, R, C> {
    fn len(&self) -> usize {
        self.content.n_rows()
    }

    fn get(&self, i: usize) -> Result<Value> {
        self.content.get_value(i, self.ordinal)
    }

    fn cell(&self, i: usize, value: Value) -> DataFrameValue {
        DataFrameValue { row_ordinal: i, col_ordinal: self.ordinal, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Array, IntArray};

    #[test]
    fn cursor_walks_and_reads_values() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add_all(vec!["r0".into(), "r1".into()], false).unwrap();
        content.add_column("c0".into(), Array::Int(IntArray::dense(vec![10, 20]))).unwrap();

        let mut cursor = Cursor::new(&content);
        assert_eq!(cursor.get().unwrap(), Value::Int(10));
        cursor.advance(Axis::Row);
        assert_eq!(cursor.get().unwrap(), Value::Int(20));
    }

    #[test]
    fn cursor_write_widens_int_into_double_column() {
        use crate::array::DoubleArray;
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add("r0".into()).unwrap();
        content.add_column("c0".into(), Array::Double(DoubleArray::dense(vec![0.0]))).unwrap();
        let cursor = Cursor::new(&content);
        cursor.set(Value::Int(5)).unwrap();
        assert_eq!(cursor.get().unwrap(), Value::Double(5.0));
    }

    #[test]
    fn retreat_saturates_at_zero() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add("r0".into()).unwrap();
        content.add_column("c0".into(), Array::Int(IntArray::dense(vec![1]))).unwrap();
        let mut cursor = Cursor::new(&content);
        cursor.retreat(Axis::Row);
        assert_eq!(cursor.row_ordinal(), 0);
    }

    fn grid() -> FrameContent<String, String> {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add_all(vec!["r0".into(), "r1".into(), "r2".into()], false).unwrap();
        content.add_column("a".into(), Array::Int(IntArray::dense(vec![3, 1, 1]))).unwrap();
        content.add_column("b".into(), Array::Int(IntArray::dense(vec![30, 10, 20]))).unwrap();
        content
    }

    #[test]
    fn row_reads_across_columns_by_ordinal_and_key() {
        let content = grid();
        let row = Row::new(&content, 1);
        assert_eq!(row.get_by_key(&"b".to_string()).unwrap(), Value::Int(10));
        assert_eq!(row.to_array().unwrap().get_value(1).unwrap(), Value::Int(10));
    }

    #[test]
    fn column_gathers_values_in_row_index_order() {
        let content = grid();
        let column = Column::new(&content, 0);
        assert_eq!(column.values().unwrap(), vec![Value::Int(3), Value::Int(1), Value::Int(1)]);
        assert_eq!(column.to_array().unwrap().get_value(0).unwrap(), Value::Int(3));
    }

    #[test]
    fn column_group_by_collects_matching_ordinals() {
        let content = grid();
        let column = Column::new(&content, 0);
        let groups = column.group_by().unwrap();
        let ones = groups.iter().find(|(v, _)| *v == Value::Int(1)).unwrap();
        assert_eq!(ones.1, vec![1, 2]);
    }

    #[test]
    fn column_stats_reports_bounds_and_sum() {
        let content = grid();
        let column = Column::new(&content, 1);
        let stats = column.stats().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.null_count, 0);
        assert_eq!(stats.min, Some(Value::Int(10)));
        assert_eq!(stats.max, Some(Value::Int(30)));
        assert_eq!(stats.sum, Some(60.0));
    }

    #[test]
    fn row_min_by_finds_smallest_cell_across_columns() {
        let content = grid();
        let row = Row::new(&content, 0);
        let min = row.min_by(|a, b| a.compare(b).unwrap()).unwrap().unwrap();
        assert_eq!(min.value, Value::Int(3));
        assert_eq!(min.col_ordinal, 0);
    }
}
