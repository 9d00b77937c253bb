//! # Frame — *Top-Level Tabular Façade*
//!
//! [`Frame`] is the crate's public entry point: it owns a
//! [`FrameContent`] and layers the cursor, sort, and parallel-engine
//! machinery behind a small, cohesive method set. Most call sites only ever
//! touch this type.

use crate::aliases::{Key, Ordinal};
use crate::array::{Array, BooleanArray, DoubleArray, IntArray, LongArray, ObjectArray};
use crate::enums::Direction;
use crate::error::{FrameError, Result};
use crate::frame::content::FrameContent;
use crate::frame::cursor::{AxisVector, Column, Cursor, Row};
use crate::frame::sort;
use crate::index::KeyIndex;
use crate::parallel::ParallelEngine;
use crate::value::{DataFrameValue, ObjVal, Value};

/// A keyed, two-dimensional, typed tabular frame.
pub struct Frame<R: Key, C: Key> {
    content: FrameContent<R, C>,
}

impl<R: Key, C: Key> Frame<R, C> {
    pub fn empty() -> Self {
        Frame { content: FrameContent::empty() }
    }

    pub fn from_content(content: FrameContent<R, C>) -> Self {
        Frame { content }
    }

    pub fn content(&self) -> &FrameContent<R, C> {
        &self.content
    }

    pub fn rows(&self) -> &KeyIndex<R> {
        self.content.row_index()
    }

    pub fn cols(&self) -> &KeyIndex<C> {
        self.content.col_index()
    }

    pub fn n_rows(&self) -> usize {
        self.content.n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.content.n_cols()
    }

    pub fn cursor(&self) -> Cursor<'_, R, C> {
        Cursor::new(&self.content)
    }

    /// An axis-fixed cursor over the row at `row_ordinal`, walking every
    /// visible column.
    pub fn row(&self, row_ordinal: Ordinal) -> Row<'_, R, C> {
        Row::new(&self.content, row_ordinal)
    }

    /// An axis-fixed cursor over the column at `col_ordinal`, walking every
    /// visible row.
    pub fn column(&self, col_ordinal: Ordinal) -> Column<'_, R, C> {
        Column::new(&self.content, col_ordinal)
    }

    /// Swaps this frame's logical orientation: row `r`, column `c` becomes
    /// row `c`, column `r`. When every column shares one element type the
    /// result's columns hold that same type; otherwise the result is a
    /// fresh Object-typed frame.
    pub fn transpose(&self) -> Result<Frame<C, R>> {
        Ok(Frame { content: self.content.transpose()? })
    }

    pub fn get(&self, row_ordinal: Ordinal, col_ordinal: Ordinal) -> Result<Value> {
        self.content.get_value(row_ordinal, col_ordinal)
    }

    pub fn set(&self, row_ordinal: Ordinal, col_ordinal: Ordinal, value: Value) -> Result<()> {
        self.content.set_value(row_ordinal, col_ordinal, value)
    }

    pub fn add_row(&self, key: R) -> Result<usize> {
        self.content.add_row(key)
    }

    pub fn add_column(&self, key: C, array: Array) -> Result<usize> {
        self.content.add_column(key, array)
    }

    /// Applies `f(row_ordinal, col_ordinal, value)` to every cell, forking
    /// across the row/column axes via [`ParallelEngine`] when `parallel`.
    pub fn for_each<F>(&self, f: F, parallel: bool) -> Result<()>
    where
        F: Fn(Ordinal, Ordinal, Value) + Sync,
    {
        let engine = ParallelEngine::new();
        engine.for_each_cell(
            self.n_rows(),
            self.n_cols(),
            &move |row, col| {
                let value = self.content.get_value(row, col)?;
                f(row, col, value);
                Ok(())
            },
            parallel,
        )
    }

    /// Applies `f` to every cell and writes its result back in place.
    pub fn apply<F>(&self, f: F, parallel: bool) -> Result<()>
    where
        F: Fn(&Value) -> Value + Sync,
    {
        let engine = ParallelEngine::new();
        engine.for_each_cell(
            self.n_rows(),
            self.n_cols(),
            &move |row, col| {
                let value = self.content.get_value(row, col)?;
                self.content.set_value(row, col, f(&value))
            },
            parallel,
        )
    }

    pub fn min(&self, col_key: &C, parallel: bool) -> Result<Option<DataFrameValue>> {
        let col_ordinal = self.cols().ordinal_of_key(col_key).ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        ParallelEngine::new().min(&self.content, col_ordinal, parallel)
    }

    pub fn max(&self, col_key: &C, parallel: bool) -> Result<Option<DataFrameValue>> {
        let col_ordinal = self.cols().ordinal_of_key(col_key).ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        ParallelEngine::new().max(&self.content, col_ordinal, parallel)
    }

    pub fn bounds(&self, col_key: &C, parallel: bool) -> Result<Option<(DataFrameValue, DataFrameValue)>> {
        let col_ordinal = self.cols().ordinal_of_key(col_key).ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        ParallelEngine::new().bounds(&self.content, col_ordinal, parallel)
    }

    /// Sorts rows by the natural order of their keys.
    pub fn sort_by_key_order(&self, direction: Direction) -> Frame<R, C> {
        let sorted_rows = sort::sort_keys(self.rows(), direction);
        Frame { content: self.content.with_row_index(sorted_rows) }
    }

    /// Sorts rows by one or more column values, in priority order.
    pub fn sort_by_columns(&self, col_keys: &[C], directions: &[Direction], parallel: bool) -> Result<Frame<R, C>> {
        let sorted_rows = sort::sort_rows_by_columns(&self.content, col_keys, directions, parallel)?;
        Ok(Frame { content: self.content.with_row_index(sorted_rows) })
    }

    pub fn sort_by_custom<F>(&self, cmp: F, parallel: bool) -> Result<Frame<R, C>>
    where
        F: Fn(&R, &R) -> std::cmp::Ordering + Sync,
    {
        let sorted_rows = sort::sort_rows_by_custom(&self.content, cmp, parallel)?;
        Ok(Frame { content: self.content.with_row_index(sorted_rows) })
    }

    /// Sorts columns by the values held at one or more row keys, in
    /// priority order — the column-axis counterpart to
    /// [`Frame::sort_by_columns`].
    pub fn sort_cols_by_rows(&self, row_keys: &[R], directions: &[Direction], parallel: bool) -> Result<Frame<R, C>> {
        let sorted_cols = sort::sort_cols_by_rows(&self.content, row_keys, directions, parallel)?;
        Ok(Frame { content: self.content.with_col_index(sorted_cols) })
    }

    /// A deep, independent copy of this frame.
    pub fn copy(&self) -> Frame<R, C> {
        Frame { content: self.content.copy() }
    }

    /// Merges `other` into `self` in place: matching row/column keys have
    /// their values overwritten by `other`'s, and (when enabled) unmatched
    /// keys from `other` are appended as new rows/columns.
    pub fn update(&self, other: &Frame<R, C>, add_rows: bool, add_columns: bool) -> Result<()> {
        if add_columns {
            for col_ordinal in 0..other.n_cols() {
                if let Some(key) = other.cols().key_at(col_ordinal) {
                    if self.cols().coordinate(&key).is_none() {
                        let mut blank = other.content.column_at(col_ordinal)?.copy_range(0, 0);
                        blank.expand(self.n_rows());
                        self.content.add_column(key, blank)?;
                    }
                }
            }
        }
        if add_rows {
            for row_ordinal in 0..other.n_rows() {
                if let Some(key) = other.rows().key_at(row_ordinal) {
                    if self.rows().coordinate(&key).is_none() {
                        self.content.add_row(key)?;
                    }
                }
            }
        }
        for row_ordinal in 0..other.n_rows() {
            let Some(row_key) = other.rows().key_at(row_ordinal) else { continue };
            let Some(self_row_ordinal) = self.rows().ordinal_of_key(&row_key) else { continue };
            for col_ordinal in 0..other.n_cols() {
                let Some(col_key) = other.cols().key_at(col_ordinal) else { continue };
                let Some(self_col_ordinal) = self.cols().ordinal_of_key(&col_key) else { continue };
                let value = other.get(row_ordinal, col_ordinal)?;
                self.set(self_row_ordinal, self_col_ordinal, value)?;
            }
        }
        Ok(())
    }

    fn map_column<T, F>(&self, col_key: &C, f: F) -> Result<Vec<T>>
    where
        F: Fn(&Value) -> T,
    {
        let col_ordinal = self.cols().ordinal_of_key(col_key).ok_or_else(|| FrameError::UnknownColumnKey(format!("{col_key:?}")))?;
        (0..self.n_rows()).map(|row| Ok(f(&self.content.get_value(row, col_ordinal)?))).collect()
    }

    pub fn map_to_booleans<F: Fn(&Value) -> bool>(&self, col_key: &C, f: F) -> Result<BooleanArray> {
        Ok(BooleanArray::dense(self.map_column(col_key, f)?))
    }

    pub fn map_to_ints<F: Fn(&Value) -> i32>(&self, col_key: &C, f: F) -> Result<IntArray> {
        Ok(IntArray::dense(self.map_column(col_key, f)?))
    }

    pub fn map_to_longs<F: Fn(&Value) -> i64>(&self, col_key: &C, f: F) -> Result<LongArray> {
        Ok(LongArray::dense(self.map_column(col_key, f)?))
    }

    pub fn map_to_doubles<F: Fn(&Value) -> f64>(&self, col_key: &C, f: F) -> Result<DoubleArray> {
        Ok(DoubleArray::dense(self.map_column(col_key, f)?))
    }

    pub fn map_to_objects<F: Fn(&Value) -> Option<ObjVal>>(&self, col_key: &C, f: F) -> Result<ObjectArray> {
        Ok(ObjectArray::dense(self.map_column(col_key, f)?))
    }

    /// Maps every cell to its sign, producing a fresh Int-typed frame:
    /// `-1`/`0`/`1` for numeric cells, `0` for anything non-numeric.
    pub fn sign(&self) -> Result<Frame<R, C>> {
        fn sign_of(v: &Value) -> i32 {
            match v {
                Value::Int(x) => x.signum(),
                Value::Long(x) => x.signum() as i32,
                Value::Double(x) => if *x > 0.0 { 1 } else if *x < 0.0 { -1 } else { 0 },
                _ => 0,
            }
        }

        let rows = self.rows().copy(true);
        let cols = self.cols().copy(true);
        let mut columns = Vec::with_capacity(self.n_cols());
        for col_ordinal in 0..self.n_cols() {
            let col_key = self.cols().key_at(col_ordinal).expect("ordinal within current bounds");
            columns.push(Array::Int(self.map_to_ints(&col_key, sign_of)?));
        }
        Ok(Frame { content: FrameContent::from_parts(rows, cols, columns) })
    }

    pub fn head(&self, n: usize) -> Frame<R, C> {
        let n = n.min(self.n_rows());
        let keys: Vec<R> = (0..n).filter_map(|o| self.rows().key_at(o)).collect();
        Frame { content: self.content.filter_rows(&keys).expect("head keys are always visible") }
    }

    pub fn tail(&self, n: usize) -> Frame<R, C> {
        let total = self.n_rows();
        let n = n.min(total);
        let keys: Vec<R> = ((total - n)..total).filter_map(|o| self.rows().key_at(o)).collect();
        Frame { content: self.content.filter_rows(&keys).expect("tail keys are always visible") }
    }

    pub fn left(&self, n: usize) -> Frame<R, C> {
        let n = n.min(self.n_cols());
        let keys: Vec<C> = (0..n).filter_map(|o| self.cols().key_at(o)).collect();
        Frame { content: self.content.filter_cols(&keys).expect("left keys are always visible") }
    }

    pub fn right(&self, n: usize) -> Frame<R, C> {
        let total = self.n_cols();
        let n = n.min(total);
        let keys: Vec<C> = ((total - n)..total).filter_map(|o| self.cols().key_at(o)).collect();
        Frame { content: self.content.filter_cols(&keys).expect("right keys are always visible") }
    }

    pub fn select(&self, row_keys: &[R], col_keys: &[C]) -> Result<Frame<R, C>> {
        let by_rows = self.content.filter_rows(row_keys)?;
        let by_both = by_rows.filter_cols(col_keys)?;
        Ok(Frame { content: by_both })
    }

    pub fn select_by(
        &self,
        row_predicate: impl Fn(&R) -> bool,
        col_predicate: impl Fn(&C) -> bool,
    ) -> Frame<R, C> {
        let by_rows = self.content.filter_rows_predicate(row_predicate);
        let by_both = by_rows.filter_cols_predicate(col_predicate);
        Frame { content: by_both }
    }
}

impl<R: Key, C: Key> PartialEq for Frame<R, C> {
    fn eq(&self, other: &Self) -> bool {
        if self.n_rows() != other.n_rows() || self.n_cols() != other.n_cols() {
            return false;
        }
        if self.rows().keys_in_order() != other.rows().keys_in_order() {
            return false;
        }
        if self.cols().keys_in_order() != other.cols().keys_in_order() {
            return false;
        }
        for row in 0..self.n_rows() {
            for col in 0..self.n_cols() {
                match (self.get(row, col), other.get(row, col)) {
                    (Ok(a), Ok(b)) if a == b => continue,
                    _ => return false,
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Array, DoubleArray, IntArray};

    fn demo_frame() -> Frame<String, String> {
        let frame: Frame<String, String> = Frame::empty();
        frame.rows().add_all(vec!["r0".into(), "r1".into(), "r2".into()], false).unwrap();
        frame.add_column("a".into(), Array::Int(IntArray::dense(vec![3, 1, 2]))).unwrap();
        frame.add_column("b".into(), Array::Double(DoubleArray::dense(vec![30.0, 10.0, 20.0]))).unwrap();
        frame
    }

    #[test]
    fn sort_by_columns_reorders_rows() {
        let frame = demo_frame();
        let sorted = frame.sort_by_columns(&["a".to_string()], &[Direction::Ascending], false).unwrap();
        assert_eq!(sorted.rows().keys_in_order(), vec!["r1", "r2", "r0"]);
    }

    #[test]
    fn head_and_tail_share_backing_storage() {
        let frame = demo_frame();
        let head = frame.head(2);
        assert_eq!(head.rows().keys_in_order(), vec!["r0", "r1"]);
        let tail = frame.tail(2);
        assert_eq!(tail.rows().keys_in_order(), vec!["r1", "r2"]);
    }

    #[test]
    fn bounds_reports_min_and_max_with_positions() {
        let frame = demo_frame();
        let (min, max) = frame.bounds(&"a".to_string(), false).unwrap().unwrap();
        assert_eq!(min.value, Value::Int(1));
        assert_eq!(max.value, Value::Int(3));
    }

    #[test]
    fn frame_equality_compares_keys_and_values() {
        let a = demo_frame();
        let b = demo_frame();
        assert!(a == b);
        b.set(0, 0, Value::Int(999)).unwrap();
        assert!(a != b);
    }

    #[test]
    fn sign_maps_numeric_columns_only() {
        let frame = demo_frame();
        let signed = frame.sign().unwrap();
        assert_eq!(signed.get(0, 0).unwrap(), Value::Int(1));
    }

    #[test]
    fn transpose_twice_equals_the_original() {
        let frame = demo_frame();
        let back = frame.transpose().unwrap().transpose().unwrap();
        assert!(frame == back);
    }

    #[test]
    fn row_and_column_cursors_read_the_same_cells_as_get() {
        let frame = demo_frame();
        assert_eq!(frame.row(1).get(0).unwrap(), frame.get(1, 0).unwrap());
        assert_eq!(frame.column(1).get(2).unwrap(), frame.get(2, 1).unwrap());
    }
}
