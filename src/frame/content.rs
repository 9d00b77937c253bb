//! # FrameContent — *Row/Column Keyed Array Storage*
//!
//! Owns the physical data behind a [`crate::frame::Frame`]: a row
//! [`KeyIndex`] and column [`KeyIndex`], plus the `Vec<Array>` of columns
//! they coordinate-address. Filter views share the same backing `Vec<Array>`
//! (via `Arc<RwLock<_>>`, mirroring how `KeyIndex` shares its root) and
//! narrow visibility through their row/column indices rather than copying
//! data; structural growth (`add_row`, `add_column`) is only permitted on a
//! frame whose axes are both roots.

use std::sync::{Arc, RwLock};

use crate::aliases::{Coordinate, Key, Ordinal};
use crate::array::Array;
use crate::enums::ElementType;
use crate::error::{FrameError, Result};
use crate::index::KeyIndex;
use crate::value::{ObjVal, Value};

struct ContentData {
    columns: Vec<Array>,
}

/// The keyed, column-oriented data behind a frame.
pub struct FrameContent<R: Key, C: Key> {
    rows: KeyIndex<R>,
    cols: KeyIndex<C>,
    data: Arc<RwLock<ContentData>>,
}

impl<R: Key, C: Key> FrameContent<R, C> {
    pub fn empty() -> Self {
        FrameContent {
            rows: KeyIndex::empty(),
            cols: KeyIndex::empty(),
            data: Arc::new(RwLock::new(ContentData { columns: Vec::new() })),
        }
    }

    /// Builds a frame from already-assembled parts. `columns[i]` must have
    /// length `rows.size()` and correspond to `cols`'s `i`-th coordinate.
    pub fn from_parts(rows: KeyIndex<R>, cols: KeyIndex<C>, columns: Vec<Array>) -> Self {
        FrameContent { rows, cols, data: Arc::new(RwLock::new(ContentData { columns })) }
    }

    pub fn row_index(&self) -> &KeyIndex<R> {
        &self.rows
    }

    pub fn col_index(&self) -> &KeyIndex<C> {
        &self.cols
    }

    pub fn n_rows(&self) -> usize {
        self.rows.size()
    }

    pub fn n_cols(&self) -> usize {
        self.cols.size()
    }

    fn require_root(&self) -> Result<()> {
        if self.rows.is_view() || self.cols.is_view() {
            return Err(FrameError::TypeMismatch { expected: "root frame", found: "filter view" }.into());
        }
        Ok(())
    }

    /// Appends a new column keyed by `key`. `array`'s length must already
    /// equal the frame's row count.
    pub fn add_column(&self, key: C, array: Array) -> Result<Coordinate> {
        self.require_root()?;
        if array.length() != self.n_rows() {
            return Err(FrameError::TypeMismatch { expected: "column length == row count", found: "mismatched length" }.into());
        }
        let coord = self.cols.add(key)?;
        self.data.write().unwrap().columns.push(array);
        Ok(coord)
    }

    /// Appends a new, empty row keyed by `key`, expanding every column by
    /// one slot of its own default value.
    pub fn add_row(&self, key: R) -> Result<Coordinate> {
        self.require_root()?;
        let coord = self.rows.add(key)?;
        let new_len = coord + 1;
        let mut data = self.data.write().unwrap();
        for column in data.columns.iter_mut() {
            column.expand(new_len);
        }
        Ok(coord)
    }

    fn row_coordinate(&self, ordinal: Ordinal) -> Result<Coordinate> {
        self.rows.coordinate_at(ordinal).ok_or(FrameError::OrdinalOutOfBounds {
            axis: "row",
            ordinal,
            length: self.rows.size(),
        }.into())
    }

    fn col_coordinate(&self, ordinal: Ordinal) -> Result<Coordinate> {
        self.cols.coordinate_at(ordinal).ok_or(FrameError::OrdinalOutOfBounds {
            axis: "column",
            ordinal,
            length: self.cols.size(),
        }.into())
    }

    pub fn get_value(&self, row_ordinal: Ordinal, col_ordinal: Ordinal) -> Result<Value> {
        let row_coord = self.row_coordinate(row_ordinal)?;
        let col_coord = self.col_coordinate(col_ordinal)?;
        let data = self.data.read().unwrap();
        Ok(data.columns[col_coord].get_value(row_coord)?)
    }

    pub fn set_value(&self, row_ordinal: Ordinal, col_ordinal: Ordinal, value: Value) -> Result<()> {
        let row_coord = self.row_coordinate(row_ordinal)?;
        let col_coord = self.col_coordinate(col_ordinal)?;
        let mut data = self.data.write().unwrap();
        Ok(data.columns[col_coord].set_value(row_coord, value)?)
    }

    /// Clones the column at `col_ordinal` out of the frame (shared `Arc`
    /// payloads such as coded dictionaries stay shared; the `Vec`/`Storage`
    /// shell itself is duplicated).
    pub fn column_at(&self, col_ordinal: Ordinal) -> Result<Array> {
        let col_coord = self.col_coordinate(col_ordinal)?;
        Ok(self.data.read().unwrap().columns[col_coord].clone())
    }

    pub fn column(&self, key: &C) -> Result<Array> {
        let coord = self.cols.coordinate(key).ok_or_else(|| FrameError::UnknownColumnKey(format!("{key:?}")))?;
        Ok(self.data.read().unwrap().columns[coord].clone())
    }

    /// A view over the same backing columns, restricted to `row_keys` (in
    /// the order given) and this frame's full column set.
    /// A handle sharing this frame's columns and column index, but with its
    /// row index replaced outright — how a sort swaps in a freshly permuted
    /// view without touching any column storage.
    pub fn with_row_index(&self, rows: KeyIndex<R>) -> FrameContent<R, C> {
        FrameContent { rows, cols: self.cols.clone(), data: Arc::clone(&self.data) }
    }

    /// Same as [`FrameContent::with_row_index`], along the column axis: a
    /// handle sharing this frame's columns and row index, but with its
    /// column index replaced — how sorting columns by a row's values swaps
    /// in a freshly permuted column view. `data`'s own `Vec<Array>` order
    /// never changes; only which coordinate each column ordinal resolves to
    /// does.
    pub fn with_col_index(&self, cols: KeyIndex<C>) -> FrameContent<R, C> {
        FrameContent { rows: self.rows.clone(), cols, data: Arc::clone(&self.data) }
    }

    pub fn filter_rows(&self, row_keys: &[R]) -> Result<FrameContent<R, C>> {
        Ok(FrameContent {
            rows: self.rows.filter_keys(row_keys)?,
            cols: self.cols.clone(),
            data: Arc::clone(&self.data),
        })
    }

    pub fn filter_rows_predicate<F: Fn(&R) -> bool>(&self, predicate: F) -> FrameContent<R, C> {
        FrameContent { rows: self.rows.filter_predicate(predicate), cols: self.cols.clone(), data: Arc::clone(&self.data) }
    }

    pub fn filter_cols(&self, col_keys: &[C]) -> Result<FrameContent<R, C>> {
        Ok(FrameContent {
            rows: self.rows.clone(),
            cols: self.cols.filter_keys(col_keys)?,
            data: Arc::clone(&self.data),
        })
    }

    pub fn filter_cols_predicate<F: Fn(&C) -> bool>(&self, predicate: F) -> FrameContent<R, C> {
        FrameContent { rows: self.rows.clone(), cols: self.cols.filter_predicate(predicate), data: Arc::clone(&self.data) }
    }

    /// A deep copy: flattens both axes to fresh roots and clones every
    /// visible column into a brand-new backing store.
    pub fn copy(&self) -> FrameContent<R, C> {
        let rows = self.rows.copy(true);
        let cols = self.cols.copy(true);
        let n_rows = self.n_rows();
        let mut columns = Vec::with_capacity(self.n_cols());
        let data = self.data.read().unwrap();
        for col_ordinal in 0..self.n_cols() {
            let col_coord = self.cols.coordinate_at(col_ordinal).unwrap();
            let row_coords: Vec<Coordinate> =
                (0..n_rows).map(|o| self.rows.coordinate_at(o).unwrap()).collect();
            columns.push(data.columns[col_coord].gather(&row_coords));
        }
        FrameContent { rows, cols, data: Arc::new(RwLock::new(ContentData { columns })) }
    }

    /// Swaps rows and columns. When every column shares one element type the
    /// result's columns hold that same type; otherwise each output cell is
    /// boxed into a fresh Object column.
    pub fn transpose(&self) -> Result<FrameContent<C, R>> {
        let n_rows = self.n_rows();
        let n_cols = self.n_cols();
        let uniform_type = {
            let data = self.data.read().unwrap();
            let mut types = data.columns.iter().map(|a| a.element_type());
            match types.next() {
                Some(first) if types.all(|t| t == first) => Some(first),
                _ => None,
            }
        };
        let new_rows = self.cols.copy(true);
        let new_cols = self.rows.copy(true);
        let mut columns = Vec::with_capacity(n_rows);
        for row_ordinal in 0..n_rows {
            let element_type = uniform_type.unwrap_or(ElementType::Object);
            let mut column = Array::create(element_type, n_cols, None, None);
            for col_ordinal in 0..n_cols {
                let value = self.get_value(row_ordinal, col_ordinal)?;
                let value = if uniform_type.is_none() {
                    match value {
                        Value::Object(_) | Value::Null => value,
                        other => Value::Object(ObjVal::new(other)),
                    }
                } else {
                    value
                };
                column.set_value(col_ordinal, value)?;
            }
            columns.push(column);
        }
        Ok(FrameContent { rows: new_rows, cols: new_cols, data: Arc::new(RwLock::new(ContentData { columns })) })
    }
}

impl<R: Key, C: Key> Clone for FrameContent<R, C> {
    fn clone(&self) -> Self {
        FrameContent { rows: self.rows.clone(), cols: self.cols.clone(), data: Arc::clone(&self.data) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::IntArray;

    #[test]
    fn add_column_then_read_back() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add_all(vec!["r0".into(), "r1".into()], false).unwrap();
        content.add_column("c0".into(), Array::Int(IntArray::dense(vec![1, 2]))).unwrap();
        assert_eq!(content.get_value(1, 0).unwrap(), Value::Int(2));
    }

    #[test]
    fn add_row_expands_every_column() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add("r0".into()).unwrap();
        content.add_column("c0".into(), Array::Int(IntArray::dense(vec![5]))).unwrap();
        content.add_row("r1".into()).unwrap();
        assert_eq!(content.n_rows(), 2);
        assert_eq!(content.get_value(1, 0).unwrap(), Value::Int(0));
    }

    #[test]
    fn filter_rows_view_shares_backing_storage() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add_all(vec!["a".into(), "b".into(), "c".into()], false).unwrap();
        content.add_column("x".into(), Array::Int(IntArray::dense(vec![1, 2, 3]))).unwrap();
        let view = content.filter_rows(&["c".to_string(), "a".to_string()]).unwrap();
        assert_eq!(view.get_value(0, 0).unwrap(), Value::Int(3));
        assert_eq!(view.get_value(1, 0).unwrap(), Value::Int(1));
    }

    #[test]
    fn column_add_on_a_view_is_rejected() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add("a".into()).unwrap();
        content.add_column("x".into(), Array::Int(IntArray::dense(vec![1]))).unwrap();
        let view = content.filter_rows(&["a".to_string()]).unwrap();
        assert!(view.add_column("y".into(), Array::Int(IntArray::dense(vec![1]))).is_err());
    }

    #[test]
    fn transpose_of_uniform_columns_swaps_axes_and_keeps_element_type() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add_all(vec!["r0".into(), "r1".into()], false).unwrap();
        content.add_column("a".into(), Array::Int(IntArray::dense(vec![1, 2]))).unwrap();
        content.add_column("b".into(), Array::Int(IntArray::dense(vec![3, 4]))).unwrap();

        let t = content.transpose().unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.row_index().keys_in_order(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(t.col_index().keys_in_order(), vec!["r0".to_string(), "r1".to_string()]);
        assert_eq!(t.get_value(0, 0).unwrap(), Value::Int(1));
        assert_eq!(t.get_value(0, 1).unwrap(), Value::Int(2));
        assert_eq!(t.get_value(1, 0).unwrap(), Value::Int(3));
        assert_eq!(t.get_value(1, 1).unwrap(), Value::Int(4));
        assert_eq!(t.column_at(0).unwrap().element_type(), ElementType::Int);
    }

    #[test]
    fn transpose_twice_restores_the_original() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add_all(vec!["r0".into(), "r1".into()], false).unwrap();
        content.add_column("a".into(), Array::Int(IntArray::dense(vec![1, 2]))).unwrap();
        content.add_column("b".into(), Array::Int(IntArray::dense(vec![3, 4]))).unwrap();

        let back = content.transpose().unwrap().transpose().unwrap();
        assert_eq!(back.row_index().keys_in_order(), content.row_index().keys_in_order());
        assert_eq!(back.col_index().keys_in_order(), content.col_index().keys_in_order());
        for row in 0..content.n_rows() {
            for col in 0..content.n_cols() {
                assert_eq!(back.get_value(row, col).unwrap(), content.get_value(row, col).unwrap());
            }
        }
    }

    #[test]
    fn transpose_of_mixed_type_columns_boxes_each_cell_as_object() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.rows.add_all(vec!["r0".into()], false).unwrap();
        content.add_column("a".into(), Array::Int(IntArray::dense(vec![1]))).unwrap();
        content
            .add_column("b".into(), Array::String(crate::array::StringArray::dense(vec!["x".to_string()])))
            .unwrap();

        let t = content.transpose().unwrap();
        assert_eq!(t.column_at(0).unwrap().element_type(), ElementType::Object);
        assert_eq!(t.get_value(0, 0).unwrap(), Value::Object(ObjVal::new(Value::Int(1))));
        assert_eq!(t.get_value(1, 0).unwrap(), Value::Object(ObjVal::new(Value::String("x".to_string()))));
    }
}
