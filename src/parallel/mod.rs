//! # Parallel Module — *Fork/Join Bulk-Operation Engine*
//!
//! [`ParallelEngine`] runs a closure over every cell of a column range (or
//! a whole frame), forking with `rayon::join` once a task is larger than
//! [`crate::config::Config`]'s split thresholds and falling back to a plain
//! sequential loop below them. Every entry point has a `parallel: bool`
//! escape hatch specifically so callers (and this crate's own tests) can
//! assert the parallel and sequential paths produce bit-identical output.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::aliases::Key;
use crate::config::Config;
use crate::error::{panic_message, GridError, Result};
use crate::frame::content::FrameContent;
use crate::frame::cursor::{Axis, AxisVector, Column, Row};
use crate::value::{DataFrameValue, Value};

/// The keys matching a [`ParallelEngine::select_keys`] search: row keys when
/// searched along [`Axis::Row`], column keys along [`Axis::Column`].
#[derive(Debug, Clone, PartialEq)]
pub enum AxisKeys<R, C> {
    Row(Vec<R>),
    Column(Vec<C>),
}

/// Fork/join driver over a frame's row and column axes.
pub struct ParallelEngine {
    row_split_threshold: usize,
    col_split_threshold: usize,
}

impl ParallelEngine {
    pub fn new() -> Self {
        let cfg = Config::get();
        ParallelEngine { row_split_threshold: cfg.row_split_threshold, col_split_threshold: cfg.col_split_threshold }
    }

    /// Applies `f(row_ordinal, col_ordinal)` to every cell in
    /// `[0, n_rows) x [0, n_cols)`. Column ranges above the configured
    /// split threshold fork via `rayon::join`; row ranges within a column
    /// task fork the same way. A panic inside `f` aborts the whole
    /// traversal and surfaces as [`GridError::CallbackPanic`].
    pub fn for_each_cell<F>(&self, n_rows: usize, n_cols: usize, f: &F, parallel: bool) -> Result<()>
    where
        F: Fn(usize, usize) -> Result<()> + Sync,
    {
        let run = || self.for_each_cols(0, n_cols, n_rows, f, parallel);
        match catch_unwind(AssertUnwindSafe(run)) {
            Ok(result) => result,
            Err(payload) => Err(GridError::CallbackPanic(panic_message(payload))),
        }
    }

    fn for_each_cols<F>(&self, col_start: usize, col_end: usize, n_rows: usize, f: &F, parallel: bool) -> Result<()>
    where
        F: Fn(usize, usize) -> Result<()> + Sync,
    {
        let width = col_end - col_start;
        if parallel && width > self.col_split_threshold && width > 1 {
            let mid = col_start + width / 2;
            let (left, right) = rayon::join(
                || self.for_each_cols(col_start, mid, n_rows, f, parallel),
                || self.for_each_cols(mid, col_end, n_rows, f, parallel),
            );
            left.and(right)
        } else {
            for col in col_start..col_end {
                self.for_each_rows(col, 0, n_rows, f, parallel)?;
            }
            Ok(())
        }
    }

    fn for_each_rows<F>(&self, col: usize, row_start: usize, row_end: usize, f: &F, parallel: bool) -> Result<()>
    where
        F: Fn(usize, usize) -> Result<()> + Sync,
    {
        let height = row_end - row_start;
        if parallel && height > self.row_split_threshold && height > 1 {
            let mid = row_start + height / 2;
            let (left, right) = rayon::join(
                || self.for_each_rows(col, row_start, mid, f, parallel),
                || self.for_each_rows(col, mid, row_end, f, parallel),
            );
            left.and(right)
        } else {
            for row in row_start..row_end {
                f(row, col)?;
            }
            Ok(())
        }
    }

    /// Returns the `(min, max)` value pair in a single column, comparing via
    /// [`Value::compare`] and skipping nulls. `None` if every cell is null.
    pub fn bounds<R: Key, C: Key>(
        &self,
        content: &FrameContent<R, C>,
        col_ordinal: usize,
        parallel: bool,
    ) -> Result<Option<(DataFrameValue, DataFrameValue)>> {
        let n_rows = content.n_rows();
        let values: Vec<Option<Value>> = if parallel && n_rows > self.row_split_threshold {
            use rayon::prelude::*;
            (0..n_rows)
                .into_par_iter()
                .map(|row| content.get_value(row, col_ordinal).ok().filter(|v| !v.is_null()))
                .collect()
        } else {
            (0..n_rows).map(|row| content.get_value(row, col_ordinal).ok().filter(|v| !v.is_null())).collect()
        };

        let mut min: Option<(usize, Value)> = None;
        let mut max: Option<(usize, Value)> = None;
        for (row, value) in values.into_iter().enumerate() {
            let Some(value) = value else { continue };
            if min.as_ref().map(|(_, m)| value.compare(m) == Some(std::cmp::Ordering::Less)).unwrap_or(true) {
                min = Some((row, value.clone()));
            }
            if max.as_ref().map(|(_, m)| value.compare(m) == Some(std::cmp::Ordering::Greater)).unwrap_or(true) {
                max = Some((row, value.clone()));
            }
        }

        Ok(match (min, max) {
            (Some((min_row, min_val)), Some((max_row, max_val))) => Some((
                DataFrameValue { row_ordinal: min_row, col_ordinal, value: min_val },
                DataFrameValue { row_ordinal: max_row, col_ordinal, value: max_val },
            )),
            _ => None,
        })
    }

    pub fn min<R: Key, C: Key>(
        &self,
        content: &FrameContent<R, C>,
        col_ordinal: usize,
        parallel: bool,
    ) -> Result<Option<DataFrameValue>> {
        Ok(self.bounds(content, col_ordinal, parallel)?.map(|(min, _)| min))
    }

    pub fn max<R: Key, C: Key>(
        &self,
        content: &FrameContent<R, C>,
        col_ordinal: usize,
        parallel: bool,
    ) -> Result<Option<DataFrameValue>> {
        Ok(self.bounds(content, col_ordinal, parallel)?.map(|(_, max)| max))
    }

    /// Row ordinals in `[0, n_rows)` for which `predicate` holds against
    /// `col_ordinal`'s value, preserving ordinal order regardless of how
    /// the search was partitioned.
    pub fn select_rows<R: Key, C: Key, P>(
        &self,
        content: &FrameContent<R, C>,
        col_ordinal: usize,
        predicate: P,
        parallel: bool,
    ) -> Result<Vec<usize>>
    where
        P: Fn(&Value) -> bool + Sync,
    {
        let n_rows = content.n_rows();
        if parallel && n_rows > self.row_split_threshold {
            use rayon::prelude::*;
            let mut matches: Vec<usize> = (0..n_rows)
                .into_par_iter()
                .filter_map(|row| match content.get_value(row, col_ordinal) {
                    Ok(v) if predicate(&v) => Some(row),
                    _ => None,
                })
                .collect();
            matches.par_sort_unstable();
            Ok(matches)
        } else {
            let mut matches = Vec::new();
            for row in 0..n_rows {
                if predicate(&content.get_value(row, col_ordinal)?) {
                    matches.push(row);
                }
            }
            Ok(matches)
        }
    }

    /// Runs `consumer` once per vector ordinal along `axis` (every row when
    /// [`Axis::Row`], every column when [`Axis::Column`]), forking over
    /// ordinal sub-ranges the same way [`Self::for_each_cell`] forks over
    /// columns then rows. Within one leaf (an unforked sub-range), a single
    /// [`Row`]/[`Column`] cursor is built once and repositioned across the
    /// leaf's ordinals via `reseek`, rather than rebuilt per ordinal.
    pub fn for_each_vector<R: Key, C: Key, F>(
        &self,
        content: &FrameContent<R, C>,
        axis: Axis,
        consumer: &F,
        parallel: bool,
    ) -> Result<()>
    where
        F: Fn(&dyn AxisVector) -> Result<()> + Sync,
    {
        let n = match axis {
            Axis::Row => content.n_rows(),
            Axis::Column => content.n_cols(),
        };
        let run = || self.for_each_vector_range(content, axis, 0, n, consumer, parallel);
        match catch_unwind(AssertUnwindSafe(run)) {
            Ok(result) => result,
            Err(payload) => Err(GridError::CallbackPanic(panic_message(payload))),
        }
    }

    fn for_each_vector_range<R: Key, C: Key, F>(
        &self,
        content: &FrameContent<R, C>,
        axis: Axis,
        start: usize,
        end: usize,
        consumer: &F,
        parallel: bool,
    ) -> Result<()>
    where
        F: Fn(&dyn AxisVector) -> Result<()> + Sync,
    {
        let width = end - start;
        let threshold = match axis {
            Axis::Row => self.row_split_threshold,
            Axis::Column => self.col_split_threshold,
        };
        if parallel && width > threshold && width > 1 {
            let mid = start + width / 2;
            let (left, right) = rayon::join(
                || self.for_each_vector_range(content, axis, start, mid, consumer, parallel),
                || self.for_each_vector_range(content, axis, mid, end, consumer, parallel),
            );
            left.and(right)
        } else if start < end {
            match axis {
                Axis::Row => {
                    let mut cursor = Row::new(content, start);
                    for ordinal in start..end {
                        cursor.reseek(ordinal);
                        consumer(&cursor)?;
                    }
                }
                Axis::Column => {
                    let mut cursor = Column::new(content, start);
                    for ordinal in start..end {
                        cursor.reseek(ordinal);
                        consumer(&cursor)?;
                    }
                }
            }
            Ok(())
        } else {
            Ok(())
        }
    }

    /// Keys of whichever vectors along `axis` (rows, or columns) contain at
    /// least one cell matching `predicate`, in ordinal order. Where
    /// [`Self::select_rows`] filters one column's values and returns row
    /// ordinals, this searches every cell of every vector on `axis` and
    /// returns the vectors' own keys.
    pub fn select_keys<R: Key, C: Key, P>(
        &self,
        content: &FrameContent<R, C>,
        axis: Axis,
        predicate: P,
        parallel: bool,
    ) -> Result<AxisKeys<R, C>>
    where
        P: Fn(&Value) -> bool + Sync,
    {
        Ok(match axis {
            Axis::Row => {
                let n = content.n_rows();
                let matches: Vec<usize> = if parallel && n > self.row_split_threshold {
                    use rayon::prelude::*;
                    let mut m: Vec<usize> = (0..n)
                        .into_par_iter()
                        .filter_map(|o| match Row::new(content, o).values() {
                            Ok(values) if values.iter().any(|v| predicate(v)) => Some(o),
                            _ => None,
                        })
                        .collect();
                    m.par_sort_unstable();
                    m
                } else {
                    let mut m = Vec::new();
                    for o in 0..n {
                        if Row::new(content, o).values()?.iter().any(|v| predicate(v)) {
                            m.push(o);
                        }
                    }
                    m
                };
                AxisKeys::Row(matches.into_iter().filter_map(|o| content.row_index().key_at(o)).collect())
            }
            Axis::Column => {
                let n = content.n_cols();
                let matches: Vec<usize> = if parallel && n > self.col_split_threshold {
                    use rayon::prelude::*;
                    let mut m: Vec<usize> = (0..n)
                        .into_par_iter()
                        .filter_map(|o| match Column::new(content, o).values() {
                            Ok(values) if values.iter().any(|v| predicate(v)) => Some(o),
                            _ => None,
                        })
                        .collect();
                    m.par_sort_unstable();
                    m
                } else {
                    let mut m = Vec::new();
                    for o in 0..n {
                        if Column::new(content, o).values()?.iter().any(|v| predicate(v)) {
                            m.push(o);
                        }
                    }
                    m
                };
                AxisKeys::Column(matches.into_iter().filter_map(|o| content.col_index().key_at(o)).collect())
            }
        })
    }

    /// Every cell as a [`DataFrameValue`], in column-major linear order:
    /// `i = row_ordinal + col_ordinal * n_rows`. Unlike [`Self::for_each_cell`],
    /// which forks column ranges then row ranges within each column, this
    /// splits the single linear range directly — the shape a column-major
    /// value-stream spliterator divides itself into.
    pub fn value_stream<R: Key, C: Key>(&self, content: &FrameContent<R, C>, parallel: bool) -> Result<Vec<DataFrameValue>> {
        let n_rows = content.n_rows();
        let n_cols = content.n_cols();
        if n_rows == 0 || n_cols == 0 {
            return Ok(Vec::new());
        }
        self.value_stream_range(content, 0, n_rows * n_cols, n_rows, parallel)
    }

    fn value_stream_range<R: Key, C: Key>(
        &self,
        content: &FrameContent<R, C>,
        start: usize,
        end: usize,
        n_rows: usize,
        parallel: bool,
    ) -> Result<Vec<DataFrameValue>> {
        let width = end - start;
        if parallel && width > self.row_split_threshold && width > 1 {
            let mid = start + width / 2;
            let (left, right) = rayon::join(
                || self.value_stream_range(content, start, mid, n_rows, parallel),
                || self.value_stream_range(content, mid, end, n_rows, parallel),
            );
            let mut left = left?;
            left.extend(right?);
            Ok(left)
        } else {
            let mut out = Vec::with_capacity(width);
            for i in start..end {
                let row_ordinal = i % n_rows;
                let col_ordinal = i / n_rows;
                let value = content.get_value(row_ordinal, col_ordinal)?;
                out.push(DataFrameValue { row_ordinal, col_ordinal, value });
            }
            Ok(out)
        }
    }
}

impl Default for ParallelEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Array, DoubleArray};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn frame_of(values: Vec<f64>) -> FrameContent<usize, String> {
        let content: FrameContent<usize, String> = FrameContent::empty();
        content.row_index().add_all((0..values.len()).collect(), false).unwrap();
        content.add_column("v".into(), Array::Double(DoubleArray::dense(values))).unwrap();
        content
    }

    #[test]
    fn for_each_cell_visits_every_coordinate_once() {
        let content = frame_of(vec![1.0; 50]);
        let engine = ParallelEngine::new();
        let visits = Arc::new(AtomicUsize::new(0));
        let visits2 = Arc::clone(&visits);
        engine
            .for_each_cell(content.n_rows(), content.n_cols(), &move |_r, _c| {
                visits2.fetch_add(1, AtomicOrdering::SeqCst);
                Ok(())
            }, true)
            .unwrap();
        assert_eq!(visits.load(AtomicOrdering::SeqCst), 50);
    }

    #[test]
    fn bounds_sequential_and_parallel_agree() {
        let values: Vec<f64> = (0..5_000).map(|i| ((i * 7919) % 10_007) as f64).collect();
        let content = frame_of(values);
        let engine = ParallelEngine::new();
        let seq = engine.bounds(&content, 0, false).unwrap().unwrap();
        let par = engine.bounds(&content, 0, true).unwrap().unwrap();
        assert_eq!(seq.0.value, par.0.value);
        assert_eq!(seq.1.value, par.1.value);
    }

    #[test]
    fn select_rows_preserves_ordinal_order() {
        let content = frame_of(vec![3.0, 1.0, 4.0, 1.0, 5.0]);
        let engine = ParallelEngine::new();
        let matches = engine.select_rows(&content, 0, |v| matches!(v, Value::Double(x) if *x == 1.0), false).unwrap();
        assert_eq!(matches, vec![1, 3]);
    }

    fn grid_of(a: Vec<f64>, b: Vec<f64>) -> FrameContent<usize, String> {
        let content: FrameContent<usize, String> = FrameContent::empty();
        content.row_index().add_all((0..a.len()).collect(), false).unwrap();
        content.add_column("a".into(), Array::Double(DoubleArray::dense(a))).unwrap();
        content.add_column("b".into(), Array::Double(DoubleArray::dense(b))).unwrap();
        content
    }

    #[test]
    fn for_each_vector_visits_every_row_once() {
        let content = grid_of(vec![1.0; 30], vec![2.0; 30]);
        let engine = ParallelEngine::new();
        let visits = Arc::new(AtomicUsize::new(0));
        let visits2 = Arc::clone(&visits);
        engine
            .for_each_vector(&content, Axis::Row, &move |row| {
                assert_eq!(row.len(), 2);
                visits2.fetch_add(1, AtomicOrdering::SeqCst);
                Ok(())
            }, true)
            .unwrap();
        assert_eq!(visits.load(AtomicOrdering::SeqCst), 30);
    }

    #[test]
    fn for_each_vector_over_columns_sees_each_columns_values() {
        let content = grid_of(vec![1.0, 2.0], vec![3.0, 4.0]);
        let engine = ParallelEngine::new();
        let sums = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sums2 = Arc::clone(&sums);
        engine
            .for_each_vector(&content, Axis::Column, &move |column| {
                let total: f64 = column.values()?.iter().filter_map(|v| match v {
                    Value::Double(x) => Some(*x),
                    _ => None,
                }).sum();
                sums2.lock().unwrap().push(total);
                Ok(())
            }, false)
            .unwrap();
        let mut sums = sums.lock().unwrap().clone();
        sums.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sums, vec![3.0, 7.0]);
    }

    #[test]
    fn select_keys_finds_row_keys_with_a_matching_cell() {
        let content = grid_of(vec![1.0, 9.0, 1.0], vec![2.0, 2.0, 2.0]);
        let engine = ParallelEngine::new();
        let found = engine.select_keys(&content, Axis::Row, |v| matches!(v, Value::Double(x) if *x == 9.0), false).unwrap();
        assert_eq!(found, AxisKeys::Row(vec![1]));
    }

    #[test]
    fn select_keys_finds_column_keys_with_a_matching_cell() {
        let content = grid_of(vec![1.0, 2.0], vec![3.0, 4.0]);
        let engine = ParallelEngine::new();
        let found = engine.select_keys(&content, Axis::Column, |v| matches!(v, Value::Double(x) if *x == 4.0), false).unwrap();
        assert_eq!(found, AxisKeys::Column(vec!["b".to_string()]));
    }

    #[test]
    fn value_stream_is_column_major() {
        let content = grid_of(vec![1.0, 2.0], vec![3.0, 4.0]);
        let engine = ParallelEngine::new();
        let stream = engine.value_stream(&content, false).unwrap();
        let values: Vec<f64> = stream.iter().map(|cell| match cell.value {
            Value::Double(x) => x,
            _ => panic!("expected double"),
        }).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn value_stream_sequential_and_parallel_agree() {
        let values: Vec<f64> = (0..400).map(|i| i as f64).collect();
        let content = grid_of(values.clone(), values);
        let engine = ParallelEngine::new();
        let seq = engine.value_stream(&content, false).unwrap();
        let par = engine.value_stream(&content, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn callback_panic_surfaces_as_grid_error() {
        let content = frame_of(vec![1.0, 2.0]);
        let engine = ParallelEngine::new();
        let result = engine.for_each_cell(content.n_rows(), content.n_cols(), &|_r, _c| panic!("boom"), false);
        assert!(matches!(result, Err(GridError::CallbackPanic(_))));
    }
}
