//! # Sort Module — *Row-Axis Reordering by Index Permutation*
//!
//! Every sort in this crate produces a new row [`KeyIndex`] view rather than
//! moving any [`Array`] storage: `Frame::sort` reorders what a cursor or the
//! parallel engine *sees*, not the physical slots underneath. That makes a
//! sort cheap to discard (`Direction::Restore` just rebuilds the identity
//! permutation) and safe to compute on a background thread pool, since the
//! columns themselves are never touched.

use std::cmp::Ordering;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::slice::ParallelSliceMut;

use crate::aliases::{Coordinate, Key};
use crate::enums::Direction;
use crate::error::{panic_message, GridError, Result};
use crate::frame::content::FrameContent;
use crate::index::KeyIndex;
use crate::value::Value;

/// Sorts `index`'s visible keys by natural key order. `Direction::Restore`
/// rebuilds root insertion order regardless of the index's current order.
pub fn sort_keys<K: Key>(index: &KeyIndex<K>, direction: Direction) -> KeyIndex<K> {
    match direction {
        Direction::Restore => index.restored(),
        Direction::Ascending => index.sorted_by(|a, b| a.cmp(b)),
        Direction::Descending => index.sorted_by(|a, b| b.cmp(a)),
    }
}

/// Sorts `content`'s rows by the values in `col_keys`, in priority order,
/// each with its own [`Direction`]. Ties on earlier columns fall through to
/// later ones; the final tie-break is each row's current ordinal (a stable
/// sort). Reads every comparison through the column's own
/// [`crate::traits::TypedArray::compare`] rather than boxing values.
pub fn sort_rows_by_columns<R: Key, C: Key>(
    content: &FrameContent<R, C>,
    col_keys: &[C],
    directions: &[Direction],
    parallel: bool,
) -> Result<KeyIndex<R>> {
    debug_assert_eq!(col_keys.len(), directions.len());
    let columns: Vec<_> = col_keys
        .iter()
        .map(|key| content.column(key))
        .collect::<Result<Vec<_>>>()?;
    let mut coords = content.row_index().coordinates();

    let compare = |a: &Coordinate, b: &Coordinate| -> Ordering {
        for (column, direction) in columns.iter().zip(directions.iter()) {
            let ord = column.compare(*a, *b).unwrap_or(Ordering::Equal);
            let ord = match direction {
                Direction::Descending => ord.reverse(),
                _ => ord,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    };

    if parallel {
        coords.par_sort_by(compare);
    } else {
        coords.sort_by(compare);
    }
    Ok(content.row_index().from_coordinates(coords))
}

/// Sorts `content`'s columns by the values held at `row_keys`, in priority
/// order, each with its own [`Direction`] — the column-axis mirror of
/// [`sort_rows_by_columns`]. Since columns may hold different element
/// types, comparisons go through the erased [`Value::compare`] rather than
/// a single column's own `TypedArray::compare`.
pub fn sort_cols_by_rows<R: Key, C: Key>(
    content: &FrameContent<R, C>,
    row_keys: &[R],
    directions: &[Direction],
    parallel: bool,
) -> Result<KeyIndex<C>> {
    debug_assert_eq!(row_keys.len(), directions.len());
    let row_ordinals: Vec<usize> = row_keys
        .iter()
        .map(|key| {
            content
                .row_index()
                .ordinal_of_key(key)
                .ok_or_else(|| crate::error::FrameError::UnknownRowKey(format!("{key:?}")).into())
        })
        .collect::<Result<Vec<_>>>()?;
    let mut coords = content.col_index().coordinates();

    let compare = |a: &Coordinate, b: &Coordinate| -> Ordering {
        let col_a = content.col_index().ordinal_of(*a).expect("own coordinate");
        let col_b = content.col_index().ordinal_of(*b).expect("own coordinate");
        for (&row_ordinal, direction) in row_ordinals.iter().zip(directions.iter()) {
            let va = content.get_value(row_ordinal, col_a).unwrap_or(Value::Null);
            let vb = content.get_value(row_ordinal, col_b).unwrap_or(Value::Null);
            let ord = va.compare(&vb).unwrap_or(Ordering::Equal);
            let ord = match direction {
                Direction::Descending => ord.reverse(),
                _ => ord,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    };

    if parallel {
        coords.par_sort_by(compare);
    } else {
        coords.sort_by(compare);
    }
    Ok(content.col_index().from_coordinates(coords))
}

/// Sorts `content`'s rows with a caller-supplied comparator over row keys. A
/// panicking comparator aborts the sort and returns
/// [`GridError::CallbackPanic`] — since this function never mutates
/// `content`'s existing row index, the frame is left exactly as it was
/// before the call (the "pre-sort permutation").
pub fn sort_rows_by_custom<R: Key, C: Key, F>(
    content: &FrameContent<R, C>,
    cmp: F,
    parallel: bool,
) -> Result<KeyIndex<R>>
where
    F: Fn(&R, &R) -> Ordering + Sync,
{
    let rows = content.row_index();
    let coords = rows.coordinates();
    // Snapshot (coordinate, key) pairs up front so the comparator sorts
    // against a fixed view even if `content` is mutated concurrently.
    let mut pairs: Vec<(Coordinate, R)> = coords
        .into_iter()
        .map(|coord| {
            let ordinal = rows.ordinal_of(coord).expect("coordinate visible in its own index");
            (coord, rows.key_at(ordinal).expect("ordinal within current bounds"))
        })
        .collect();

    let sort_result = catch_unwind(AssertUnwindSafe(move || {
        if parallel {
            pairs.par_sort_by(|a, b| cmp(&a.1, &b.1));
        } else {
            pairs.sort_by(|a, b| cmp(&a.1, &b.1));
        }
        pairs
    }));

    match sort_result {
        Ok(sorted) => Ok(rows.from_coordinates(sorted.into_iter().map(|(c, _)| c).collect())),
        Err(payload) => Err(GridError::CallbackPanic(panic_message(payload))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Array, DoubleArray, IntArray};

    #[test]
    fn sort_keys_ascending_then_restore() {
        let idx: KeyIndex<i32> = KeyIndex::of(vec![3, 1, 2]).unwrap();
        let asc = sort_keys(&idx, Direction::Ascending);
        assert_eq!(asc.keys_in_order(), vec![1, 2, 3]);
        let restored = sort_keys(&asc, Direction::Restore);
        assert_eq!(restored.keys_in_order(), vec![3, 1, 2]);
    }

    #[test]
    fn sort_rows_by_single_column() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add_all(vec!["a".into(), "b".into(), "c".into()], false).unwrap();
        content.add_column("v".into(), Array::Int(IntArray::dense(vec![3, 1, 2]))).unwrap();
        let sorted = sort_rows_by_columns(&content, &["v".to_string()], &[Direction::Ascending], false).unwrap();
        assert_eq!(sorted.keys_in_order(), vec!["b", "a", "c"]);
    }

    #[test]
    fn sort_rows_parallel_matches_sequential() {
        let content: FrameContent<i32, String> = FrameContent::empty();
        content.row_index().add_all((0..200).rev().collect(), false).unwrap();
        content
            .add_column("v".into(), Array::Double(DoubleArray::dense((0..200).rev().map(|x| x as f64).collect())))
            .unwrap();
        let seq = sort_rows_by_columns(&content, &["v".to_string()], &[Direction::Ascending], false).unwrap();
        let par = sort_rows_by_columns(&content, &["v".to_string()], &[Direction::Ascending], true).unwrap();
        assert_eq!(seq.keys_in_order(), par.keys_in_order());
    }

    #[test]
    fn sort_rows_by_multiple_columns_breaks_ties() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add_all(vec!["a".into(), "b".into(), "c".into()], false).unwrap();
        content.add_column("g".into(), Array::Int(IntArray::dense(vec![1, 1, 0]))).unwrap();
        content.add_column("v".into(), Array::Int(IntArray::dense(vec![9, 1, 5]))).unwrap();
        let sorted = sort_rows_by_columns(
            &content,
            &["g".to_string(), "v".to_string()],
            &[Direction::Ascending, Direction::Ascending],
            false,
        )
        .unwrap();
        assert_eq!(sorted.keys_in_order(), vec!["c", "b", "a"]);
    }

    #[test]
    fn sort_cols_by_a_single_row_reorders_columns() {
        let content: FrameContent<String, String> = FrameContent::empty();
        content.row_index().add_all(vec!["r0".into(), "r1".into()], false).unwrap();
        content.add_column("AAPL".into(), Array::Double(DoubleArray::dense(vec![30.0, 1.0]))).unwrap();
        content.add_column("ORCL".into(), Array::Double(DoubleArray::dense(vec![10.0, 2.0]))).unwrap();
        content.add_column("GOOGL".into(), Array::Double(DoubleArray::dense(vec![20.0, 3.0]))).unwrap();
        let sorted = sort_cols_by_rows(&content, &["r0".to_string()], &[Direction::Ascending], false).unwrap();
        assert_eq!(sorted.keys_in_order(), vec!["ORCL", "GOOGL", "AAPL"]);
    }

    #[test]
    fn panicking_custom_comparator_aborts_cleanly() {
        let content: FrameContent<i32, String> = FrameContent::empty();
        content.row_index().add_all(vec![1, 2, 3], false).unwrap();
        let result = sort_rows_by_custom(&content, |_a, _b| panic!("boom"), false);
        assert!(matches!(result, Err(GridError::CallbackPanic(_))));
        assert_eq!(content.row_index().keys_in_order(), vec![1, 2, 3]);
    }
}
