//! # Factory Module — *Convenience Constructors*
//!
//! Free-standing `create`/`of`/`combine` entry points layered on top of the
//! per-type constructors in [`crate::array`], [`crate::index`], and
//! [`crate::frame`]. Nothing here holds state of its own; every function is
//! a thin, opinionated wrapper that picks sensible storage defaults so
//! callers don't have to reach for the concrete array structs directly.

use crate::aliases::Key;
use crate::array::temporal::{LocalDateArray, LocalDateTimeArray, LocalTimeArray, ZonedDateTimeArray, ZoneRegistry};
use crate::array::{Array, BooleanArray, CodedArray, DoubleArray, IntArray, LongArray, ObjectArray, StringArray};
use crate::enums::ElementType;
use crate::error::{FrameError, Result};
use crate::frame::{Frame, FrameContent};
use crate::value::Value;

impl Array {
    /// Builds a column of `element_type`, `len` slots long, filled with
    /// `default` (or the type's own zero value when `None`). `fill_factor`
    /// selects sparse backing when given; dense backing otherwise.
    pub fn create(element_type: ElementType, len: usize, fill_factor: Option<f64>, default: Option<Value>) -> Array {
        match element_type {
            ElementType::Boolean => {
                let default = matches!(default, Some(Value::Boolean(true)));
                Array::Boolean(match fill_factor {
                    Some(ff) => BooleanArray::sparse_with_fill_factor(len, default, ff),
                    None => BooleanArray::dense(vec![default; len]),
                })
            }
            ElementType::Int => {
                let default = match default {
                    Some(Value::Int(v)) => v,
                    _ => 0,
                };
                Array::Int(match fill_factor {
                    Some(ff) => IntArray::sparse_with_fill_factor(len, default, ff),
                    None => IntArray::dense(vec![default; len]),
                })
            }
            ElementType::Long => {
                let default = match default {
                    Some(Value::Long(v)) => v,
                    Some(Value::Int(v)) => v as i64,
                    _ => 0,
                };
                Array::Long(match fill_factor {
                    Some(ff) => LongArray::sparse_with_fill_factor(len, default, ff),
                    None => LongArray::dense(vec![default; len]),
                })
            }
            ElementType::Double => {
                let default = match default {
                    Some(Value::Double(v)) => v,
                    Some(Value::Int(v)) => v as f64,
                    Some(Value::Long(v)) => v as f64,
                    _ => 0.0,
                };
                Array::Double(match fill_factor {
                    Some(ff) => DoubleArray::sparse_with_fill_factor(len, default, ff),
                    None => DoubleArray::dense(vec![default; len]),
                })
            }
            ElementType::LocalDate => {
                let default = match default {
                    Some(Value::LocalDate(v)) => v,
                    _ => 0,
                };
                Array::LocalDate(match fill_factor {
                    Some(_) => LocalDateArray::sparse(len, default),
                    None => LocalDateArray::dense(vec![default; len]),
                })
            }
            ElementType::LocalTime => {
                let default = match default {
                    Some(Value::LocalTime(v)) => v,
                    _ => 0,
                };
                Array::LocalTime(match fill_factor {
                    Some(_) => LocalTimeArray::sparse(len, default),
                    None => LocalTimeArray::dense(vec![default; len]),
                })
            }
            ElementType::LocalDateTime => {
                let default = match default {
                    Some(Value::LocalDateTime(v)) => v,
                    _ => 0,
                };
                Array::LocalDateTime(match fill_factor {
                    Some(_) => LocalDateTimeArray::sparse(len, default),
                    None => LocalDateTimeArray::dense(vec![default; len]),
                })
            }
            ElementType::ZonedDateTime => {
                let (epoch_ms, zone) = match default {
                    Some(Value::ZonedDateTime(ms, code)) => (ms, ZoneRegistry::name_of(code).unwrap_or_else(|| "UTC".to_string())),
                    _ => (0, "UTC".to_string()),
                };
                Array::ZonedDateTime(ZonedDateTimeArray::sparse(len, &zone).tap_fill(epoch_ms, &zone))
            }
            ElementType::String => {
                let default = match default {
                    Some(Value::String(v)) => v,
                    _ => String::new(),
                };
                Array::String(match fill_factor {
                    Some(ff) => StringArray::sparse_with_fill_factor(len, default, ff),
                    None => StringArray::dense(vec![default; len]),
                })
            }
            ElementType::Enum => {
                let coded = CodedArray::<String>::new(len);
                if let Some(Value::String(s)) | Some(Value::Enum(_, s)) = default {
                    let mut coded = coded;
                    for ordinal in 0..len {
                        let _ = coded.set(ordinal, s.clone());
                    }
                    Array::Enum(coded)
                } else {
                    Array::Enum(coded)
                }
            }
            ElementType::Object => Array::Object(ObjectArray::sparse(len)),
        }
    }
}

impl ZonedDateTimeArray {
    /// Fills every slot with `epoch_ms` under `zone` — a small helper used by
    /// [`Array::create`] so a uniform zoned default doesn't need its own
    /// public constructor variant.
    fn tap_fill(mut self, epoch_ms: i64, zone: &str) -> Self {
        if epoch_ms != 0 {
            for ordinal in 0..self.length_for_fill() {
                self.set_zoned(ordinal, epoch_ms, zone).expect("ordinal within the array's own length");
            }
        }
        self
    }

    fn length_for_fill(&self) -> usize {
        use crate::traits::TypedArray;
        self.length()
    }
}

impl<R: Key, C: Key> Frame<R, C> {
    /// An empty frame over the given row/column key types.
    pub fn of_empty() -> Frame<R, C> {
        Frame::from_content(FrameContent::empty())
    }

    /// A frame with `row_keys` and `col_keys` fully populated, every column
    /// of `element_type` filled with its type's default value.
    pub fn of(row_keys: Vec<R>, col_keys: Vec<C>, element_type: ElementType) -> Result<Frame<R, C>> {
        let frame = Frame::of_empty();
        frame.rows().add_all(row_keys, false)?;
        let n_rows = frame.n_rows();
        for key in col_keys {
            frame.add_column(key, Array::create(element_type, n_rows, None, None))?;
        }
        Ok(frame)
    }

    /// A frame with `row_keys` populated and columns built by `configure`,
    /// which receives the in-progress frame (rows already present, no
    /// columns yet) and adds whatever typed columns it needs.
    pub fn of_with<F>(row_keys: Vec<R>, configure: F) -> Result<Frame<R, C>>
    where
        F: FnOnce(&Frame<R, C>) -> Result<()>,
    {
        let frame = Frame::of_empty();
        frame.rows().add_all(row_keys, false)?;
        configure(&frame)?;
        Ok(frame)
    }

    /// Merges `frames` left-to-right: the first frame to report a non-null
    /// value at a given `(row_key, col_key)` wins. The result's row axis is
    /// the union of every input frame's rows, sorted by key — a deliberate,
    /// documented contract rather than an accident of iteration order.
    pub fn combine_first(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
        let mut row_keys: Vec<R> = Vec::new();
        let mut col_keys: Vec<C> = Vec::new();
        for frame in frames {
            for key in frame.rows().keys_in_order() {
                if !row_keys.contains(&key) {
                    row_keys.push(key);
                }
            }
            for key in frame.cols().keys_in_order() {
                if !col_keys.contains(&key) {
                    col_keys.push(key);
                }
            }
        }
        row_keys.sort();

        let out: Frame<R, C> = Frame::of_empty();
        out.rows().add_all(row_keys.clone(), false)?;
        for col_key in &col_keys {
            let element_type = frames
                .iter()
                .find_map(|f| f.cols().coordinate(col_key).map(|_| f.content().column(col_key)))
                .transpose()?
                .map(|a| a.element_type())
                .unwrap_or(ElementType::Object);
            out.add_column(col_key.clone(), Array::create(element_type, out.n_rows(), None, None))?;
        }

        for (row_ordinal, row_key) in row_keys.iter().enumerate() {
            for (col_ordinal, col_key) in col_keys.iter().enumerate() {
                for frame in frames {
                    if let (Some(r), Some(c)) = (frame.rows().ordinal_of_key(row_key), frame.cols().ordinal_of_key(col_key)) {
                        let value = frame.get(r, c)?;
                        if !value.is_null() {
                            out.set(row_ordinal, col_ordinal, value)?;
                            break;
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Appends every frame's rows to the first frame's column set. Every
    /// input frame must carry the same column keys, in any order.
    pub fn concat_rows(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
        let Some(first) = frames.first() else {
            return Ok(Frame::of_empty());
        };
        let col_keys = first.cols().keys_in_order();
        let out: Frame<R, C> = Frame::of_empty();
        for key in &col_keys {
            let element_type = first.content().column(key)?.element_type();
            out.add_column(key.clone(), Array::create(element_type, 0, None, None))?;
        }
        for frame in frames {
            if !frame.cols().contains_all(&col_keys) {
                return Err(FrameError::TypeMismatch { expected: "matching column keys", found: "divergent column set" }.into());
            }
            for row_ordinal in 0..frame.n_rows() {
                let row_key = frame.rows().key_at(row_ordinal).expect("ordinal within bounds");
                let out_row = out.add_row(row_key)?;
                for col_key in &col_keys {
                    let col_ordinal = frame.cols().ordinal_of_key(col_key).expect("checked above");
                    let out_col = out.cols().ordinal_of_key(col_key).expect("column just added");
                    out.set(out_row, out_col, frame.get(row_ordinal, col_ordinal)?)?;
                }
            }
        }
        Ok(out)
    }

    /// Appends every frame's columns onto the first frame's row set. Every
    /// input frame must carry the same row keys, in any order.
    pub fn concat_columns(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
        let Some(first) = frames.first() else {
            return Ok(Frame::of_empty());
        };
        let row_keys = first.rows().keys_in_order();
        let out: Frame<R, C> = Frame::of_empty();
        out.rows().add_all(row_keys.clone(), false)?;
        for frame in frames {
            if !frame.rows().contains_all(&row_keys) {
                return Err(FrameError::TypeMismatch { expected: "matching row keys", found: "divergent row set" }.into());
            }
            for col_ordinal in 0..frame.n_cols() {
                let col_key = frame.cols().key_at(col_ordinal).expect("ordinal within bounds");
                let array = frame.content().column_at(col_ordinal)?;
                let reordered = Array::create(array.element_type(), out.n_rows(), None, None);
                let out_col = out.add_column(col_key.clone(), reordered)?;
                for (out_row, row_key) in row_keys.iter().enumerate() {
                    let src_row = frame.rows().ordinal_of_key(row_key).expect("checked above");
                    out.set(out_row, out_col, frame.get(src_row, col_ordinal)?)?;
                }
            }
        }
        Ok(out)
    }
}

/// Adapter hook for an external row-producing collaborator (e.g. a SQL
/// `ResultSet`): maps one external row to a fixed sequence of typed values,
/// one per [`Frame::from_row_source`] column. No SQL crate lives behind this
/// trait — callers own the external connection and supply rows.
pub trait RowSource<C: Key> {
    fn column_keys(&self) -> Vec<C>;
    fn next_row(&mut self) -> Option<Vec<Value>>;
}

impl<R: Key, C: Key> Frame<R, C> {
    /// Builds a frame by draining `source` row by row, keying each row with
    /// the next element of `row_keys` (in order). Column element types are
    /// inferred from the first row's values.
    pub fn from_row_source(row_keys: Vec<R>, source: &mut dyn RowSource<C>) -> Result<Frame<R, C>> {
        let col_keys = source.column_keys();
        let frame: Frame<R, C> = Frame::of_empty();
        let mut columns_initialized = false;
        let mut row_keys = row_keys.into_iter();

        while let Some(values) = source.next_row() {
            let row_key = row_keys.next().expect("caller supplied at least one key per source row");
            let row_ordinal = frame.add_row(row_key)?;
            if !columns_initialized {
                for (col_key, value) in col_keys.iter().zip(values.iter()) {
                    let element_type = crate::value::element_type_of(value);
                    frame.add_column(col_key.clone(), Array::create(element_type, frame.n_rows(), None, None))?;
                }
                columns_initialized = true;
            }
            for (col_ordinal, value) in values.into_iter().enumerate() {
                frame.set(row_ordinal, col_ordinal, value)?;
            }
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_fills_dense_column_with_default() {
        let array = Array::create(ElementType::Int, 4, None, Some(Value::Int(7)));
        assert_eq!(array.get_value(2).unwrap(), Value::Int(7));
        assert_eq!(array.length(), 4);
    }

    #[test]
    fn frame_of_builds_typed_columns() {
        let frame: Frame<String, String> = Frame::of(vec!["r0".into(), "r1".into()], vec!["a".into()], ElementType::Double).unwrap();
        assert_eq!(frame.get(0, 0).unwrap(), Value::Double(0.0));
    }

    #[test]
    fn combine_first_prefers_earlier_frames_and_sorts_by_row_key() {
        let a: Frame<i32, String> = Frame::of(vec![2, 1], vec!["x".into()], ElementType::Int).unwrap();
        a.set(0, 0, Value::Int(20)).unwrap();
        let b: Frame<i32, String> = Frame::of(vec![3, 1], vec!["x".into()], ElementType::Int).unwrap();
        b.set(1, 0, Value::Int(111)).unwrap();

        let combined = Frame::combine_first(&[a, b]).unwrap();
        assert_eq!(combined.rows().keys_in_order(), vec![1, 2, 3]);
        let row1 = combined.rows().ordinal_of_key(&1).unwrap();
        assert_eq!(combined.get(row1, 0).unwrap(), Value::Int(0));
    }

    #[test]
    fn concat_rows_appends_matching_columns() {
        let a: Frame<String, String> = Frame::of(vec!["a".into()], vec!["x".into()], ElementType::Int).unwrap();
        a.set(0, 0, Value::Int(1)).unwrap();
        let b: Frame<String, String> = Frame::of(vec!["b".into()], vec!["x".into()], ElementType::Int).unwrap();
        b.set(0, 0, Value::Int(2)).unwrap();

        let combined = Frame::concat_rows(&[a, b]).unwrap();
        assert_eq!(combined.n_rows(), 2);
        assert_eq!(combined.get(1, 0).unwrap(), Value::Int(2));
    }

    #[test]
    fn concat_columns_appends_matching_rows() {
        let a: Frame<String, String> = Frame::of(vec!["a".into(), "b".into()], vec!["x".into()], ElementType::Int).unwrap();
        let c: Frame<String, String> = Frame::of(vec!["a".into(), "b".into()], vec!["y".into()], ElementType::Int).unwrap();
        c.set(1, 0, Value::Int(9)).unwrap();

        let combined = Frame::concat_columns(&[a, c]).unwrap();
        assert_eq!(combined.n_cols(), 2);
        assert_eq!(combined.get(1, 1).unwrap(), Value::Int(9));
    }
}
