//! # Array Module — *Type-Erased Column Dispatch*
//!
//! [`Array`] wraps every concrete element-type struct behind one
//! non-generic enum so a [`crate::frame::FrameContent`] can hold a
//! `Vec<Array>` of mixed-type columns. Callers needing the typed surface
//! reach for [`crate::traits::TypedArray`] on the concrete struct directly;
//! `Array` itself exposes only the operations that make sense without
//! knowing the element type (length, style, swap, sort, erased get/set via
//! [`Value`]).

pub mod boolean;
pub mod coded;
pub mod float;
pub mod integer;
pub mod object;
pub mod string;
pub mod temporal;

pub use boolean::BooleanArray;
pub use coded::CodedArray;
pub use float::{DoubleArray, FloatArray};
pub use integer::{IntArray, IntegerArray, LongArray};
pub use object::ObjectArray;
pub use string::StringArray;
pub use temporal::{LocalDateArray, LocalDateTimeArray, LocalTimeArray, ZonedDateTimeArray};

use std::cmp::Ordering;

use crate::enums::{ElementType, Style};
use crate::error::ArrayError;
use crate::traits::TypedArray;
use crate::value::Value;

/// A column's data, typed at the element level and erased at the crate level.
#[derive(Debug, Clone)]
pub enum Array {
    Boolean(BooleanArray),
    Int(IntArray),
    Long(LongArray),
    Double(DoubleArray),
    LocalDate(LocalDateArray),
    LocalTime(LocalTimeArray),
    LocalDateTime(LocalDateTimeArray),
    ZonedDateTime(ZonedDateTimeArray),
    String(StringArray),
    Enum(CodedArray<String>),
    Object(ObjectArray),
}

/// Dispatches a unary `TypedArray` method identically-named across every
/// variant. Keeps the ~11-way match arms from being hand-copied per method.
macro_rules! dispatch {
    ($self:expr, $arr:ident => $body:expr) => {
        match $self {
            Array::Boolean($arr) => $body,
            Array::Int($arr) => $body,
            Array::Long($arr) => $body,
            Array::Double($arr) => $body,
            Array::LocalDate($arr) => $body,
            Array::LocalTime($arr) => $body,
            Array::LocalDateTime($arr) => $body,
            Array::ZonedDateTime($arr) => $body,
            Array::String($arr) => $body,
            Array::Enum($arr) => $body,
            Array::Object($arr) => $body,
        }
    };
}

impl Array {
    pub fn length(&self) -> usize {
        dispatch!(self, a => a.length())
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn style(&self) -> Style {
        dispatch!(self, a => a.style())
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Array::Boolean(_) => ElementType::Boolean,
            Array::Int(_) => ElementType::Int,
            Array::Long(_) => ElementType::Long,
            Array::Double(_) => ElementType::Double,
            Array::LocalDate(_) => ElementType::LocalDate,
            Array::LocalTime(_) => ElementType::LocalTime,
            Array::LocalDateTime(_) => ElementType::LocalDateTime,
            Array::ZonedDateTime(_) => ElementType::ZonedDateTime,
            Array::String(_) => ElementType::String,
            Array::Enum(_) => ElementType::Enum,
            Array::Object(_) => ElementType::Object,
        }
    }

    pub fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError> {
        dispatch!(self, a => a.is_null(ordinal))
    }

    pub fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        dispatch!(self, a => a.get_value(ordinal))
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        dispatch!(self, a => a.swap(i, j))
    }

    pub fn compare(&self, i: usize, j: usize) -> Result<Ordering, ArrayError> {
        dispatch!(self, a => a.compare(i, j))
    }

    /// Sorts `[start, end)` by this column's own values, returning the
    /// permutation (original ordinals, new order) for replay on siblings.
    pub fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError> {
        dispatch!(self, a => a.sort(start, end, descending))
    }

    pub fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        dispatch!(self, a => a.apply_permutation(start, permutation))
    }

    pub fn gather(&self, ordinals: &[usize]) -> Array {
        match self {
            Array::Boolean(a) => Array::Boolean(a.gather(ordinals)),
            Array::Int(a) => Array::Int(a.gather(ordinals)),
            Array::Long(a) => Array::Long(a.gather(ordinals)),
            Array::Double(a) => Array::Double(a.gather(ordinals)),
            Array::LocalDate(a) => Array::LocalDate(a.gather(ordinals)),
            Array::LocalTime(a) => Array::LocalTime(a.gather(ordinals)),
            Array::LocalDateTime(a) => Array::LocalDateTime(a.gather(ordinals)),
            Array::ZonedDateTime(a) => Array::ZonedDateTime(a.gather(ordinals)),
            Array::String(a) => Array::String(a.gather(ordinals)),
            Array::Enum(a) => Array::Enum(a.gather(ordinals)),
            Array::Object(a) => Array::Object(a.gather(ordinals)),
        }
    }

    pub fn copy_range(&self, start: usize, len: usize) -> Array {
        match self {
            Array::Boolean(a) => Array::Boolean(a.copy_range(start, len)),
            Array::Int(a) => Array::Int(a.copy_range(start, len)),
            Array::Long(a) => Array::Long(a.copy_range(start, len)),
            Array::Double(a) => Array::Double(a.copy_range(start, len)),
            Array::LocalDate(a) => Array::LocalDate(a.copy_range(start, len)),
            Array::LocalTime(a) => Array::LocalTime(a.copy_range(start, len)),
            Array::LocalDateTime(a) => Array::LocalDateTime(a.copy_range(start, len)),
            Array::ZonedDateTime(a) => Array::ZonedDateTime(a.copy_range(start, len)),
            Array::String(a) => Array::String(a.copy_range(start, len)),
            Array::Enum(a) => Array::Enum(a.copy_range(start, len)),
            Array::Object(a) => Array::Object(a.copy_range(start, len)),
        }
    }

    pub fn expand(&mut self, new_len: usize) {
        dispatch!(self, a => a.expand(new_len))
    }

    /// Writes an erased [`Value`] into `ordinal`, coercing `Int -> Long ->
    /// Double` on narrow-to-wide writes and failing with
    /// [`ArrayError::UnsupportedForStyle`] on any other element-type
    /// mismatch.
    pub fn set_value(&mut self, ordinal: usize, value: Value) -> Result<(), ArrayError> {
        match (self, value) {
            (Array::Boolean(a), Value::Boolean(v)) => a.set(ordinal, v),
            (Array::Int(a), Value::Int(v)) => a.set(ordinal, v),
            (Array::Long(a), Value::Long(v)) => a.set(ordinal, v),
            (Array::Long(a), Value::Int(v)) => a.set(ordinal, v as i64),
            (Array::Double(a), Value::Double(v)) => a.set(ordinal, v),
            (Array::Double(a), Value::Int(v)) => a.set(ordinal, v as f64),
            (Array::Double(a), Value::Long(v)) => a.set(ordinal, v as f64),
            (Array::LocalDate(a), Value::LocalDate(v)) => a.set(ordinal, v),
            (Array::LocalTime(a), Value::LocalTime(v)) => a.set(ordinal, v),
            (Array::LocalDateTime(a), Value::LocalDateTime(v)) => a.set(ordinal, v),
            (Array::ZonedDateTime(a), Value::ZonedDateTime(ms, zone)) => {
                a.set(ordinal, temporal::ZonedInstant { epoch_ms: ms, zone_code: zone })
            }
            (Array::String(a), Value::String(v)) => a.set(ordinal, v),
            (Array::Enum(a), Value::String(v)) => a.set(ordinal, v),
            (Array::Enum(a), Value::Enum(_, label)) => a.set(ordinal, label),
            (Array::Object(a), Value::Object(v)) => a.set(ordinal, Some(v)),
            (Array::Object(a), Value::Null) => a.set(ordinal, None),
            (this, _) => Err(ArrayError::UnsupportedForStyle {
                op: "set_value",
                style: this.element_type_name(),
            }),
        }
    }

    fn element_type_name(&self) -> &'static str {
        match self.element_type() {
            ElementType::Boolean => "Boolean",
            ElementType::Int => "Int",
            ElementType::Long => "Long",
            ElementType::Double => "Double",
            ElementType::LocalDate => "LocalDate",
            ElementType::LocalTime => "LocalTime",
            ElementType::LocalDateTime => "LocalDateTime",
            ElementType::ZonedDateTime => "ZonedDateTime",
            ElementType::String => "String",
            ElementType::Enum => "Enum",
            ElementType::Object => "Object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erased_dispatch_reaches_the_right_variant() {
        let a = Array::Int(IntArray::dense(vec![1, 2, 3]));
        assert_eq!(a.length(), 3);
        assert_eq!(a.element_type(), ElementType::Int);
        assert_eq!(a.get_value(1).unwrap(), Value::Int(2));
    }

    #[test]
    fn set_value_widens_int_into_long_column() {
        let mut a = Array::Long(LongArray::dense(vec![0, 0]));
        a.set_value(0, Value::Int(7)).unwrap();
        assert_eq!(a.get_value(0).unwrap(), Value::Long(7));
    }

    #[test]
    fn set_value_rejects_incompatible_types() {
        let mut a = Array::Boolean(BooleanArray::dense(vec![true]));
        assert!(matches!(
            a.set_value(0, Value::Int(1)),
            Err(ArrayError::UnsupportedForStyle { .. })
        ));
    }

    #[test]
    fn gather_preserves_element_type() {
        let a = Array::String(StringArray::dense(vec!["a".into(), "b".into(), "c".into()]));
        let g = a.gather(&[2, 0]);
        assert_eq!(g.get_value(0).unwrap(), Value::String("c".into()));
        assert_eq!(g.get_value(1).unwrap(), Value::String("a".into()));
    }
}
