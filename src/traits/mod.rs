//! # Traits Module — *Per-Variant Contracts*

mod typed_array;

pub use typed_array::TypedArray;

use crate::error::ArrayError;

/// Extra contract for numeric array variants (`IntegerArray<T>`,
/// `FloatArray<T>`): an in-place running total over `[start, end)`.
pub trait NumericArray: TypedArray {
    fn cum_sum(&mut self, start: usize, end: usize) -> Result<(), ArrayError>;
}
