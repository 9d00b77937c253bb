//! # gridframe
//!
//! An in-memory, typed, two-dimensional tabular data engine: keyed row and
//! column axes over a [`KeyIndex`](index::KeyIndex), typed column storage
//! (dense/sparse/mapped/coded) behind one [`Array`](array::Array) enum, a
//! [`Frame`](frame::Frame) content layer with a movable
//! [`Cursor`](frame::Cursor), coordinate-permutation sorting, a fork/join
//! [`ParallelEngine`](parallel::ParallelEngine) for bulk per-cell work, and
//! factory/serialization conveniences for building and persisting frames.
//!
//! ## Feature flags
//! - `datetime` (default): adds `format()` helpers on the temporal array
//!   types, built on the `time` crate, for human-readable display.
//! - `fast_hash`: swaps the key index and sparse-storage hash maps for
//!   `ahash`'s faster (non-DoS-resistant) hasher.

pub mod aliases;
pub mod array;
pub mod config;
pub mod enums;
pub mod error;
pub mod factory;
pub mod frame;
pub mod index;
pub mod numeric;
pub mod parallel;
pub mod serialization;
pub mod storage;
pub mod traits;
pub mod value;

pub use aliases::{Coordinate, Key, Ordinal};
pub use array::{
    Array, BooleanArray, CodedArray, DoubleArray, FloatArray, IntArray, IntegerArray, LocalDateArray,
    LocalDateTimeArray, LocalTimeArray, LongArray, ObjectArray, StringArray, ZonedDateTimeArray,
};
pub use config::Config;
pub use enums::{Direction, ElementType, Style};
pub use error::{ArithmeticError, ArrayError, FrameError, GridError, IndexError, ParseError, Result};
pub use factory::RowSource;
pub use frame::{Axis, AxisVector, Column, Cursor, Frame, FrameContent, Row, VectorStats};
pub use index::KeyIndex;
pub use numeric::{Float, Integer};
pub use parallel::{AxisKeys, ParallelEngine};
pub use serialization::{KeyCodec, Serializable};
pub use value::{DataFrameValue, ObjVal, ObjectData, Value};
