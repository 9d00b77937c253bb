//! # Numeric Module — *Element-Type Bounds for Generic Arrays*
//!
//! Thin re-bounds over `num_traits` so [`crate::array::integer::IntegerArray`]
//! and [`crate::array::float::FloatArray`] can be written once and
//! monomorphized over `i32`/`i64` and `f64` respectively, matching the
//! `Integer`/`Float`/`Numeric` trait-union idiom this crate's numeric
//! columns are built on.

use num_traits::{PrimInt, Float as NumFloat};
use std::fmt::Debug;

/// Bound satisfied by every fixed-width signed integer this crate stores.
pub trait Integer: PrimInt + Debug + Send + Sync + 'static {}
impl<T: PrimInt + Debug + Send + Sync + 'static> Integer for T {}

/// Bound satisfied by every floating-point type this crate stores.
pub trait Float: NumFloat + Debug + Send + Sync + 'static {}
impl<T: NumFloat + Debug + Send + Sync + 'static> Float for T {}
