//! # Frame Module — *Keyed Tabular Data*
//!
//! Wires together the frame's storage layer ([`content`]), its movable
//! read/write pointer ([`cursor`]), its row-reordering machinery
//! ([`sort`]), and the public façade ([`frame`]).

pub mod content;
pub mod cursor;
#[allow(clippy::module_inception)]
pub mod frame;
pub mod sort;

pub use content::FrameContent;
pub use cursor::{Axis, AxisVector, Column, Cursor, Row, VectorStats};
pub use frame::Frame;
pub use sort::{sort_cols_by_rows, sort_keys, sort_rows_by_columns, sort_rows_by_custom};
