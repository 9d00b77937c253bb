//! # **Error Module** — Unified *GridFrame* Error Type
//!
//! Defines the error taxonomy for the crate: one enum per failure domain
//! (index, array, frame, parse, arithmetic), unified under a single
//! top-level [`GridError`] so library functions can return one `Result` type.
//!
//! Hand-rolled `Display` + `std::error::Error`, matching the low-level,
//! dependency-light style of this crate's storage layer — no `thiserror`.

use std::error::Error;
use std::fmt;

/// Failures raised by [`crate::index::KeyIndex`] operations.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// `add`/`add_all` saw a key that already exists and duplicates were not allowed.
    DuplicateKey(String),
    /// A lookup or `replace` named a key the index does not contain.
    UnknownKey(String),
    /// A structural mutation (`add`, `replace`, `remove`) was attempted on a filter view.
    ViewMutation(&'static str),
    /// `replace(existing, _)` could not find `existing`.
    ReplaceUnknown(String),
    /// `replace(_, new)` found `new` already present under a different key.
    ReplaceConflict(String),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::DuplicateKey(k) => write!(f, "duplicate key: {k}"),
            IndexError::UnknownKey(k) => write!(f, "unknown key: {k}"),
            IndexError::ViewMutation(op) => {
                write!(f, "structural mutation '{op}' is not permitted on a filter view")
            }
            IndexError::ReplaceUnknown(k) => write!(f, "replace: unknown existing key {k}"),
            IndexError::ReplaceConflict(k) => write!(f, "replace: target key {k} already exists"),
        }
    }
}

impl Error for IndexError {}

/// Failures raised by [`crate::array::Array`] / [`crate::traits::TypedArray`] operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// An ordinal fell outside `[0, length)`.
    OutOfBounds { ordinal: usize, length: usize },
    /// The requested operation has no meaning for this array's style or element type.
    UnsupportedForStyle { op: &'static str, style: &'static str },
    /// Reading or writing the custom serialization format failed.
    Serialization(String),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::OutOfBounds { ordinal, length } => {
                write!(f, "ordinal {ordinal} out of bounds for length {length}")
            }
            ArrayError::UnsupportedForStyle { op, style } => {
                write!(f, "operation '{op}' is not supported for style '{style}'")
            }
            ArrayError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl Error for ArrayError {}

/// Failures raised by [`crate::frame::Frame`] / [`crate::frame::FrameContent`] operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    UnknownRowKey(String),
    UnknownColumnKey(String),
    OrdinalOutOfBounds { axis: &'static str, ordinal: usize, length: usize },
    TypeMismatch { expected: &'static str, found: &'static str },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnknownRowKey(k) => write!(f, "unknown row key: {k}"),
            FrameError::UnknownColumnKey(k) => write!(f, "unknown column key: {k}"),
            FrameError::OrdinalOutOfBounds { axis, ordinal, length } => {
                write!(f, "{axis} ordinal {ordinal} out of bounds for length {length}")
            }
            FrameError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected '{expected}', found '{found}'")
            }
        }
    }
}

impl Error for FrameError {}

/// Raised by the string-to-typed-value parser hook consumed by external
/// ingestion adapters (out of scope here beyond the error shape itself).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub input: String,
    pub target_type: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse '{}' as {}", self.input, self.target_type)
    }
}

impl Error for ParseError {}

/// Pre-condition violations for linear-algebra/statistics consumers of this
/// crate. Those algorithms are out of scope; this variant exists only so
/// downstream crates have a concrete error shape to match on.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticError {
    pub message: String,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arithmetic precondition violated: {}", self.message)
    }
}

impl Error for ArithmeticError {}

/// Top-level error type unifying every failure domain in the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    Index(IndexError),
    Array(ArrayError),
    Frame(FrameError),
    Parse(ParseError),
    Arithmetic(ArithmeticError),
    /// A user-supplied callback (comparator, predicate, mapper) panicked while
    /// running inside the parallel engine. The panic payload is preserved as
    /// a string where it was a `&str`/`String`, best-effort otherwise.
    CallbackPanic(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Index(e) => write!(f, "{e}"),
            GridError::Array(e) => write!(f, "{e}"),
            GridError::Frame(e) => write!(f, "{e}"),
            GridError::Parse(e) => write!(f, "{e}"),
            GridError::Arithmetic(e) => write!(f, "{e}"),
            GridError::CallbackPanic(msg) => write!(f, "callback panicked: {msg}"),
        }
    }
}

impl Error for GridError {}

impl From<IndexError> for GridError {
    fn from(e: IndexError) -> Self {
        GridError::Index(e)
    }
}

impl From<ArrayError> for GridError {
    fn from(e: ArrayError) -> Self {
        GridError::Array(e)
    }
}

impl From<FrameError> for GridError {
    fn from(e: FrameError) -> Self {
        GridError::Frame(e)
    }
}

impl From<ParseError> for GridError {
    fn from(e: ParseError) -> Self {
        GridError::Parse(e)
    }
}

impl From<ArithmeticError> for GridError {
    fn from(e: ArithmeticError) -> Self {
        GridError::Arithmetic(e)
    }
}

/// Recovers a best-effort message from a caught `panic::catch_unwind` payload.
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

pub type Result<T> = core::result::Result<T, GridError>;
