//! # Temporal Arrays

pub(crate) mod epoch;

mod date;
mod datetime;
mod time;
mod zoned;

#[cfg(feature = "datetime")]
pub mod format;

pub use date::LocalDateArray;
pub use datetime::LocalDateTimeArray;
pub use time::LocalTimeArray;
pub use zoned::{ZoneRegistry, ZonedDateTimeArray, ZonedInstant};
