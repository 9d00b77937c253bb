//! # Human-Readable Temporal Formatting — *`datetime` Feature*
//!
//! The epoch-backed payload (`i32` days, `i64` millis) is enough for sorting
//! and arithmetic on its own; this module only exists to print it. Gated
//! behind the `datetime` feature so a caller who never needs display text
//! doesn't pull in the `time` crate.

use time::{Duration, OffsetDateTime};

use crate::error::ArrayError;

fn range_err(detail: impl std::fmt::Display) -> ArrayError {
    ArrayError::Serialization(format!("datetime formatting: {detail}"))
}

/// `days_since_epoch` as `YYYY-MM-DD`.
pub fn format_local_date(days_since_epoch: i32) -> Result<String, ArrayError> {
    let dt = OffsetDateTime::UNIX_EPOCH
        .checked_add(Duration::days(days_since_epoch as i64))
        .ok_or_else(|| range_err("date out of range"))?;
    Ok(format!("{:04}-{:02}-{:02}", dt.year(), u8::from(dt.month()), dt.day()))
}

/// `millis_since_midnight` as `HH:MM:SS.mmm`.
pub fn format_local_time(millis_since_midnight: i64) -> Result<String, ArrayError> {
    if !(0..86_400_000).contains(&millis_since_midnight) {
        return Err(range_err("time of day out of [0, 86_400_000) millis"));
    }
    let total_seconds = millis_since_midnight / 1000;
    let millis = millis_since_midnight % 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    Ok(format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}"))
}

/// `epoch_millis` as `YYYY-MM-DDTHH:MM:SS.mmm`.
pub fn format_local_datetime(epoch_millis: i64) -> Result<String, ArrayError> {
    let dt = OffsetDateTime::from_unix_timestamp(epoch_millis.div_euclid(1000))
        .map_err(range_err)?;
    let millis = epoch_millis.rem_euclid(1000);
    Ok(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        millis
    ))
}

/// `epoch_millis` as `YYYY-MM-DDTHH:MM:SS.mmm[zone]`, appending the resolved
/// zone name rather than a numeric offset (this crate never loads a tz
/// database — the zone is an opaque, interned label).
pub fn format_zoned(epoch_millis: i64, zone: &str) -> Result<String, ArrayError> {
    Ok(format!("{}[{}]", format_local_datetime(epoch_millis)?, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_zero_is_the_unix_epoch() {
        assert_eq!(format_local_date(0).unwrap(), "1970-01-01");
    }

    #[test]
    fn midnight_formats_as_zero_time() {
        assert_eq!(format_local_time(0).unwrap(), "00:00:00.000");
    }

    #[test]
    fn datetime_includes_date_and_time() {
        assert_eq!(format_local_datetime(0).unwrap(), "1970-01-01T00:00:00.000");
    }

    #[test]
    fn zoned_appends_the_zone_label() {
        assert_eq!(format_zoned(0, "UTC").unwrap(), "1970-01-01T00:00:00.000[UTC]");
    }
}
