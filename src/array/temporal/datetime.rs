//! # LocalDateTimeArray — *Milliseconds Since the Unix Epoch, No Zone*

use super::epoch::epoch_backed_array;

epoch_backed_array!(LocalDateTimeArray, i64, LocalDateTime);

#[cfg(feature = "datetime")]
impl LocalDateTimeArray {
    /// Renders `ordinal` as `YYYY-MM-DDTHH:MM:SS.mmm`.
    pub fn format(&self, ordinal: usize) -> Result<String, crate::error::ArrayError> {
        use crate::traits::TypedArray;
        super::format::format_local_datetime(self.get(ordinal)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TypedArray;

    #[test]
    fn sort_orders_timestamps_ascending() {
        let mut a = LocalDateTimeArray::dense(vec![300, 100, 200]);
        a.sort(0, 3, false).unwrap();
        assert_eq!(a.get(0).unwrap(), 100);
        assert_eq!(a.get(2).unwrap(), 300);
    }
}
