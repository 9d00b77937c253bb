//! # LocalDateArray — *Days Since the Unix Epoch*

use super::epoch::epoch_backed_array;

epoch_backed_array!(LocalDateArray, i32, LocalDate);

#[cfg(feature = "datetime")]
impl LocalDateArray {
    /// Renders `ordinal` as `YYYY-MM-DD`.
    pub fn format(&self, ordinal: usize) -> Result<String, crate::error::ArrayError> {
        use crate::traits::TypedArray;
        super::format::format_local_date(self.get(ordinal)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TypedArray;

    #[test]
    fn mapped_daily_sequence_reads() {
        let a = LocalDateArray::mapped(19_000, 1, 7);
        assert_eq!(a.get(6).unwrap(), 19_006);
    }

    #[test]
    fn set_breaks_mapped_sequence() {
        let mut a = LocalDateArray::mapped(0, 1, 5);
        a.set(2, 999).unwrap();
        assert_eq!(a.get(2).unwrap(), 999);
        assert_eq!(a.get(1).unwrap(), 1);
    }
}
