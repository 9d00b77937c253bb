//! # LocalTimeArray — *Milliseconds Since Midnight*

use super::epoch::epoch_backed_array;

epoch_backed_array!(LocalTimeArray, i64, LocalTime);

#[cfg(feature = "datetime")]
impl LocalTimeArray {
    /// Renders `ordinal` as `HH:MM:SS.mmm`.
    pub fn format(&self, ordinal: usize) -> Result<String, crate::error::ArrayError> {
        use crate::traits::TypedArray;
        super::format::format_local_time(self.get(ordinal)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TypedArray;

    #[test]
    fn dense_get_set() {
        let mut a = LocalTimeArray::dense(vec![0, 3_600_000, 7_200_000]);
        a.set(0, 1_800_000).unwrap();
        assert_eq!(a.get(0).unwrap(), 1_800_000);
    }
}
