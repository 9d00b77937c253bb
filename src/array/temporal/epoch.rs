//! # Epoch-Backed Temporal Arrays
//!
//! [`LocalDate`][crate::array::temporal::date], `LocalTime`, and
//! `LocalDateTime` differ only in their integer representation (days, or
//! milliseconds from two different origins) and which [`Value`] variant
//! they erase into — so they share one generated implementation here rather
//! than three hand-copied ones.

macro_rules! epoch_backed_array {
    ($name:ident, $repr:ty, $value_variant:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            storage: crate::storage::Storage<$repr>,
            validity: Option<Vec<bool>>,
        }

        impl $name {
            pub fn dense(values: Vec<$repr>) -> Self {
                $name { storage: crate::storage::Storage::dense_from(values), validity: None }
            }

            pub fn sparse(len: usize, default: $repr) -> Self {
                $name { storage: crate::storage::Storage::sparse(len, default, 0.1), validity: None }
            }

            pub fn mapped(start: $repr, step: $repr, len: usize) -> Self {
                $name { storage: crate::storage::Storage::mapped(start, step, len), validity: None }
            }

            pub fn with_validity(mut self, validity: Vec<bool>) -> Self {
                debug_assert_eq!(validity.len(), self.storage.len());
                self.validity = Some(validity);
                self
            }

            fn mark_valid(&mut self, ordinal: usize) {
                if let Some(v) = &mut self.validity {
                    v[ordinal] = true;
                }
            }
        }

        impl crate::traits::TypedArray for $name {
            type Elem = $repr;

            fn length(&self) -> usize {
                self.storage.len()
            }

            fn style(&self) -> crate::enums::Style {
                self.storage.style()
            }

            fn default_value(&self) -> $repr {
                self.storage.default_value(&0)
            }

            fn get(&self, ordinal: usize) -> Result<$repr, crate::error::ArrayError> {
                crate::storage::bounds_check("get", ordinal, self.length())?;
                Ok(self.storage.get(ordinal))
            }

            fn set(&mut self, ordinal: usize, value: $repr) -> Result<(), crate::error::ArrayError> {
                crate::storage::bounds_check("set", ordinal, self.length())?;
                self.storage.set(ordinal, value);
                self.mark_valid(ordinal);
                Ok(())
            }

            fn is_null(&self, ordinal: usize) -> Result<bool, crate::error::ArrayError> {
                crate::storage::bounds_check("is_null", ordinal, self.length())?;
                Ok(self.validity.as_ref().map(|v| !v[ordinal]).unwrap_or(false))
            }

            fn swap(&mut self, i: usize, j: usize) -> Result<(), crate::error::ArrayError> {
                crate::storage::bounds_check("swap", i, self.length())?;
                crate::storage::bounds_check("swap", j, self.length())?;
                self.storage.swap(i, j);
                if let Some(v) = &mut self.validity {
                    v.swap(i, j);
                }
                Ok(())
            }

            fn compare(&self, i: usize, j: usize) -> Result<std::cmp::Ordering, crate::error::ArrayError> {
                Ok(self.get(i)?.cmp(&self.get(j)?))
            }

            fn sort(
                &mut self,
                start: usize,
                end: usize,
                descending: bool,
            ) -> Result<Vec<usize>, crate::error::ArrayError> {
                crate::storage::bounds_check("sort", end.saturating_sub(1).max(start), self.length())?;
                let mut slice: Vec<usize> = (start..end).collect();
                slice.sort_by_key(|&i| self.storage.get(i));
                if descending {
                    slice.reverse();
                }
                let values: Vec<$repr> = slice.iter().map(|&i| self.storage.get(i)).collect();
                for (offset, v) in values.into_iter().enumerate() {
                    self.storage.set(start + offset, v);
                }
                Ok(slice)
            }

            fn apply_permutation(
                &mut self,
                start: usize,
                permutation: &[usize],
            ) -> Result<(), crate::error::ArrayError> {
                let values: Vec<$repr> = permutation.iter().map(|&i| self.storage.get(i)).collect();
                for (offset, v) in values.into_iter().enumerate() {
                    self.storage.set(start + offset, v);
                }
                Ok(())
            }

            fn gather(&self, ordinals: &[usize]) -> Self {
                $name { storage: self.storage.gather(ordinals), validity: None }
            }

            fn copy_range(&self, start: usize, len: usize) -> Self {
                $name { storage: self.storage.slice(start, len), validity: None }
            }

            fn expand(&mut self, new_len: usize) {
                let default = self.default_value();
                self.storage.expand(new_len, &default);
                if let Some(v) = &mut self.validity {
                    v.resize(new_len, false);
                }
            }

            fn fill(
                &mut self,
                value: $repr,
                start: usize,
                end: usize,
            ) -> Result<(), crate::error::ArrayError> {
                crate::storage::bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
                self.storage.fill(value, start, end);
                if let Some(v) = &mut self.validity {
                    for slot in v[start..end].iter_mut() {
                        *slot = true;
                    }
                }
                Ok(())
            }

            fn binary_search(&self, value: &$repr) -> Result<usize, usize> {
                self.storage.to_vec().binary_search(value)
            }

            fn get_value(&self, ordinal: usize) -> Result<crate::value::Value, crate::error::ArrayError> {
                if self.is_null(ordinal)? {
                    return Ok(crate::value::Value::Null);
                }
                Ok(crate::value::Value::$value_variant(self.get(ordinal)?))
            }
        }
    };
}

pub(crate) use epoch_backed_array;
