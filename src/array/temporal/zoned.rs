//! # ZonedDateTimeArray — *Epoch Millis Plus an Interned Zone Code*
//!
//! Stored as `(epoch_ms: i64, zone_code: u16)` rather than `(epoch_ms,
//! &'static str)`: interning the zone name through [`ZoneRegistry`] keeps
//! the per-cell footprint fixed-width like every other temporal array,
//! while `zone_name` recovers the original string for display or
//! serialization.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::enums::Style;
use crate::error::ArrayError;
use crate::storage::{bounds_check, Storage};
use crate::traits::TypedArray;
use crate::value::Value;

struct ZoneRegistryInner {
    names: Vec<String>,
    codes: HashMap<String, u16>,
}

/// Process-wide zone-name interning table. Initialized lazily on first use,
/// matching this crate's "init once, no teardown" configuration idiom.
pub struct ZoneRegistry;

static REGISTRY: OnceLock<Mutex<ZoneRegistryInner>> = OnceLock::new();

impl ZoneRegistry {
    fn inner() -> &'static Mutex<ZoneRegistryInner> {
        REGISTRY.get_or_init(|| {
            Mutex::new(ZoneRegistryInner { names: Vec::new(), codes: HashMap::new() })
        })
    }

    /// Returns the interned code for `zone`, assigning a new one if unseen.
    pub fn intern(zone: &str) -> u16 {
        let mut inner = Self::inner().lock().unwrap();
        if let Some(&code) = inner.codes.get(zone) {
            return code;
        }
        let code = inner.names.len() as u16;
        inner.names.push(zone.to_string());
        inner.codes.insert(zone.to_string(), code);
        code
    }

    /// Recovers the zone name for a previously interned code.
    pub fn name_of(code: u16) -> Option<String> {
        Self::inner().lock().unwrap().names.get(code as usize).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZonedInstant {
    pub epoch_ms: i64,
    pub zone_code: u16,
}

#[derive(Debug, Clone)]
pub struct ZonedDateTimeArray {
    storage: Storage<ZonedInstant>,
    validity: Option<Vec<bool>>,
}

impl ZonedDateTimeArray {
    pub fn dense(values: Vec<(i64, &str)>) -> Self {
        let values: Vec<ZonedInstant> = values
            .into_iter()
            .map(|(ms, zone)| ZonedInstant { epoch_ms: ms, zone_code: ZoneRegistry::intern(zone) })
            .collect();
        ZonedDateTimeArray { storage: Storage::dense_from(values), validity: None }
    }

    pub fn sparse(len: usize, default_zone: &str) -> Self {
        let default = ZonedInstant { epoch_ms: 0, zone_code: ZoneRegistry::intern(default_zone) };
        ZonedDateTimeArray { storage: Storage::sparse(len, default, 0.1), validity: None }
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

    pub fn zone_name(&self, ordinal: usize) -> Result<Option<String>, ArrayError> {
        bounds_check("zone_name", ordinal, self.storage.len())?;
        Ok(ZoneRegistry::name_of(self.storage.get(ordinal).zone_code))
    }

    pub fn set_zoned(&mut self, ordinal: usize, epoch_ms: i64, zone: &str) -> Result<(), ArrayError> {
        bounds_check("set_zoned", ordinal, self.storage.len())?;
        let code = ZoneRegistry::intern(zone);
        self.storage.set(ordinal, ZonedInstant { epoch_ms, zone_code: code });
        self.mark_valid(ordinal);
        Ok(())
    }

    /// Renders `ordinal` as `YYYY-MM-DDTHH:MM:SS.mmm[zone]`.
    #[cfg(feature = "datetime")]
    pub fn format(&self, ordinal: usize) -> Result<String, ArrayError> {
        bounds_check("format", ordinal, self.storage.len())?;
        let v = self.storage.get(ordinal);
        let zone = ZoneRegistry::name_of(v.zone_code).unwrap_or_else(|| "?".to_string());
        super::format::format_zoned(v.epoch_ms, &zone)
    }
}

impl TypedArray for ZonedDateTimeArray {
    type Elem = ZonedInstant;

    fn length(&self) -> usize {
        self.storage.len()
    }

    fn style(&self) -> Style {
        self.storage.style()
    }

    fn default_value(&self) -> ZonedInstant {
        self.storage.default_value(&ZonedInstant::default())
    }

    fn get(&self, ordinal: usize) -> Result<ZonedInstant, ArrayError> {
        bounds_check("get", ordinal, self.length())?;
        Ok(self.storage.get(ordinal))
    }

    fn set(&mut self, ordinal: usize, value: ZonedInstant) -> Result<(), ArrayError> {
        bounds_check("set", ordinal, self.length())?;
        self.storage.set(ordinal, value);
        self.mark_valid(ordinal);
        Ok(())
    }

    fn is_null(&self, ordinal: usize) -> Result<bool, ArrayError> {
        bounds_check("is_null", ordinal, self.length())?;
        Ok(self.validity.as_ref().map(|v| !v[ordinal]).unwrap_or(false))
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        bounds_check("swap", i, self.length())?;
        bounds_check("swap", j, self.length())?;
        self.storage.swap(i, j);
        if let Some(v) = &mut self.validity {
            v.swap(i, j);
        }
        Ok(())
    }

    fn compare(&self, i: usize, j: usize) -> Result<std::cmp::Ordering, ArrayError> {
        Ok(self.get(i)?.epoch_ms.cmp(&self.get(j)?.epoch_ms))
    }

    fn sort(&mut self, start: usize, end: usize, descending: bool) -> Result<Vec<usize>, ArrayError> {
        bounds_check("sort", end.saturating_sub(1).max(start), self.length())?;
        let mut slice: Vec<usize> = (start..end).collect();
        slice.sort_by_key(|&i| self.storage.get(i).epoch_ms);
        if descending {
            slice.reverse();
        }
        let values: Vec<ZonedInstant> = slice.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(slice)
    }

    fn apply_permutation(&mut self, start: usize, permutation: &[usize]) -> Result<(), ArrayError> {
        let values: Vec<ZonedInstant> = permutation.iter().map(|&i| self.storage.get(i)).collect();
        for (offset, v) in values.into_iter().enumerate() {
            self.storage.set(start + offset, v);
        }
        Ok(())
    }

    fn gather(&self, ordinals: &[usize]) -> Self {
        ZonedDateTimeArray { storage: self.storage.gather(ordinals), validity: None }
    }

    fn copy_range(&self, start: usize, len: usize) -> Self {
        ZonedDateTimeArray { storage: self.storage.slice(start, len), validity: None }
    }

    fn expand(&mut self, new_len: usize) {
        let default = self.default_value();
        self.storage.expand(new_len, &default);
        if let Some(v) = &mut self.validity {
            v.resize(new_len, false);
        }
    }

    fn fill(&mut self, value: ZonedInstant, start: usize, end: usize) -> Result<(), ArrayError> {
        bounds_check("fill", end.saturating_sub(1).max(start), self.length())?;
        self.storage.fill(value, start, end);
        if let Some(v) = &mut self.validity {
            for slot in v[start..end].iter_mut() {
                *slot = true;
            }
        }
        Ok(())
    }

    fn binary_search(&self, value: &ZonedInstant) -> Result<usize, usize> {
        self.storage.to_vec().binary_search_by_key(&value.epoch_ms, |v| v.epoch_ms)
    }

    fn get_value(&self, ordinal: usize) -> Result<Value, ArrayError> {
        if self.is_null(ordinal)? {
            return Ok(Value::Null);
        }
        let v = self.get(ordinal)?;
        Ok(Value::ZonedDateTime(v.epoch_ms, v.zone_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_names_round_trip_through_the_registry() {
        let a = ZonedDateTimeArray::dense(vec![(0, "UTC"), (1_000, "America/New_York")]);
        assert_eq!(a.zone_name(0).unwrap().as_deref(), Some("UTC"));
        assert_eq!(a.zone_name(1).unwrap().as_deref(), Some("America/New_York"));
    }

    #[test]
    fn equal_zone_strings_intern_to_the_same_code() {
        let a = ZonedDateTimeArray::dense(vec![(0, "UTC")]);
        let b = ZonedDateTimeArray::dense(vec![(0, "UTC")]);
        assert_eq!(a.get(0).unwrap().zone_code, b.get(0).unwrap().zone_code);
    }

    #[test]
    fn sparse_default_is_the_interned_default_zone() {
        let a = ZonedDateTimeArray::sparse(3, "UTC");
        assert_eq!(a.zone_name(0).unwrap().as_deref(), Some("UTC"));
    }
}
