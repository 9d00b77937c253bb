//! # Serialization Module — *Custom Binary Wire Format*
//!
//! A small, dependency-free binary encoding for arrays and key indexes: no
//! `serde`, matching the rest of this crate's hand-rolled-over-the-wire
//! style. Dense columns write every value back to back; sparse columns write
//! their default once, then a `(coordinate, value)` list for every cell that
//! diverges from it. `write_to`'s `indexes` parameter lets a caller write
//! only a chosen subset of ordinals — ignoring the array's own style — which
//! is how a frame writes a single row slice without materializing a copy.

use std::io::{Read, Write};

use crate::aliases::Key;
use crate::array::temporal::{ZoneRegistry, ZonedInstant};
use crate::array::{
    BooleanArray, CodedArray, DoubleArray, IntArray, LocalDateArray, LocalDateTimeArray, LocalTimeArray, LongArray,
    StringArray, ZonedDateTimeArray,
};
use crate::enums::Style;
use crate::error::ArrayError;
use crate::index::KeyIndex;
use crate::traits::TypedArray;

/// Binary read/write for a single array type. `write_to` honors the array's
/// own dense/sparse style unless `indexes` narrows the write to a chosen
/// ordinal subset. `read_from` always needs the target length up front,
/// since a sparse payload carries only the non-default cells.
pub trait Serializable: Sized {
    fn write_to<W: Write>(&self, writer: &mut W, indexes: Option<&[usize]>) -> Result<(), ArrayError>;
    fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Self, ArrayError>;
}

const TAG_DENSE: u8 = 0;
const TAG_SPARSE: u8 = 1;

fn io_err(e: std::io::Error) -> ArrayError {
    ArrayError::Serialization(e.to_string())
}

fn write_u64(writer: &mut impl Write, v: u64) -> Result<(), ArrayError> {
    writer.write_all(&v.to_le_bytes()).map_err(io_err)
}

fn read_u64(reader: &mut impl Read) -> Result<u64, ArrayError> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(io_err)?;
    Ok(u64::from_le_bytes(buf))
}

fn encode_bool(v: bool) -> [u8; 1] {
    [v as u8]
}
fn decode_bool(b: &[u8]) -> bool {
    b[0] != 0
}

fn encode_i32(v: i32) -> [u8; 4] {
    v.to_le_bytes()
}
fn decode_i32(b: &[u8]) -> i32 {
    i32::from_le_bytes(b.try_into().unwrap())
}

fn encode_i64(v: i64) -> [u8; 8] {
    v.to_le_bytes()
}
fn decode_i64(b: &[u8]) -> i64 {
    i64::from_le_bytes(b.try_into().unwrap())
}

fn encode_f64(v: f64) -> [u8; 8] {
    v.to_le_bytes()
}
fn decode_f64(b: &[u8]) -> f64 {
    f64::from_le_bytes(b.try_into().unwrap())
}

fn encode_zoned(v: ZonedInstant) -> [u8; 10] {
    let mut buf = [0u8; 10];
    buf[0..8].copy_from_slice(&v.epoch_ms.to_le_bytes());
    buf[8..10].copy_from_slice(&v.zone_code.to_le_bytes());
    buf
}
fn decode_zoned(b: &[u8]) -> ZonedInstant {
    ZonedInstant {
        epoch_ms: i64::from_le_bytes(b[0..8].try_into().unwrap()),
        zone_code: u16::from_le_bytes(b[8..10].try_into().unwrap()),
    }
}

/// Generates a [`Serializable`] impl for a fixed-width `TypedArray` whose
/// constructors are named `dense`/`sparse`, writing `$width`-byte values
/// via the given encode/decode pair.
macro_rules! impl_fixed_width_serializable {
    ($ty:ty, $width:expr, $encode:ident, $decode:ident) => {
        impl Serializable for $ty {
            fn write_to<W: Write>(&self, writer: &mut W, indexes: Option<&[usize]>) -> Result<(), ArrayError> {
                if let Some(idx) = indexes {
                    write_u64(writer, idx.len() as u64)?;
                    for &ordinal in idx {
                        writer.write_all(&$encode(self.get(ordinal)?)).map_err(io_err)?;
                    }
                    return Ok(());
                }
                match self.style() {
                    Style::Sparse => {
                        writer.write_all(&[TAG_SPARSE]).map_err(io_err)?;
                        let default = self.default_value();
                        writer.write_all(&$encode(default)).map_err(io_err)?;
                        let non_default: Vec<(usize, _)> = (0..self.length())
                            .filter_map(|o| {
                                let v = self.get(o).ok()?;
                                if v == default { None } else { Some((o, v)) }
                            })
                            .collect();
                        write_u64(writer, non_default.len() as u64)?;
                        for (coord, value) in non_default {
                            write_u64(writer, coord as u64)?;
                            writer.write_all(&$encode(value)).map_err(io_err)?;
                        }
                        Ok(())
                    }
                    _ => {
                        writer.write_all(&[TAG_DENSE]).map_err(io_err)?;
                        for ordinal in 0..self.length() {
                            writer.write_all(&$encode(self.get(ordinal)?)).map_err(io_err)?;
                        }
                        Ok(())
                    }
                }
            }

            fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Self, ArrayError> {
                let mut tag = [0u8; 1];
                reader.read_exact(&mut tag).map_err(io_err)?;
                let mut buf = [0u8; $width];
                match tag[0] {
                    TAG_DENSE => {
                        let mut values = Vec::with_capacity(count);
                        for _ in 0..count {
                            reader.read_exact(&mut buf).map_err(io_err)?;
                            values.push($decode(&buf));
                        }
                        Ok(Self::dense(values))
                    }
                    TAG_SPARSE => {
                        reader.read_exact(&mut buf).map_err(io_err)?;
                        let default = $decode(&buf);
                        let mut array = Self::sparse(count, default);
                        let n = read_u64(reader)? as usize;
                        for _ in 0..n {
                            let coord = read_u64(reader)? as usize;
                            reader.read_exact(&mut buf).map_err(io_err)?;
                            let value = $decode(&buf);
                            array.set(coord, value)?;
                        }
                        Ok(array)
                    }
                    other => Err(ArrayError::Serialization(format!("unknown style tag {other}"))),
                }
            }
        }
    };
}

impl_fixed_width_serializable!(BooleanArray, 1, encode_bool, decode_bool);
impl_fixed_width_serializable!(IntArray, 4, encode_i32, decode_i32);
impl_fixed_width_serializable!(LongArray, 8, encode_i64, decode_i64);
impl_fixed_width_serializable!(DoubleArray, 8, encode_f64, decode_f64);
impl_fixed_width_serializable!(LocalDateArray, 4, encode_i32, decode_i32);
impl_fixed_width_serializable!(LocalTimeArray, 8, encode_i64, decode_i64);
impl_fixed_width_serializable!(LocalDateTimeArray, 8, encode_i64, decode_i64);

impl Serializable for StringArray {
    fn write_to<W: Write>(&self, writer: &mut W, indexes: Option<&[usize]>) -> Result<(), ArrayError> {
        fn write_str(writer: &mut impl Write, s: &str) -> Result<(), ArrayError> {
            write_u64(writer, s.len() as u64)?;
            writer.write_all(s.as_bytes()).map_err(io_err)
        }
        if let Some(idx) = indexes {
            write_u64(writer, idx.len() as u64)?;
            for &ordinal in idx {
                write_str(writer, &self.get(ordinal)?)?;
            }
            return Ok(());
        }
        match self.style() {
            Style::Sparse => {
                writer.write_all(&[TAG_SPARSE]).map_err(io_err)?;
                let default = self.default_value();
                write_str(writer, &default)?;
                let non_default: Vec<(usize, String)> = (0..self.length())
                    .filter_map(|o| {
                        let v = self.get(o).ok()?;
                        if v == default { None } else { Some((o, v)) }
                    })
                    .collect();
                write_u64(writer, non_default.len() as u64)?;
                for (coord, value) in non_default {
                    write_u64(writer, coord as u64)?;
                    write_str(writer, &value)?;
                }
                Ok(())
            }
            _ => {
                writer.write_all(&[TAG_DENSE]).map_err(io_err)?;
                for ordinal in 0..self.length() {
                    write_str(writer, &self.get(ordinal)?)?;
                }
                Ok(())
            }
        }
    }

    fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Self, ArrayError> {
        fn read_str(reader: &mut impl Read) -> Result<String, ArrayError> {
            let len = read_u64(reader)? as usize;
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf).map_err(io_err)?;
            String::from_utf8(buf).map_err(|e| ArrayError::Serialization(e.to_string()))
        }
        let mut tag = [0u8; 1];
        reader.read_exact(&mut tag).map_err(io_err)?;
        match tag[0] {
            TAG_DENSE => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(read_str(reader)?);
                }
                Ok(StringArray::dense(values))
            }
            TAG_SPARSE => {
                let default = read_str(reader)?;
                let mut array = StringArray::sparse(count, default);
                let n = read_u64(reader)? as usize;
                for _ in 0..n {
                    let coord = read_u64(reader)? as usize;
                    let value = read_str(reader)?;
                    array.set(coord, value)?;
                }
                Ok(array)
            }
            other => Err(ArrayError::Serialization(format!("unknown style tag {other}"))),
        }
    }
}

impl Serializable for ZonedDateTimeArray {
    fn write_to<W: Write>(&self, writer: &mut W, indexes: Option<&[usize]>) -> Result<(), ArrayError> {
        if let Some(idx) = indexes {
            write_u64(writer, idx.len() as u64)?;
            for &ordinal in idx {
                writer.write_all(&encode_zoned(self.get(ordinal)?)).map_err(io_err)?;
            }
            return Ok(());
        }
        match self.style() {
            Style::Sparse => {
                writer.write_all(&[TAG_SPARSE]).map_err(io_err)?;
                let default = self.default_value();
                writer.write_all(&encode_zoned(default)).map_err(io_err)?;
                let non_default: Vec<(usize, ZonedInstant)> = (0..self.length())
                    .filter_map(|o| {
                        let v = self.get(o).ok()?;
                        if v == default { None } else { Some((o, v)) }
                    })
                    .collect();
                write_u64(writer, non_default.len() as u64)?;
                for (coord, value) in non_default {
                    write_u64(writer, coord as u64)?;
                    writer.write_all(&encode_zoned(value)).map_err(io_err)?;
                }
                Ok(())
            }
            _ => {
                writer.write_all(&[TAG_DENSE]).map_err(io_err)?;
                for ordinal in 0..self.length() {
                    writer.write_all(&encode_zoned(self.get(ordinal)?)).map_err(io_err)?;
                }
                Ok(())
            }
        }
    }

    fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Self, ArrayError> {
        let mut tag = [0u8; 1];
        reader.read_exact(&mut tag).map_err(io_err)?;
        let mut buf = [0u8; 10];
        match tag[0] {
            TAG_DENSE => {
                let mut decoded = Vec::with_capacity(count);
                for _ in 0..count {
                    reader.read_exact(&mut buf).map_err(io_err)?;
                    let v = decode_zoned(&buf);
                    let zone = ZoneRegistry::name_of(v.zone_code).unwrap_or_else(|| "UTC".to_string());
                    decoded.push((v.epoch_ms, zone));
                }
                let pairs: Vec<(i64, &str)> = decoded.iter().map(|(ms, z)| (*ms, z.as_str())).collect();
                Ok(ZonedDateTimeArray::dense(pairs))
            }
            TAG_SPARSE => {
                reader.read_exact(&mut buf).map_err(io_err)?;
                let default = decode_zoned(&buf);
                let default_zone = ZoneRegistry::name_of(default.zone_code).unwrap_or_else(|| "UTC".to_string());
                let mut array = ZonedDateTimeArray::sparse(count, &default_zone);
                let n = read_u64(reader)? as usize;
                for _ in 0..n {
                    let coord = read_u64(reader)? as usize;
                    reader.read_exact(&mut buf).map_err(io_err)?;
                    let value = decode_zoned(&buf);
                    let zone = ZoneRegistry::name_of(value.zone_code).unwrap_or_else(|| "UTC".to_string());
                    array.set_zoned(coord, value.epoch_ms, &zone)?;
                }
                Ok(array)
            }
            other => Err(ArrayError::Serialization(format!("unknown style tag {other}"))),
        }
    }
}

/// Coded columns serialize as a flat null-flag-plus-label sequence rather
/// than replaying dense/sparse storage shape: `read_from` builds a fresh
/// dictionary regardless, so there's nothing to gain from preserving it.
impl Serializable for CodedArray<String> {
    fn write_to<W: Write>(&self, writer: &mut W, indexes: Option<&[usize]>) -> Result<(), ArrayError> {
        fn write_str(writer: &mut impl Write, s: &str) -> Result<(), ArrayError> {
            write_u64(writer, s.len() as u64)?;
            writer.write_all(s.as_bytes()).map_err(io_err)
        }
        let ordinals: Vec<usize> = match indexes {
            Some(idx) => idx.to_vec(),
            None => (0..self.length()).collect(),
        };
        write_u64(writer, ordinals.len() as u64)?;
        for ordinal in ordinals {
            let null = self.is_null(ordinal)?;
            writer.write_all(&[null as u8]).map_err(io_err)?;
            if !null {
                write_str(writer, &self.get(ordinal)?)?;
            }
        }
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Self, ArrayError> {
        fn read_str(reader: &mut impl Read) -> Result<String, ArrayError> {
            let len = read_u64(reader)? as usize;
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf).map_err(io_err)?;
            String::from_utf8(buf).map_err(|e| ArrayError::Serialization(e.to_string()))
        }
        let n = read_u64(reader)? as usize;
        let mut array = CodedArray::<String>::new(count);
        for ordinal in 0..n {
            let mut null = [0u8; 1];
            reader.read_exact(&mut null).map_err(io_err)?;
            if null[0] == 0 {
                let value = read_str(reader)?;
                array.set(ordinal, value)?;
            }
        }
        Ok(array)
    }
}

/// Per-key byte encoding for [`KeyIndex`] serialization. Implemented for the
/// key types this crate's tests and examples actually use as row/column
/// keys; adding a new key type means adding a small impl here.
pub trait KeyCodec: Sized {
    fn write_key<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError>;
    fn read_key<R: Read>(reader: &mut R) -> Result<Self, ArrayError>;
}

impl KeyCodec for String {
    fn write_key<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError> {
        write_u64(writer, self.len() as u64)?;
        writer.write_all(self.as_bytes()).map_err(io_err)
    }

    fn read_key<R: Read>(reader: &mut R) -> Result<Self, ArrayError> {
        let len = read_u64(reader)? as usize;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).map_err(io_err)?;
        String::from_utf8(buf).map_err(|e| ArrayError::Serialization(e.to_string()))
    }
}

impl KeyCodec for i32 {
    fn write_key<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError> {
        writer.write_all(&self.to_le_bytes()).map_err(io_err)
    }

    fn read_key<R: Read>(reader: &mut R) -> Result<Self, ArrayError> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf).map_err(io_err)?;
        Ok(i32::from_le_bytes(buf))
    }
}

impl KeyCodec for i64 {
    fn write_key<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError> {
        writer.write_all(&self.to_le_bytes()).map_err(io_err)
    }

    fn read_key<R: Read>(reader: &mut R) -> Result<Self, ArrayError> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf).map_err(io_err)?;
        Ok(i64::from_le_bytes(buf))
    }
}

impl KeyCodec for usize {
    fn write_key<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError> {
        write_u64(writer, *self as u64)
    }

    fn read_key<R: Read>(reader: &mut R) -> Result<Self, ArrayError> {
        Ok(read_u64(reader)? as usize)
    }
}

impl<K: Key + KeyCodec> KeyIndex<K> {
    /// Writes this index's visible keys, in ordinal order, as a length
    /// prefix followed by each key's own encoding.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ArrayError> {
        let keys = self.keys_in_order();
        write_u64(writer, keys.len() as u64)?;
        for key in &keys {
            key.write_key(writer)?;
        }
        Ok(())
    }

    /// Rebuilds a fresh root index from a stream written by [`Self::write_to`].
    pub fn read_from<R: Read>(reader: &mut R) -> Result<KeyIndex<K>, ArrayError> {
        let n = read_u64(reader)? as usize;
        let mut keys = Vec::with_capacity(n);
        for _ in 0..n {
            keys.push(K::read_key(reader)?);
        }
        KeyIndex::of(keys).map_err(|e| ArrayError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_int_array_round_trips() {
        let a = IntArray::dense(vec![1, 2, 3, 4]);
        let mut buf = Vec::new();
        a.write_to(&mut buf, None).unwrap();
        let b = IntArray::read_from(&mut &buf[..], 4).unwrap();
        for i in 0..4 {
            assert_eq!(a.get(i).unwrap(), b.get(i).unwrap());
        }
    }

    #[test]
    fn sparse_boolean_array_round_trips_and_stays_compact() {
        let mut a = BooleanArray::sparse(100, false);
        a.set(42, true).unwrap();
        let mut buf = Vec::new();
        a.write_to(&mut buf, None).unwrap();
        // tag (1) + default (1) + count (8) + one (coordinate, value) pair (9)
        assert_eq!(buf.len(), 1 + 1 + 8 + 9);
        let b = BooleanArray::read_from(&mut &buf[..], 100).unwrap();
        assert!(b.get(42).unwrap());
        assert!(!b.get(0).unwrap());
    }

    #[test]
    fn string_array_round_trips_variable_width_values() {
        let a = StringArray::dense(vec!["hello".into(), "".into(), "world".into()]);
        let mut buf = Vec::new();
        a.write_to(&mut buf, None).unwrap();
        let b = StringArray::read_from(&mut &buf[..], 3).unwrap();
        assert_eq!(a.get(0).unwrap(), b.get(0).unwrap());
        assert_eq!(a.get(2).unwrap(), b.get(2).unwrap());
    }

    #[test]
    fn write_to_with_indexes_writes_only_the_chosen_ordinals() {
        let a = DoubleArray::dense(vec![1.0, 2.0, 3.0, 4.0]);
        let mut buf = Vec::new();
        a.write_to(&mut buf, Some(&[3, 1])).unwrap();
        let mut reader = &buf[..];
        let n = read_u64(&mut reader).unwrap();
        assert_eq!(n, 2);
        let mut val = [0u8; 8];
        reader.read_exact(&mut val).unwrap();
        assert_eq!(decode_f64(&val), 4.0);
        reader.read_exact(&mut val).unwrap();
        assert_eq!(decode_f64(&val), 2.0);
    }

    #[test]
    fn zoned_datetime_array_round_trips_zone_names() {
        let a = ZonedDateTimeArray::dense(vec![(0, "UTC"), (86_400_000, "America/New_York")]);
        let mut buf = Vec::new();
        a.write_to(&mut buf, None).unwrap();
        let b = ZonedDateTimeArray::read_from(&mut &buf[..], 2).unwrap();
        assert_eq!(a.get(0).unwrap().epoch_ms, b.get(0).unwrap().epoch_ms);
        assert_eq!(b.zone_name(1).unwrap().as_deref(), Some("America/New_York"));
    }

    #[test]
    fn coded_array_round_trips_labels_and_nulls() {
        let a = CodedArray::<String>::dense(vec!["red".into(), "blue".into(), "red".into()]);
        let mut buf = Vec::new();
        a.write_to(&mut buf, None).unwrap();
        let b = CodedArray::<String>::read_from(&mut &buf[..], 3).unwrap();
        assert_eq!(a.get(0).unwrap(), b.get(0).unwrap());
        assert_eq!(a.get(2).unwrap(), b.get(2).unwrap());
    }

    #[test]
    fn key_index_round_trips_in_ordinal_order() {
        let idx: KeyIndex<String> = KeyIndex::of(vec!["b".into(), "a".into(), "c".into()]).unwrap();
        let mut buf = Vec::new();
        idx.write_to(&mut buf).unwrap();
        let restored: KeyIndex<String> = KeyIndex::read_from(&mut &buf[..]).unwrap();
        assert_eq!(restored.keys_in_order(), vec!["b".to_string(), "a".to_string(), "c".to_string()]);
    }
}
