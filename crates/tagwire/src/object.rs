// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The read/write contract implemented by every wire type.
//!
//! [`WireEncode`] and [`WireDecode`] cover *bare* values: the concrete type
//! is fixed by the container's schema, so no constructor ID is emitted.
//! Types that can also appear polymorphically implement [`Constructor`] and
//! go through [`write_boxed`] / [`read_boxed`], which add and consume the
//! 4-byte ID prefix.

use crate::cursor::{WireReader, WireWriter};
use crate::error::{WireError, WireResult};
use crate::primitives::{self, Int256};

/// Bare-value encoding contract.
pub trait WireEncode {
    /// Append this value to the writer, fields in declared order.
    fn write(&self, w: &mut WireWriter) -> WireResult<()>;
}

/// Bare-value decoding contract.
pub trait WireDecode: Sized {
    /// Read one value from the cursor, fields in declared order.
    fn read(r: &mut WireReader<'_>) -> WireResult<Self>;
}

/// Marker for types with a fixed, schema-assigned constructor ID.
pub trait Constructor {
    const CONSTRUCTOR_ID: u32;
}

/// Write `value` in a boxed position: 4-byte constructor ID, then the body.
pub fn write_boxed<T: WireEncode + Constructor>(value: &T, w: &mut WireWriter) -> WireResult<()> {
    w.write_u32_le(T::CONSTRUCTOR_ID);
    value.write(w)
}

/// Read a boxed value of a statically-known type, checking the ID prefix.
pub fn read_boxed<T: WireDecode + Constructor>(r: &mut WireReader<'_>) -> WireResult<T> {
    let found = r.read_u32_le()?;
    if found != T::CONSTRUCTOR_ID {
        return Err(WireError::UnexpectedConstructor {
            expected: T::CONSTRUCTOR_ID,
            found,
        });
    }
    T::read(r)
}

/// Write a homogeneous sequence of bare elements: count, then each element.
pub fn write_vector<T: WireEncode>(items: &[T], w: &mut WireWriter) -> WireResult<()> {
    let count = u32::try_from(items.len()).map_err(|_| WireError::MalformedLength {
        len: items.len(),
        reason: "vector length exceeds u32",
    })?;
    w.write_u32_le(count);
    for item in items {
        item.write(w)?;
    }
    Ok(())
}

/// Read a homogeneous sequence of bare elements.
pub fn read_vector<T: WireDecode>(r: &mut WireReader<'_>) -> WireResult<Vec<T>> {
    let count = r.read_u32_le()? as usize;
    // Every element occupies at least one byte, so a count beyond the
    // remaining buffer can never decode; reject before allocating.
    if count > r.remaining() {
        return Err(WireError::Truncated {
            need: count,
            have: r.remaining(),
        });
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(T::read(r)?);
    }
    Ok(items)
}

/// Write a sequence of boxed elements, each with its own ID prefix.
pub fn write_boxed_vector<T: WireEncode + Constructor>(
    items: &[T],
    w: &mut WireWriter,
) -> WireResult<()> {
    let count = u32::try_from(items.len()).map_err(|_| WireError::MalformedLength {
        len: items.len(),
        reason: "vector length exceeds u32",
    })?;
    w.write_u32_le(count);
    for item in items {
        write_boxed(item, w)?;
    }
    Ok(())
}

/// Read a sequence of boxed elements of a statically-known type.
pub fn read_boxed_vector<T: WireDecode + Constructor>(
    r: &mut WireReader<'_>,
) -> WireResult<Vec<T>> {
    let count = r.read_u32_le()? as usize;
    if count > r.remaining() {
        return Err(WireError::Truncated {
            need: count,
            have: r.remaining(),
        });
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_boxed(r)?);
    }
    Ok(items)
}

impl WireEncode for i32 {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32_le(*self);
        Ok(())
    }
}

impl WireDecode for i32 {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        r.read_i32_le()
    }
}

impl WireEncode for i64 {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i64_le(*self);
        Ok(())
    }
}

impl WireDecode for i64 {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        r.read_i64_le()
    }
}

impl WireEncode for i128 {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i128_le(*self);
        Ok(())
    }
}

impl WireDecode for i128 {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        r.read_i128_le()
    }
}

impl WireEncode for f64 {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64_le(*self);
        Ok(())
    }
}

impl WireDecode for f64 {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        r.read_f64_le()
    }
}

impl WireEncode for bool {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        primitives::write_bool(w, *self);
        Ok(())
    }
}

impl WireDecode for bool {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        primitives::read_bool(r)
    }
}

impl WireEncode for Int256 {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        primitives::write_int256(w, *self);
        Ok(())
    }
}

impl WireDecode for Int256 {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        primitives::read_int256(r)
    }
}

impl WireEncode for Vec<u8> {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        primitives::write_bytes(w, self)
    }
}

impl WireDecode for Vec<u8> {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        primitives::read_bytes(r)
    }
}

impl WireEncode for String {
    fn write(&self, w: &mut WireWriter) -> WireResult<()> {
        primitives::write_str(w, self)
    }
}

impl WireDecode for String {
    fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
        primitives::read_str(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Zero-field boxed object, the simplest shape the contract admits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Ping;

    impl Constructor for Ping {
        const CONSTRUCTOR_ID: u32 = 0x7ABE_77EC;
    }

    impl WireEncode for Ping {
        fn write(&self, _w: &mut WireWriter) -> WireResult<()> {
            Ok(())
        }
    }

    impl WireDecode for Ping {
        fn read(_r: &mut WireReader<'_>) -> WireResult<Self> {
            Ok(Ping)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        id: i32,
        payload: Vec<u8>,
    }

    impl Constructor for Sample {
        const CONSTRUCTOR_ID: u32 = 0x1F0A_9D3C;
    }

    impl WireEncode for Sample {
        fn write(&self, w: &mut WireWriter) -> WireResult<()> {
            self.id.write(w)?;
            self.payload.write(w)
        }
    }

    impl WireDecode for Sample {
        fn read(r: &mut WireReader<'_>) -> WireResult<Self> {
            Ok(Self {
                id: i32::read(r)?,
                payload: Vec::<u8>::read(r)?,
            })
        }
    }

    #[test]
    fn test_boxed_roundtrip() {
        let sample = Sample {
            id: -7,
            payload: vec![1, 2, 3],
        };
        let mut writer = WireWriter::new();
        write_boxed(&sample, &mut writer).expect("write should succeed");
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..4], &Sample::CONSTRUCTOR_ID.to_le_bytes());

        let mut reader = WireReader::new(&bytes);
        let decoded: Sample = read_boxed(&mut reader).expect("read should succeed");
        assert_eq!(decoded, sample);
        assert_eq!(reader.offset(), bytes.len());
    }

    #[test]
    fn test_boxed_id_mismatch() {
        let mut writer = WireWriter::new();
        write_boxed(&Ping, &mut writer).expect("write should succeed");
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let err = read_boxed::<Sample>(&mut reader).unwrap_err();
        assert_eq!(
            err,
            WireError::UnexpectedConstructor {
                expected: Sample::CONSTRUCTOR_ID,
                found: Ping::CONSTRUCTOR_ID,
            }
        );
    }

    #[test]
    fn test_bare_vector_roundtrip() {
        let values = vec![1i32, -2, 3, i32::MAX];
        let mut writer = WireWriter::new();
        write_vector(&values, &mut writer).expect("write should succeed");
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..4], &4u32.to_le_bytes());
        assert_eq!(bytes.len(), 4 + 4 * 4);

        let mut reader = WireReader::new(&bytes);
        let decoded: Vec<i32> = read_vector(&mut reader).expect("read should succeed");
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_empty_vector_is_four_bytes() {
        let values: Vec<i32> = Vec::new();
        let mut writer = WireWriter::new();
        write_vector(&values, &mut writer).expect("write should succeed");
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0, 0, 0, 0]);

        let mut reader = WireReader::new(&bytes);
        let decoded: Vec<i32> = read_vector(&mut reader).expect("read should succeed");
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_boxed_vector_prefixes_every_element() {
        let pings = vec![Ping, Ping];
        let mut writer = WireWriter::new();
        write_boxed_vector(&pings, &mut writer).expect("write should succeed");
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 4 + 2 * 4);
        assert_eq!(&bytes[4..8], &Ping::CONSTRUCTOR_ID.to_le_bytes());
        assert_eq!(&bytes[8..12], &Ping::CONSTRUCTOR_ID.to_le_bytes());

        let mut reader = WireReader::new(&bytes);
        let decoded: Vec<Ping> = read_boxed_vector(&mut reader).expect("read should succeed");
        assert_eq!(decoded, pings);
    }

    #[test]
    fn test_vector_count_beyond_buffer() {
        let mut writer = WireWriter::new();
        writer.write_u32_le(1000);
        writer.write_i32_le(1);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        let err = read_vector::<i32>(&mut reader).unwrap_err();
        assert!(matches!(err, WireError::Truncated { .. }));
    }
}
