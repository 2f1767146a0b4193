// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for wire buffer manipulation.
//!
//! [`WireReader`] is a bounds-checked, zero-copy cursor over a received
//! buffer; [`WireWriter`] appends to a growable buffer. All fixed-width
//! integers use little-endian byte order on both sides.

use crate::error::{WireError, WireResult};

/// Generate little-endian read methods for fixed-width types.
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `WireError::Truncated` on underrun)
/// 2. Reads N bytes from the buffer
/// 3. Converts bytes to value via `from_le_bytes()`
/// 4. Advances the offset
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> WireResult<$type> {
            if self.offset + $size > self.buffer.len() {
                return Err(WireError::Truncated {
                    need: $size,
                    have: self.buffer.len() - self.offset,
                });
            }
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&self.buffer[self.offset..self.offset + $size]);
            self.offset += $size;
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Generate little-endian write methods for fixed-width types.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct WireReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_i64_le, i64, 8);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i128_le, i128, 16);

    pub fn read_f64_le(&mut self) -> WireResult<f64> {
        Ok(f64::from_bits(self.read_u64_le()?))
    }

    /// Read `len` raw bytes as a borrowed slice.
    pub fn read_raw(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(WireError::Truncated {
                need: len,
                have: self.buffer.len() - self.offset,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Peek the next 4 bytes as a little-endian u32 without advancing.
    pub fn peek_u32_le(&self) -> WireResult<u32> {
        if self.offset + 4 > self.buffer.len() {
            return Err(WireError::Truncated {
                need: 4,
                have: self.buffer.len() - self.offset,
            });
        }
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buffer[self.offset..self.offset + 4]);
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Append-only writer over a growable buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    buffer: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_i64_le, i64);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_i128_le, i128);

    pub fn write_f64_le(&mut self, value: f64) {
        self.write_u64_le(value.to_bits());
    }

    pub fn write_raw(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
