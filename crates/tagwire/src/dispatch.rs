// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level encode/decode entry points.
//!
//! This layer is stateless glue between the registry and the object codec:
//! it peeks the constructor ID, resolves the layout, and delegates. Decode
//! functions report bytes consumed so a caller holding several boxed values
//! back to back can keep reading from the same buffer.

use crate::config::DecodeLimits;
use crate::cursor::{WireReader, WireWriter};
use crate::error::WireResult;
use crate::registry::SchemaRegistry;
use crate::schema::codec;
use crate::schema::{ObjectValue, TypeDescriptor};
use std::sync::Arc;

/// Encode `obj` in a boxed position: 4-byte constructor ID, then the body.
pub fn encode(obj: &ObjectValue) -> WireResult<Vec<u8>> {
    let mut w = WireWriter::new();
    codec::write_object_boxed(obj, &mut w)?;
    Ok(w.into_bytes())
}

/// Encode `obj` without the ID prefix, for statically-typed positions.
pub fn encode_bare(obj: &ObjectValue) -> WireResult<Vec<u8>> {
    let mut w = WireWriter::new();
    codec::write_object_bare(obj, &mut w)?;
    Ok(w.into_bytes())
}

/// Decode one boxed value from the front of `buf`.
///
/// Returns the value and the number of bytes consumed. Trailing bytes are
/// left for the caller; an unknown constructor ID fails before any of them
/// are interpreted.
pub fn decode_boxed(buf: &[u8], registry: &SchemaRegistry) -> WireResult<(ObjectValue, usize)> {
    decode_boxed_with_limits(buf, registry, &DecodeLimits::default())
}

/// [`decode_boxed`] with caller-supplied resource limits.
pub fn decode_boxed_with_limits(
    buf: &[u8],
    registry: &SchemaRegistry,
    limits: &DecodeLimits,
) -> WireResult<(ObjectValue, usize)> {
    let mut r = WireReader::new(buf);
    let obj = codec::read_object_boxed(&mut r, registry, limits, 0)?;
    log::trace!(
        "decoded boxed {} ({} of {} bytes)",
        obj.type_name(),
        r.offset(),
        buf.len()
    );
    Ok((obj, r.offset()))
}

/// Decode one bare value of a statically-known layout from the front of `buf`.
pub fn decode_bare(
    buf: &[u8],
    descriptor: &Arc<TypeDescriptor>,
    registry: &SchemaRegistry,
) -> WireResult<(ObjectValue, usize)> {
    decode_bare_with_limits(buf, descriptor, registry, &DecodeLimits::default())
}

/// [`decode_bare`] with caller-supplied resource limits.
pub fn decode_bare_with_limits(
    buf: &[u8],
    descriptor: &Arc<TypeDescriptor>,
    registry: &SchemaRegistry,
    limits: &DecodeLimits,
) -> WireResult<(ObjectValue, usize)> {
    let mut r = WireReader::new(buf);
    let obj = codec::read_object_bare(&mut r, descriptor, registry, limits, 0)?;
    Ok((obj, r.offset()))
}
