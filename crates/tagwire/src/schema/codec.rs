// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-driven encoding and decoding of object values.
//!
//! Encoding walks the declared field order, computing the flags word from
//! the optional fields actually present. Decoding reconstructs presence
//! purely from the flags bits read off the wire; it never infers absence
//! from sentinel values in the payload.

use crate::config::DecodeLimits;
use crate::cursor::{WireReader, WireWriter};
use crate::error::{WireError, WireResult};
use crate::flags::Flags;
use crate::primitives;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldType, ObjectValue, Presence, TypeDescriptor, Value};
use std::sync::Arc;

/// Write `obj` in a boxed position: constructor ID, then the bare body.
pub(crate) fn write_object_boxed(obj: &ObjectValue, w: &mut WireWriter) -> WireResult<()> {
    w.write_u32_le(obj.constructor_id());
    write_object_bare(obj, w)
}

/// Write `obj` without an ID prefix, fields in declared order.
pub(crate) fn write_object_bare(obj: &ObjectValue, w: &mut WireWriter) -> WireResult<()> {
    let desc = obj.descriptor();
    for (idx, field) in desc.fields.iter().enumerate() {
        if desc.flags_position == Some(idx) {
            w.write_u32_le(presence_flags(obj, desc).bits());
        }
        match field.presence {
            Presence::Required => {
                let value = obj.get(&field.name).ok_or_else(|| WireError::MissingField {
                    type_name: desc.name.clone(),
                    field: field.name.clone(),
                })?;
                write_value(value, &field.ty, &field.name, w)?;
            }
            Presence::Optional { .. } => {
                if let Some(value) = obj.get(&field.name) {
                    write_value(value, &field.ty, &field.name, w)?;
                }
            }
        }
    }
    // A trailing flags position (reserved flags, no fields after it)
    if desc.flags_position == Some(desc.fields.len()) {
        w.write_u32_le(presence_flags(obj, desc).bits());
    }
    Ok(())
}

/// Flags word for `obj`: the OR of every present optional field's bit.
fn presence_flags(obj: &ObjectValue, desc: &TypeDescriptor) -> Flags {
    let mut flags = Flags::EMPTY;
    for field in &desc.fields {
        if let Presence::Optional { bit } = field.presence {
            if obj.is_present(&field.name) {
                flags.insert(bit);
            }
        }
    }
    flags
}

fn write_value(
    value: &Value,
    ty: &FieldType,
    field_name: &str,
    w: &mut WireWriter,
) -> WireResult<()> {
    match (value, ty) {
        (Value::Int32(v), FieldType::Int32) => w.write_i32_le(*v),
        (Value::Int64(v), FieldType::Int64) => w.write_i64_le(*v),
        (Value::Int128(v), FieldType::Int128) => w.write_i128_le(*v),
        (Value::Int256(v), FieldType::Int256) => primitives::write_int256(w, *v),
        (Value::Double(v), FieldType::Double) => w.write_f64_le(*v),
        (Value::Bool(v), FieldType::Bool) => primitives::write_bool(w, *v),
        (Value::Bytes(v), FieldType::Bytes) => primitives::write_bytes(w, v)?,
        (Value::String(v), FieldType::String) => primitives::write_str(w, v)?,
        (Value::Vector(items), FieldType::Vector(element)) => {
            let count = u32::try_from(items.len()).map_err(|_| WireError::MalformedLength {
                len: items.len(),
                reason: "vector length exceeds u32",
            })?;
            w.write_u32_le(count);
            for item in items {
                write_value(item, element, field_name, w)?;
            }
        }
        (Value::Object(obj), FieldType::Object(desc)) => {
            if obj.constructor_id() != desc.constructor_id {
                return Err(WireError::TypeMismatch {
                    field: field_name.to_string(),
                    expected: "object",
                    found: "object",
                });
            }
            write_object_bare(obj, w)?;
        }
        (Value::Object(obj), FieldType::Boxed) => write_object_boxed(obj, w)?,
        (value, ty) => {
            return Err(WireError::TypeMismatch {
                field: field_name.to_string(),
                expected: ty.name(),
                found: value.type_name(),
            });
        }
    }
    Ok(())
}

/// Read a boxed object: constructor ID, registry lookup, then the body.
pub(crate) fn read_object_boxed(
    r: &mut WireReader<'_>,
    registry: &SchemaRegistry,
    limits: &DecodeLimits,
    depth: usize,
) -> WireResult<ObjectValue> {
    let id = r.read_u32_le()?;
    let entry = registry.resolve(id)?;
    log::trace!(
        "resolved constructor {:#010x} to type {}",
        id,
        entry.descriptor().name
    );
    if let Some(decode) = entry.decoder() {
        // Custom decoders own their body entirely, depth accounting included.
        return decode(registry, r);
    }
    read_object_bare(r, entry.descriptor(), registry, limits, depth)
}

/// Read a bare object against a statically-known layout.
pub(crate) fn read_object_bare(
    r: &mut WireReader<'_>,
    desc: &Arc<TypeDescriptor>,
    registry: &SchemaRegistry,
    limits: &DecodeLimits,
    depth: usize,
) -> WireResult<ObjectValue> {
    if depth >= limits.max_depth {
        return Err(WireError::DepthLimitExceeded {
            limit: limits.max_depth,
        });
    }

    let mut obj = ObjectValue::new(desc);
    let mut flags = Flags::EMPTY;
    for (idx, field) in desc.fields.iter().enumerate() {
        if desc.flags_position == Some(idx) {
            flags = Flags::from_bits(r.read_u32_le()?);
        }
        let present = match field.presence {
            Presence::Required => true,
            // Bits beyond the declared set are tolerated: presence is only
            // ever consulted per declared bit index.
            Presence::Optional { bit } => flags.contains(bit),
        };
        if !present {
            continue;
        }
        let value = read_value(r, &field.ty, registry, limits, depth)?;
        obj.insert_unchecked(field.name.clone(), value);
    }
    if desc.flags_position == Some(desc.fields.len()) {
        let _ = r.read_u32_le()?;
    }
    Ok(obj)
}

fn read_value(
    r: &mut WireReader<'_>,
    ty: &FieldType,
    registry: &SchemaRegistry,
    limits: &DecodeLimits,
    depth: usize,
) -> WireResult<Value> {
    Ok(match ty {
        FieldType::Int32 => Value::Int32(r.read_i32_le()?),
        FieldType::Int64 => Value::Int64(r.read_i64_le()?),
        FieldType::Int128 => Value::Int128(r.read_i128_le()?),
        FieldType::Int256 => Value::Int256(primitives::read_int256(r)?),
        FieldType::Double => Value::Double(r.read_f64_le()?),
        FieldType::Bool => Value::Bool(primitives::read_bool(r)?),
        FieldType::Bytes => Value::Bytes(primitives::read_bytes(r)?),
        FieldType::String => Value::String(primitives::read_str(r)?),
        FieldType::Vector(element) => {
            let count = r.read_u32_le()? as usize;
            if count > limits.max_vector_len {
                return Err(WireError::VectorTooLong {
                    len: count,
                    limit: limits.max_vector_len,
                });
            }
            // Reject counts that could never fit before allocating.
            let floor = count
                .checked_mul(element.min_wire_len())
                .unwrap_or(usize::MAX);
            if floor > r.remaining() {
                return Err(WireError::Truncated {
                    need: floor,
                    have: r.remaining(),
                });
            }
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(r, element, registry, limits, depth)?);
            }
            Value::Vector(items)
        }
        FieldType::Object(desc) => {
            Value::Object(read_object_bare(r, desc, registry, limits, depth + 1)?)
        }
        FieldType::Boxed => Value::Object(read_object_boxed(r, registry, limits, depth + 1)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use crate::schema::TypeDescriptorBuilder;

    fn message_descriptor() -> Arc<TypeDescriptor> {
        TypeDescriptorBuilder::new("message", 0xABCD_1234)
            .flags()
            .field("id", FieldType::Int32)
            .optional("text", FieldType::String, 0)
            .optional("views", FieldType::Int32, 3)
            .build_arc()
            .expect("layout should validate")
    }

    fn registry_with(descs: &[Arc<TypeDescriptor>]) -> SchemaRegistry {
        let mut builder = RegistryBuilder::new();
        for d in descs {
            builder.register(d.clone()).expect("register");
        }
        builder.build()
    }

    fn roundtrip(obj: &ObjectValue, registry: &SchemaRegistry) -> ObjectValue {
        let mut w = WireWriter::new();
        write_object_boxed(obj, &mut w).expect("encode should succeed");
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        let decoded = read_object_boxed(&mut r, registry, &DecodeLimits::default(), 0)
            .expect("decode should succeed");
        assert_eq!(r.offset(), bytes.len(), "decode must consume all bytes");
        decoded
    }

    #[test]
    fn test_flags_word_reflects_presence() {
        let desc = message_descriptor();
        let registry = registry_with(&[desc.clone()]);

        let bare = ObjectValue::new(&desc).with("id", 5i32).expect("set");
        let mut w = WireWriter::new();
        write_object_boxed(&bare, &mut w).expect("encode");
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &0u32.to_le_bytes(), "no optional bits set");

        let full = ObjectValue::new(&desc)
            .with("id", 5i32)
            .and_then(|o| o.with("text", "hey"))
            .and_then(|o| o.with("views", 9i32))
            .expect("set");
        let mut w = WireWriter::new();
        write_object_boxed(&full, &mut w).expect("encode");
        let bytes = w.into_bytes();
        let expected_flags = (1u32 << 0) | (1 << 3);
        assert_eq!(&bytes[4..8], &expected_flags.to_le_bytes());

        assert_eq!(roundtrip(&full, &registry), full);
        assert_eq!(roundtrip(&bare, &registry), bare);
    }

    #[test]
    fn test_absent_field_stays_absent() {
        let desc = message_descriptor();
        let registry = registry_with(&[desc.clone()]);
        let obj = ObjectValue::new(&desc)
            .with("id", 1i32)
            .and_then(|o| o.with("views", 0i32))
            .expect("set");

        let decoded = roundtrip(&obj, &registry);
        // A present zero is not an absent field
        assert_eq!(decoded.get_i32("views"), Some(0));
        assert!(!decoded.is_present("text"));
    }

    #[test]
    fn test_unknown_flag_bits_ignored() {
        let desc = message_descriptor();
        let registry = registry_with(&[desc.clone()]);

        let mut w = WireWriter::new();
        w.write_u32_le(desc.constructor_id);
        // Bits 0 and 3 are declared; 7 and 31 are from some newer revision
        w.write_u32_le((1 << 0) | (1 << 3) | (1 << 7) | (1 << 31));
        w.write_i32_le(11);
        primitives::write_str(&mut w, "ok").expect("write");
        w.write_i32_le(100);
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        let decoded = read_object_boxed(&mut r, &registry, &DecodeLimits::default(), 0)
            .expect("unknown bits must not fail decode");
        assert_eq!(decoded.get_i32("id"), Some(11));
        assert_eq!(decoded.get_str("text"), Some("ok"));
        assert_eq!(decoded.get_i32("views"), Some(100));
    }

    #[test]
    fn test_missing_required_field_fails_encode() {
        let desc = message_descriptor();
        let obj = ObjectValue::new(&desc);
        let mut w = WireWriter::new();
        let err = write_object_boxed(&obj, &mut w).unwrap_err();
        assert_eq!(
            err,
            WireError::MissingField {
                type_name: "message".into(),
                field: "id".into(),
            }
        );
    }

    #[test]
    fn test_nested_bare_and_boxed() {
        let point = TypeDescriptorBuilder::new("point", 0x0000_0002)
            .field("x", FieldType::Double)
            .field("y", FieldType::Double)
            .build_arc()
            .expect("layout");
        let wrapper = TypeDescriptorBuilder::new("wrapper", 0x0000_0003)
            .object("origin", point.clone())
            .boxed("payload")
            .build_arc()
            .expect("layout");
        let registry = registry_with(&[point.clone(), wrapper.clone(), message_descriptor()]);

        let origin = ObjectValue::new(&point)
            .with("x", 1.5f64)
            .and_then(|o| o.with("y", -2.5f64))
            .expect("set");
        let payload = ObjectValue::new(&message_descriptor())
            .with("id", 77i32)
            .expect("set");
        let obj = ObjectValue::new(&wrapper)
            .with("origin", origin)
            .and_then(|o| o.with("payload", payload))
            .expect("set");

        let decoded = roundtrip(&obj, &registry);
        assert_eq!(decoded.get_object("origin").and_then(|o| o.get_f64("x")), Some(1.5));
        assert_eq!(
            decoded.get_object("payload").and_then(|o| o.get_i32("id")),
            Some(77)
        );
    }

    #[test]
    fn test_vector_of_boxed_elements() {
        let desc = message_descriptor();
        let holder = TypeDescriptorBuilder::new("holder", 0x0000_0004)
            .vector("items", FieldType::Boxed)
            .build_arc()
            .expect("layout");
        let registry = registry_with(&[desc.clone(), holder.clone()]);

        let items: Vec<Value> = (0..3)
            .map(|i| {
                Value::Object(
                    ObjectValue::new(&desc)
                        .with("id", i as i32)
                        .expect("set"),
                )
            })
            .collect();
        let obj = ObjectValue::new(&holder).with("items", items).expect("set");

        let decoded = roundtrip(&obj, &registry);
        let decoded_items = decoded.get_vector("items").expect("items present");
        assert_eq!(decoded_items.len(), 3);
        assert_eq!(
            decoded_items[2].as_object().and_then(|o| o.get_i32("id")),
            Some(2)
        );
    }

    #[test]
    fn test_vector_count_limit() {
        let holder = TypeDescriptorBuilder::new("holder", 0x0000_0005)
            .vector("items", FieldType::Int32)
            .build_arc()
            .expect("layout");
        let registry = registry_with(&[holder.clone()]);

        let mut w = WireWriter::new();
        w.write_u32_le(holder.constructor_id);
        w.write_u32_le(1_000_000);
        let bytes = w.into_bytes();

        let limits = DecodeLimits::default().with_max_vector_len(64);
        let mut r = WireReader::new(&bytes);
        let err = read_object_boxed(&mut r, &registry, &limits, 0).unwrap_err();
        assert_eq!(
            err,
            WireError::VectorTooLong {
                len: 1_000_000,
                limit: 64,
            }
        );
    }

    #[test]
    fn test_vector_count_beyond_buffer() {
        let holder = TypeDescriptorBuilder::new("holder", 0x0000_0006)
            .vector("items", FieldType::Int32)
            .build_arc()
            .expect("layout");
        let registry = registry_with(&[holder.clone()]);

        let mut w = WireWriter::new();
        w.write_u32_le(holder.constructor_id);
        w.write_u32_le(100);
        w.write_i32_le(1);
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        let err = read_object_boxed(&mut r, &registry, &DecodeLimits::default(), 0).unwrap_err();
        assert!(matches!(err, WireError::Truncated { .. }));
    }

    #[test]
    fn test_depth_limit() {
        // node := flags, optional next: boxed
        let node = TypeDescriptorBuilder::new("node", 0x0000_0007)
            .flags()
            .optional("next", FieldType::Boxed, 0)
            .build_arc()
            .expect("layout");
        let registry = registry_with(&[node.clone()]);

        let mut chain = ObjectValue::new(&node);
        for _ in 0..10 {
            chain = ObjectValue::new(&node).with("next", chain).expect("set");
        }
        let mut w = WireWriter::new();
        write_object_boxed(&chain, &mut w).expect("encode");
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        let deep = read_object_boxed(&mut r, &registry, &DecodeLimits::default(), 0);
        assert!(deep.is_ok(), "ten levels fit the default limit");

        let limits = DecodeLimits::default().with_max_depth(4);
        let mut r = WireReader::new(&bytes);
        let err = read_object_boxed(&mut r, &registry, &limits, 0).unwrap_err();
        assert_eq!(err, WireError::DepthLimitExceeded { limit: 4 });
    }

    #[test]
    fn test_bare_nested_wrong_constructor_fails_encode() {
        let point = TypeDescriptorBuilder::new("point", 0x0000_0008)
            .field("x", FieldType::Double)
            .build_arc()
            .expect("layout");
        let other = TypeDescriptorBuilder::new("other", 0x0000_0009)
            .field("x", FieldType::Double)
            .build_arc()
            .expect("layout");
        let wrapper = TypeDescriptorBuilder::new("wrapper", 0x0000_000A)
            .object("p", point)
            .build_arc()
            .expect("layout");

        // Bypass set() validation to exercise the encoder's own check
        let mut obj = ObjectValue::new(&wrapper);
        let stray = ObjectValue::new(&other).with("x", 0.0f64).expect("set");
        obj.insert_unchecked("p".into(), Value::Object(stray));

        let mut w = WireWriter::new();
        let err = write_object_boxed(&obj, &mut w).unwrap_err();
        assert!(matches!(err, WireError::TypeMismatch { .. }));
    }
}
