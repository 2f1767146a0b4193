// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Feed arbitrary bytes to the boxed decoder against a representative
//! registry. Any outcome but a clean value or a clean error is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use tagwire::{
    decode_boxed_with_limits, DecodeLimits, FieldType, RegistryBuilder, SchemaRegistry,
    TypeDescriptorBuilder,
};

fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let point = TypeDescriptorBuilder::new("point", 0x0000_0001)
            .field("x", FieldType::Double)
            .field("y", FieldType::Double)
            .build_arc()
            .expect("layout should validate");
        let note = TypeDescriptorBuilder::new("note", 0x0000_0002)
            .flags()
            .field("id", FieldType::Int64)
            .optional("text", FieldType::String, 0)
            .optional("data", FieldType::Bytes, 1)
            .optional("seen", FieldType::Bool, 2)
            .build_arc()
            .expect("layout should validate");
        let bundle = TypeDescriptorBuilder::new("bundle", 0x0000_0003)
            .field("checksum", FieldType::Int256)
            .object("origin", point.clone())
            .vector("notes", FieldType::Boxed)
            .vector("raw", FieldType::Bytes)
            .build_arc()
            .expect("layout should validate");

        let mut builder = RegistryBuilder::new();
        builder.register(point).expect("register");
        builder.register(note).expect("register");
        builder.register(bundle).expect("register");
        builder.build()
    })
}

fuzz_target!(|data: &[u8]| {
    let limits = DecodeLimits::default()
        .with_max_depth(32)
        .with_max_vector_len(1 << 16);
    let _ = decode_boxed_with_limits(data, registry(), &limits);
});
