// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagwire - schema-driven binary object serialization
//!
//! A compact wire codec plus a polymorphic type registry: deeply nested,
//! mutually recursive object graphs are encoded to an exact byte format and
//! decoded back by resolving the 32-bit constructor ID embedded in the
//! stream. The schema evolves additively: a new field layout gets a new ID,
//! and old IDs keep decoding per their original layout forever.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagwire::{
//!     decode_boxed, encode, FieldType, ObjectValue, RegistryBuilder,
//!     TypeDescriptorBuilder, WireResult,
//! };
//!
//! fn main() -> WireResult<()> {
//!     // Describe a type: required id, optional caption at flag bit 0
//!     let photo = TypeDescriptorBuilder::new("photo", 0x89AE_1204)
//!         .flags()
//!         .field("id", FieldType::Int64)
//!         .optional("caption", FieldType::String, 0)
//!         .build_arc()?;
//!
//!     // Build the registry once, before any decode traffic
//!     let mut builder = RegistryBuilder::new();
//!     builder.register(photo.clone())?;
//!     let registry = builder.build();
//!
//!     // Encode a value, decode it back
//!     let original = ObjectValue::new(&photo)
//!         .with("id", 7i64)?
//!         .with("caption", "sunset")?;
//!     let bytes = encode(&original)?;
//!     let (decoded, consumed) = decode_boxed(&bytes, &registry)?;
//!
//!     assert_eq!(consumed, bytes.len());
//!     assert_eq!(decoded, original);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                        Dispatch Layer                            |
//! |     encode / decode_boxed / decode_bare  (bytes consumed)        |
//! +------------------------------------------------------------------+
//! |   Constructor Registry        |        Schema Codec              |
//! |   ID -> layout (+ decoder)    |  descriptors, values, flags      |
//! +------------------------------------------------------------------+
//! |                       Object Contract                            |
//! |      WireEncode / WireDecode / Constructor, vector helpers       |
//! +------------------------------------------------------------------+
//! |                       Primitive Codec                            |
//! |   LE scalars | padded byte strings | boolean IDs | cursors       |
//! +------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeDescriptor`] | Runtime layout of one schema-defined type |
//! | [`ObjectValue`] | Decoded object instance with typed field access |
//! | [`SchemaRegistry`] | Frozen constructor-ID lookup table |
//! | [`WireReader`] / [`WireWriter`] | Bounds-checked little-endian cursors |
//! | [`DecodeLimits`] | Depth and vector bounds for untrusted input |
//!
//! ## Modules Overview
//!
//! - [`dispatch`] - top-level encode/decode entry points (start here)
//! - [`schema`] - descriptors, builders, object values, flags protocol
//! - [`registry`] - build-once, read-everywhere constructor table
//! - [`object`] - the contract implemented by statically-typed values
//! - [`primitives`] - byte strings, booleans, 256-bit integers
//! - [`cursor`] - raw little-endian buffer access

/// Decode-side resource limits.
pub mod config;
/// Read/write cursors over wire buffers.
pub mod cursor;
/// Top-level encode/decode entry points.
pub mod dispatch;
/// Error taxonomy shared across the crate.
pub mod error;
/// Optional-field presence bitmask.
pub mod flags;
/// Bare/boxed contract for statically-typed values.
pub mod object;
/// Primitive scalar and byte-string codec.
pub mod primitives;
/// Constructor-ID registry.
pub mod registry;
/// Runtime schema descriptors, values, and codec.
pub mod schema;

pub use config::DecodeLimits;
pub use cursor::{WireReader, WireWriter};
pub use dispatch::{
    decode_bare, decode_bare_with_limits, decode_boxed, decode_boxed_with_limits, encode,
    encode_bare,
};
pub use error::{WireError, WireResult};
pub use flags::Flags;
pub use object::{Constructor, WireDecode, WireEncode};
pub use primitives::{Int256, BOOL_FALSE_ID, BOOL_TRUE_ID};
pub use registry::{DecodeFn, RegisteredType, RegistryBuilder, SchemaRegistry};
pub use schema::{
    FieldSpec, FieldType, ObjectValue, Presence, TypeDescriptor, TypeDescriptorBuilder, Value,
};
