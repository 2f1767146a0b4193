// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::error::WireResult;
use crate::schema::{FieldSpec, FieldType, TypeDescriptor};
use std::sync::Arc;

/// Builder for creating validated [`TypeDescriptor`] instances.
///
/// Fields accumulate in declaration order; [`flags`](Self::flags) marks where
/// the 32-bit flags word sits relative to them. `build()` runs the full
/// layout validation, so an invalid schema never reaches the codec.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    constructor_id: u32,
    flags_position: Option<usize>,
    fields: Vec<FieldSpec>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for the type registered under `constructor_id`.
    pub fn new(name: impl Into<String>, constructor_id: u32) -> Self {
        Self {
            name: name.into(),
            constructor_id,
            flags_position: None,
            fields: Vec::new(),
        }
    }

    /// Place the flags word after the fields declared so far.
    pub fn flags(mut self) -> Self {
        self.flags_position = Some(self.fields.len());
        self
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec::required(name, ty));
        self
    }

    /// Add an optional field whose presence is controlled by `bit`.
    pub fn optional(mut self, name: impl Into<String>, ty: FieldType, bit: u8) -> Self {
        self.fields.push(FieldSpec::optional(name, ty, bit));
        self
    }

    /// Add a required vector field.
    pub fn vector(self, name: impl Into<String>, element: FieldType) -> Self {
        self.field(name, FieldType::Vector(Box::new(element)))
    }

    /// Add a required bare nested field with a statically-known layout.
    pub fn object(self, name: impl Into<String>, nested: Arc<TypeDescriptor>) -> Self {
        self.field(name, FieldType::Object(nested))
    }

    /// Add a required polymorphic field, resolved via the registry.
    pub fn boxed(self, name: impl Into<String>) -> Self {
        self.field(name, FieldType::Boxed)
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> WireResult<TypeDescriptor> {
        let descriptor = TypeDescriptor::new(
            self.name,
            self.constructor_id,
            self.flags_position,
            self.fields,
        );
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Validate and build, wrapped for nesting into other descriptors.
    pub fn build_arc(self) -> WireResult<Arc<TypeDescriptor>> {
        Ok(Arc::new(self.build()?))
    }
}
