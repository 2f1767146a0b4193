// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor registry: the process-wide map from wire ID to type layout.
//!
//! The registry is assembled once during initialization, before any decode
//! traffic, and frozen into an immutable [`SchemaRegistry`]. Readers share it
//! by reference (or behind an `Arc`) with no further synchronization; there
//! is no global instance and no mutation after [`RegistryBuilder::build`].

use crate::cursor::WireReader;
use crate::error::{WireError, WireResult};
use crate::schema::{ObjectValue, TypeDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// Custom decode hook for a registered type.
///
/// The 4-byte constructor ID has already been consumed when the hook runs;
/// it reads the body and returns the finished value.
pub type DecodeFn = fn(&SchemaRegistry, &mut WireReader<'_>) -> WireResult<ObjectValue>;

/// One registered type: its layout plus an optional custom decoder.
#[derive(Debug, Clone)]
pub struct RegisteredType {
    descriptor: Arc<TypeDescriptor>,
    decoder: Option<DecodeFn>,
}

impl RegisteredType {
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    pub fn decoder(&self) -> Option<DecodeFn> {
        self.decoder
    }
}

/// Accumulates type registrations before the freeze.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: HashMap<u32, RegisteredType>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type layout under its constructor ID.
    ///
    /// Re-registering the identical layout is a no-op. A layout-distinct
    /// duplicate is a schema-definition bug: it fails here, at build time,
    /// and must abort initialization rather than surface during decode.
    pub fn register(&mut self, descriptor: Arc<TypeDescriptor>) -> WireResult<()> {
        self.insert(descriptor, None)
    }

    /// Register a type with a custom decode function.
    pub fn register_with_decoder(
        &mut self,
        descriptor: Arc<TypeDescriptor>,
        decoder: DecodeFn,
    ) -> WireResult<()> {
        self.insert(descriptor, Some(decoder))
    }

    fn insert(
        &mut self,
        descriptor: Arc<TypeDescriptor>,
        decoder: Option<DecodeFn>,
    ) -> WireResult<()> {
        descriptor.validate()?;
        let id = descriptor.constructor_id;
        if let Some(existing) = self.types.get(&id) {
            if *existing.descriptor == *descriptor && existing.decoder == decoder {
                return Ok(());
            }
            return Err(WireError::DuplicateConstructor { id });
        }
        self.types
            .insert(id, RegisteredType { descriptor, decoder });
        Ok(())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Freeze into the immutable read-side registry.
    pub fn build(self) -> SchemaRegistry {
        log::debug!("constructor registry frozen with {} types", self.types.len());
        SchemaRegistry { types: self.types }
    }
}

/// Immutable ID-to-layout table served to the dispatch layer.
#[derive(Debug)]
pub struct SchemaRegistry {
    types: HashMap<u32, RegisteredType>,
}

impl SchemaRegistry {
    /// Look up the registered type for a wire ID.
    pub fn resolve(&self, id: u32) -> WireResult<&RegisteredType> {
        self.types
            .get(&id)
            .ok_or(WireError::UnknownConstructor { id })
    }

    /// Layout lookup without the error wrapping, for tooling.
    pub fn descriptor(&self, id: u32) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(&id).map(RegisteredType::descriptor)
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.types.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
