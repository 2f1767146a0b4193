// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the runtime description of a schema-defined type.

use crate::error::{WireError, WireResult};
use std::sync::Arc;

/// Wire type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Int32,
    Int64,
    Int128,
    Int256,
    Double,
    Bool,
    Bytes,
    String,
    /// Homogeneous sequence; element kind fixed at schema-definition time.
    Vector(Box<FieldType>),
    /// Nested object of a statically-known layout, written without ID prefix.
    Object(Arc<TypeDescriptor>),
    /// Polymorphic nested object, written with its 4-byte constructor ID and
    /// resolved through the registry at decode time.
    Boxed,
}

impl FieldType {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Int128 => "int128",
            Self::Int256 => "int256",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Vector(_) => "vector",
            Self::Object(_) => "object",
            Self::Boxed => "boxed",
        }
    }

    /// Smallest number of bytes any value of this type can occupy.
    ///
    /// Used to reject vector counts that could never fit the remaining
    /// buffer before allocating.
    pub fn min_wire_len(&self) -> usize {
        match self {
            Self::Int32 | Self::Bool => 4,
            Self::Int64 | Self::Double => 8,
            Self::Int128 => 16,
            Self::Int256 => 32,
            // One length byte padded to the 4-byte boundary
            Self::Bytes | Self::String => 4,
            // The element count alone
            Self::Vector(_) => 4,
            // The constructor ID alone
            Self::Boxed => 4,
            Self::Object(desc) => desc.min_wire_len(),
        }
    }
}

/// Whether a field is always present or controlled by a flags-word bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional { bit: u8 },
}

/// One named slot in a type's ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            presence: Presence::Required,
        }
    }

    pub fn optional(name: impl Into<String>, ty: FieldType, bit: u8) -> Self {
        Self {
            name: name.into(),
            ty,
            presence: Presence::Optional { bit },
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.presence, Presence::Optional { .. })
    }
}

/// Complete layout of one schema-defined type.
///
/// The constructor ID is globally unique across the schema and never reused
/// for a different field layout; changing a layout means allocating a new ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub name: String,
    pub constructor_id: u32,
    /// Field index before which the 32-bit flags word is written, if the
    /// type carries one. Every optional field must sit at or after it.
    pub flags_position: Option<usize>,
    pub fields: Vec<FieldSpec>,
}

impl TypeDescriptor {
    pub fn new(
        name: impl Into<String>,
        constructor_id: u32,
        flags_position: Option<usize>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            constructor_id,
            flags_position,
            fields,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn has_optional_fields(&self) -> bool {
        self.fields.iter().any(FieldSpec::is_optional)
    }

    /// Smallest number of bytes any value of this layout can occupy.
    pub fn min_wire_len(&self) -> usize {
        let flags = if self.flags_position.is_some() { 4 } else { 0 };
        flags
            + self
                .fields
                .iter()
                .filter(|f| !f.is_optional())
                .map(|f| f.ty.min_wire_len())
                .sum::<usize>()
    }

    /// Check the layout rules that make a descriptor encodable.
    ///
    /// Violations are schema-definition bugs, reported at build time rather
    /// than surfacing as decode failures later.
    pub fn validate(&self) -> WireResult<()> {
        if let Some(pos) = self.flags_position {
            if pos > self.fields.len() {
                return Err(WireError::InvalidSchema {
                    reason: format!(
                        "{}: flags position {} is past the last field",
                        self.name, pos
                    ),
                });
            }
        }

        let mut seen_bits = 0u32;
        for (idx, field) in self.fields.iter().enumerate() {
            if self.fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(WireError::InvalidSchema {
                    reason: format!("{}: duplicate field name {}", self.name, field.name),
                });
            }
            if let Presence::Optional { bit } = field.presence {
                if bit >= 32 {
                    return Err(WireError::InvalidSchema {
                        reason: format!(
                            "{}.{}: flag bit {} out of range",
                            self.name, field.name, bit
                        ),
                    });
                }
                if seen_bits & (1 << bit) != 0 {
                    return Err(WireError::InvalidSchema {
                        reason: format!(
                            "{}.{}: flag bit {} already assigned",
                            self.name, field.name, bit
                        ),
                    });
                }
                seen_bits |= 1 << bit;
                match self.flags_position {
                    None => {
                        return Err(WireError::InvalidSchema {
                            reason: format!(
                                "{}: optional field {} without a flags word",
                                self.name, field.name
                            ),
                        });
                    }
                    Some(pos) if idx < pos => {
                        return Err(WireError::InvalidSchema {
                            reason: format!(
                                "{}: optional field {} precedes the flags word",
                                self.name, field.name
                            ),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
