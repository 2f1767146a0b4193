// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoded object values.
//!
//! An [`ObjectValue`] owns all of its field data; absent optional fields are
//! simply not stored, which keeps "no value" distinct from any zero default.

use crate::error::{WireError, WireResult};
use crate::primitives::Int256;
use crate::schema::{FieldType, TypeDescriptor};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A field value of any wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(Int256),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    Vector(Vec<Value>),
    Object(ObjectValue),
}

impl Value {
    /// Short name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Int128(_) => "int128",
            Self::Int256(_) => "int256",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Vector(_) => "vector",
            Self::Object(_) => "object",
        }
    }

    /// Whether this value can occupy a slot of the given wire type.
    pub(crate) fn matches(&self, ty: &FieldType) -> bool {
        match (self, ty) {
            (Self::Int32(_), FieldType::Int32)
            | (Self::Int64(_), FieldType::Int64)
            | (Self::Int128(_), FieldType::Int128)
            | (Self::Int256(_), FieldType::Int256)
            | (Self::Double(_), FieldType::Double)
            | (Self::Bool(_), FieldType::Bool)
            | (Self::Bytes(_), FieldType::Bytes)
            | (Self::String(_), FieldType::String)
            | (Self::Vector(_), FieldType::Vector(_))
            | (Self::Object(_), FieldType::Boxed) => true,
            (Self::Object(obj), FieldType::Object(desc)) => {
                obj.constructor_id() == desc.constructor_id
            }
            _ => false,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int128(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int256(&self) -> Option<Int256> {
        match self {
            Self::Int256(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Self::Int128(v)
    }
}

impl From<Int256> for Value {
    fn from(v: Int256) -> Self {
        Self::Int256(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Vector(v)
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Self::Object(v)
    }
}

/// A decoded (or to-be-encoded) instance of one schema-defined type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    descriptor: Arc<TypeDescriptor>,
    fields: BTreeMap<String, Value>,
}

impl ObjectValue {
    /// Create an instance with every field absent.
    pub fn new(descriptor: &Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor: Arc::clone(descriptor),
            fields: BTreeMap::new(),
        }
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn constructor_id(&self) -> u32 {
        self.descriptor.constructor_id
    }

    /// Set a field, validating the name and wire type against the layout.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> WireResult<()> {
        let value = value.into();
        let field = self
            .descriptor
            .field(name)
            .ok_or_else(|| WireError::InvalidSchema {
                reason: format!("{} has no field {}", self.descriptor.name, name),
            })?;
        if !value.matches(&field.ty) {
            return Err(WireError::TypeMismatch {
                field: name.to_string(),
                expected: field.ty.name(),
                found: value.type_name(),
            });
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Chained [`set`](Self::set) for literal construction.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> WireResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Remove a field value, leaving it absent.
    pub fn clear(&mut self, name: &str) {
        self.fields.remove(name);
    }

    /// Insert without layout validation. Decode-side only: the value was
    /// just read against the descriptor, so it matches by construction.
    pub(crate) fn insert_unchecked(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(Value::as_i32)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_i128(&self, name: &str) -> Option<i128> {
        self.get(name).and_then(Value::as_i128)
    }

    pub fn get_int256(&self, name: &str) -> Option<Int256> {
        self.get(name).and_then(Value::as_int256)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(Value::as_bytes)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_vector(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_vector)
    }

    pub fn get_object(&self, name: &str) -> Option<&ObjectValue> {
        self.get(name).and_then(Value::as_object)
    }
}
