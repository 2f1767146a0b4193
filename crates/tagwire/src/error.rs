// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types shared by the wire codec, schema layer, and registry.

use std::fmt;

/// Error raised by encode, decode, and registry construction.
///
/// Decode errors abort the entire enclosing decode: a shifted offset would
/// silently corrupt every subsequent field, so there is no partial recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Fewer bytes remain than the read requires.
    Truncated { need: usize, have: usize },
    /// A length prefix is inconsistent with the padding rules, the remaining
    /// buffer, or the representable range.
    MalformedLength { len: usize, reason: &'static str },
    /// A boxed value carried a constructor ID with no registered layout.
    UnknownConstructor { id: u32 },
    /// A boolean position held neither the `true` nor the `false` ID.
    InvalidBooleanConstructor { id: u32 },
    /// A boxed value of a statically-known type carried a different ID.
    UnexpectedConstructor { expected: u32, found: u32 },
    /// Two distinct field layouts claimed the same constructor ID.
    ///
    /// Raised at registry-build time only; it indicates a schema-definition
    /// bug and must abort initialization.
    DuplicateConstructor { id: u32 },
    /// A type descriptor violates the layout rules (duplicate bits, optional
    /// field before the flags word, and so on).
    InvalidSchema { reason: String },
    /// A required field was absent from the value being encoded.
    MissingField { type_name: String, field: String },
    /// A field value did not match its declared wire type.
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Nested decoding exceeded the configured depth limit.
    DepthLimitExceeded { limit: usize },
    /// A vector declared more elements than the configured limit.
    VectorTooLong { len: usize, limit: usize },
    /// A string field did not hold valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { need, have } => {
                write!(f, "truncated buffer: need {} bytes, have {}", need, have)
            }
            Self::MalformedLength { len, reason } => {
                write!(f, "malformed length {}: {}", len, reason)
            }
            Self::UnknownConstructor { id } => {
                write!(f, "unknown constructor {:#010x}", id)
            }
            Self::InvalidBooleanConstructor { id } => {
                write!(f, "invalid boolean constructor {:#010x}", id)
            }
            Self::UnexpectedConstructor { expected, found } => {
                write!(
                    f,
                    "unexpected constructor: expected {:#010x}, found {:#010x}",
                    expected, found
                )
            }
            Self::DuplicateConstructor { id } => {
                write!(f, "duplicate constructor registration {:#010x}", id)
            }
            Self::InvalidSchema { reason } => write!(f, "invalid schema: {}", reason),
            Self::MissingField { type_name, field } => {
                write!(f, "missing required field {}.{}", type_name, field)
            }
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "type mismatch on field {}: expected {}, found {}",
                    field, expected, found
                )
            }
            Self::DepthLimitExceeded { limit } => {
                write!(f, "nesting depth limit {} exceeded", limit)
            }
            Self::VectorTooLong { len, limit } => {
                write!(f, "vector length {} exceeds limit {}", len, limit)
            }
            Self::Utf8(e) => write!(f, "invalid UTF-8 in string: {}", e),
        }
    }
}

impl std::error::Error for WireError {}

impl From<std::string::FromUtf8Error> for WireError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

pub type WireResult<T> = core::result::Result<T, WireError>;
