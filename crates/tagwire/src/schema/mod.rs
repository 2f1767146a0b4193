// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime schema layer: type descriptors, object values, and the
//! descriptor-driven codec.
//!
//! # Example
//!
//! ```rust
//! use tagwire::schema::{FieldType, ObjectValue, TypeDescriptorBuilder};
//!
//! let descriptor = TypeDescriptorBuilder::new("sensor_reading", 0x51A7_E001)
//!     .flags()
//!     .field("sensor_id", FieldType::Int32)
//!     .field("temperature", FieldType::Double)
//!     .optional("label", FieldType::String, 0)
//!     .build_arc()
//!     .unwrap();
//!
//! let mut reading = ObjectValue::new(&descriptor);
//! reading.set("sensor_id", 42i32).unwrap();
//! reading.set("temperature", 23.5f64).unwrap();
//!
//! assert_eq!(reading.get_f64("temperature"), Some(23.5));
//! assert!(!reading.is_present("label"));
//! ```

mod builder;
pub(crate) mod codec;
mod descriptor;
mod value;

pub use builder::TypeDescriptorBuilder;
pub use descriptor::{FieldSpec, FieldType, Presence, TypeDescriptor};
pub use value::{ObjectValue, Value};
