// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Exercise the length-prefixed byte-string decoder on raw input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tagwire::{primitives, WireReader};

fuzz_target!(|data: &[u8]| {
    let mut reader = WireReader::new(data);
    while let Ok(chunk) = primitives::read_bytes(&mut reader) {
        // A successful read must have consumed a 4-byte-aligned span.
        let _ = chunk;
        if reader.is_eof() {
            break;
        }
    }
});
