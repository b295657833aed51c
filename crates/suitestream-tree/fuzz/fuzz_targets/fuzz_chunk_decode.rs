// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for chunk decoding
//!
//! Arbitrary text must decode or fail cleanly, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use suitestream_tree::TreeAssembler;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut assembler = TreeAssembler::new();
        for line in input.lines() {
            let _ = assembler.push_chunk(line);
        }
        let _ = assembler.into_root();
    }
});
