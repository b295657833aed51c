// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the tree builder
//!
//! Feeds arbitrary NDJSON lines through `TreeBuilder::process_line` with a
//! small location map, then checks every delivered chunk decodes.

#![no_main]

use libfuzzer_sys::fuzz_target;

use suitestream_tree::{Location, LocationMap, MemorySink, TreeBuilder, decode_chunk};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut locations = LocationMap::new();
        for (i, file) in ["a.spec", "b.spec", "a.spec"].iter().enumerate() {
            locations.insert(format!("suite{i}"), Location::new(*file, i as u32));
            locations.insert(format!("spec{i}"), Location::new(*file, 10 + i as u32));
        }

        let mut builder = TreeBuilder::new(locations, MemorySink::new());
        {
            let mut guard = builder.flush_on_drop();
            // Errors are fine, panics are not
            for line in input.lines() {
                let _ = guard.process_line(line);
            }
        }

        for chunk in builder.sink().chunks() {
            assert!(decode_chunk(chunk).is_ok());
        }
    }
});
