// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! suitestream-tree: streaming test-discovery trees
//!
//! This library crate turns the flat sequence of discovery events a test
//! framework emits (suite started, spec started, suite done) into a tree of
//! suites and tests annotated with source locations, and streams that tree
//! one source file at a time as compressed, base64-encoded chunks.
//!
//! # Example
//!
//! ```no_run
//! use suitestream_tree::{LocationMap, MemorySink, TreeBuilder, TreeAssembler};
//!
//! let locations = LocationMap::from_json(r#"{"spec0": {"file": "a.spec", "line": 3}}"#).unwrap();
//! let mut builder = TreeBuilder::new(locations, MemorySink::new());
//! {
//!     // Flushes the last file even if processing bails out early
//!     let mut guard = builder.flush_on_drop();
//!     guard
//!         .process_line(r#"{"type":"specStarted","id":"spec0","fullName":"adds","description":"adds"}"#)
//!         .unwrap();
//! }
//!
//! let mut assembler = TreeAssembler::new();
//! for chunk in builder.sink().chunks() {
//!     assembler.push_chunk(chunk).unwrap();
//! }
//! assert_eq!(assembler.file_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod assemble;
pub mod builder;
pub mod chunk;
pub mod error;
pub mod event;
pub mod guard;
pub mod location;
pub mod node;
pub mod report;
pub mod sink;
pub mod stack;

pub use assemble::TreeAssembler;
pub use builder::TreeBuilder;
pub use chunk::{ChunkOptions, decode_chunk, encode_chunk};
pub use error::TreeError;
pub use event::{DiscoveryEvent, SpecStarted, SuiteStarted, parse_event, parse_events};
pub use guard::FlushGuard;
pub use location::{Location, LocationMap};
pub use node::{SuiteNode, TestNode, TreeNode};
pub use report::{Diagnostic, StreamReport};
pub use sink::{ChunkSink, MemorySink, WriterSink};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::TreeBuilder;
    pub use crate::error::TreeError;
    pub use crate::event::DiscoveryEvent;
    pub use crate::location::{Location, LocationMap};
    pub use crate::sink::{ChunkSink, MemorySink};
}
