// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diagnostics and counters collected while streaming

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal problem noticed while building the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A spec had no entry in the location map
    MissingSpecLocation {
        /// Event id that was looked up
        id: String,
        /// Full name of the spec
        full_name: String,
    },
    /// A suite-done arrived with no real suite open and was ignored
    UnbalancedSuiteDone {
        /// Stack depth at the time
        depth: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpecLocation { id, full_name } => {
                write!(f, "Could not find location for spec '{full_name}' ({id})")
            }
            Self::UnbalancedSuiteDone { depth } => {
                write!(f, "Ignored suite-done with no open suite (depth {depth})")
            }
        }
    }
}

/// Summary of one discovery stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamReport {
    /// Suite-started events processed
    pub suites: usize,
    /// Spec-started events processed
    pub specs: usize,
    /// Specs reported as pending
    pub skipped: usize,
    /// Chunks handed to the sink
    pub chunks: usize,
    /// Specs delivered without a location
    pub missing_locations: usize,
    /// Nodes that closed with no file suite beneath them and were never emitted
    pub unfiled: usize,
}

impl StreamReport {
    /// Whether every spec was located and every node reached a chunk
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_locations == 0 && self.unfiled == 0
    }
}
