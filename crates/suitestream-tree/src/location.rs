// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Source locations for discovery events
//!
//! Locations are resolved ahead of time by whatever instruments the test
//! framework and handed over as a read-only map from event id to
//! `(file, line)`.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a suite or spec declaration in a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source file
    pub file: String,
    /// Line of the declaration
    pub line: u32,
}

impl Location {
    /// Create a location
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Lookup table from event id to location
///
/// Not every id needs an entry; callers treat a miss as "location unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationMap {
    entries: HashMap<String, Location>,
}

impl LocationMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of the form `{"<id>": {"file": "...", "line": N}}`
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Json` if the JSON is invalid or an entry is malformed.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        serde_json::from_str(json).map_err(TreeError::from)
    }

    /// Record the location of an event id, replacing any previous entry
    pub fn insert(&mut self, id: impl Into<String>, location: Location) {
        self.entries.insert(id.into(), location);
    }

    /// Look up the location of an event id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.entries.get(id)
    }

    /// Number of known locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Location)> for LocationMap {
    fn from_iter<I: IntoIterator<Item = (String, Location)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
