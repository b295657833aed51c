// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Discovery event parsing
//!
//! Test frameworks report discovery as a flat sequence of lifecycle events.
//! On the wire each event is one JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"suiteStarted","id":"suite1","fullName":"Calculator","description":"Calculator"}
//! {"type":"specStarted","id":"spec0","fullName":"Calculator adds","description":"adds"}
//! {"type":"suiteDone"}
//! ```
//!
//! # Example
//!
//! ```no_run
//! use suitestream_tree::event::{parse_event, DiscoveryEvent};
//!
//! let event = parse_event(r#"{"type":"suiteDone"}"#).unwrap();
//! assert_eq!(event, Some(DiscoveryEvent::SuiteDone));
//! ```

use crate::error::TreeError;
use serde::{Deserialize, Serialize};

/// A single discovery lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DiscoveryEvent {
    /// A suite was entered
    SuiteStarted(SuiteStarted),
    /// The innermost open suite was left
    SuiteDone,
    /// A spec was discovered
    SpecStarted(SpecStarted),
}

/// Payload of a suite-started event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteStarted {
    /// Framework-assigned id, used for location lookup
    pub id: String,
    /// Full qualified name including ancestor suites
    pub full_name: String,
    /// The suite's own description
    pub description: String,
}

/// Payload of a spec-started event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecStarted {
    /// Framework-assigned id, used for location lookup
    pub id: String,
    /// Full qualified name including ancestor suites
    pub full_name: String,
    /// The spec's own description
    pub description: String,
    /// Why the spec is pending or disabled, if it is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_reason: Option<String>,
}

impl SuiteStarted {
    /// Create a suite-started payload
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            description: description.into(),
        }
    }
}

impl SpecStarted {
    /// Create a spec-started payload with no pending reason
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            description: description.into(),
            pending_reason: None,
        }
    }

    /// Mark the spec as pending
    #[must_use]
    pub fn pending(mut self, reason: impl Into<String>) -> Self {
        self.pending_reason = Some(reason.into());
        self
    }

    /// Whether the spec should be shown as skipped
    ///
    /// An empty reason does not count: frameworks send `""` for specs that
    /// are not pending.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.pending_reason
            .as_deref()
            .is_some_and(|reason| !reason.is_empty())
    }
}

impl From<SuiteStarted> for DiscoveryEvent {
    fn from(event: SuiteStarted) -> Self {
        Self::SuiteStarted(event)
    }
}

impl From<SpecStarted> for DiscoveryEvent {
    fn from(event: SpecStarted) -> Self {
        Self::SpecStarted(event)
    }
}

/// Parse a single event line
///
/// Blank lines yield `None`.
///
/// # Errors
///
/// Returns `TreeError::Json` if the line is not a valid event.
pub fn parse_event(line: &str) -> Result<Option<DiscoveryEvent>, TreeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some).map_err(TreeError::from)
}

/// Parse newline-delimited events
///
/// # Errors
///
/// Returns `TreeError::Json` if any non-blank line is invalid.
pub fn parse_events(output: &str) -> Result<Vec<DiscoveryEvent>, TreeError> {
    let mut events = Vec::new();
    for line in output.lines() {
        if let Some(event) = parse_event(line)? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_parse_suite_started() {
        let event = parse_event(
            r#"{"type":"suiteStarted","id":"suite1","fullName":"Calculator","description":"Calculator"}"#,
        )
        .expect("Should parse");

        assert_eq!(
            event,
            Some(DiscoveryEvent::SuiteStarted(SuiteStarted::new(
                "suite1",
                "Calculator",
                "Calculator"
            )))
        );
    }

    #[test]
    fn test_parse_spec_with_pending_reason() {
        let event = parse_event(
            r#"{"type":"specStarted","id":"spec3","fullName":"Calc divides","description":"divides","pendingReason":"not yet"}"#,
        )
        .expect("Should parse");

        match event {
            Some(DiscoveryEvent::SpecStarted(spec)) => {
                assert_eq!(spec.pending_reason.as_deref(), Some("not yet"));
                assert!(spec.is_skipped());
            }
            other => panic!("Expected spec event, got {other:?}"),
        }
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let event = parse_event(
            r#"{"type":"specStarted","id":"spec0","fullName":"a","description":"a","failedExpectations":[]}"#,
        )
        .expect("Should parse");
        assert!(matches!(event, Some(DiscoveryEvent::SpecStarted(_))));
    }

    #[test]
    fn test_empty_pending_reason_is_not_skipped() {
        let spec = SpecStarted::new("spec0", "a", "a").pending("");
        assert!(!spec.is_skipped());
        assert!(!SpecStarted::new("spec1", "b", "b").is_skipped());
    }

    #[test]
    fn test_parse_events_skips_blank_lines() {
        let output = r#"{"type":"suiteStarted","id":"suite1","fullName":"A","description":"A"}

{"type":"specStarted","id":"spec0","fullName":"A t","description":"t"}
{"type":"suiteDone"}
"#;
        let events = parse_events(output).expect("Should parse");
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], DiscoveryEvent::SuiteDone);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_event("not json").is_err());
        assert!(parse_event(r#"{"type":"suiteFinished"}"#).is_err());
        assert!(parse_event(r#"{"type":"specStarted","id":"x"}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let line = serde_json::to_string(&DiscoveryEvent::SuiteDone).expect("Should serialize");
        assert_eq!(line, r#"{"type":"suiteDone"}"#);
    }
}
