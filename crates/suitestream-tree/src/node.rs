// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Discovery tree node types
//!
//! The JSON shape matches what test-explorer hosts expect: every node carries a
//! `type` tag (`"suite"` or `"test"`), optional `file`/`line`, and suites list
//! their `children` in discovery order.

use crate::location::Location;
use serde::{Deserialize, Serialize};

/// Id of the synthetic root suite at the bottom of the suite stack
pub const ROOT_ID: &str = "root";

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node in the discovery tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    /// A suite or synthetic file suite
    Suite(SuiteNode),
    /// A single test case
    Test(TestNode),
}

impl TreeNode {
    /// Id of the wrapped node
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Suite(suite) => &suite.id,
            Self::Test(test) => &test.id,
        }
    }

    /// Display label of the wrapped node
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Suite(suite) => &suite.label,
            Self::Test(test) => &test.label,
        }
    }

    /// Borrow as a suite, if it is one
    #[must_use]
    pub fn as_suite(&self) -> Option<&SuiteNode> {
        match self {
            Self::Suite(suite) => Some(suite),
            Self::Test(_) => None,
        }
    }

    /// Borrow as a test, if it is one
    #[must_use]
    pub fn as_test(&self) -> Option<&TestNode> {
        match self {
            Self::Test(test) => Some(test),
            Self::Suite(_) => None,
        }
    }
}

impl From<SuiteNode> for TreeNode {
    fn from(suite: SuiteNode) -> Self {
        Self::Suite(suite)
    }
}

impl From<TestNode> for TreeNode {
    fn from(test: TestNode) -> Self {
        Self::Test(test)
    }
}

/// A named grouping of suites and tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteNode {
    /// Full qualified name, or the file path for file suites
    pub id: String,
    /// Display name
    pub label: String,
    /// Source file, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Source line, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Child nodes in discovery order
    #[serde(default)]
    pub children: Vec<TreeNode>,
    /// Set on the synthetic per-file wrappers used for chunking
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_file_suite: bool,
}

impl SuiteNode {
    /// Create a real suite with no location and no children
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            file: None,
            line: None,
            children: Vec::new(),
            is_file_suite: false,
        }
    }

    /// Create the synthetic root suite
    #[must_use]
    pub fn root() -> Self {
        Self::new(ROOT_ID, "")
    }

    /// Create the synthetic wrapper for everything discovered in `file`
    #[must_use]
    pub fn file_suite(file: impl Into<String>) -> Self {
        let file = file.into();
        Self {
            id: file.clone(),
            label: file.clone(),
            file: Some(file),
            line: None,
            children: Vec::new(),
            is_file_suite: true,
        }
    }

    /// Attach a source location
    pub fn set_location(&mut self, location: &Location) {
        self.file = Some(location.file.clone());
        self.line = Some(location.line);
    }

    /// Copy of this suite with the same identity and location but no children
    #[must_use]
    pub fn reopened(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            file: self.file.clone(),
            line: self.line,
            children: Vec::new(),
            is_file_suite: self.is_file_suite,
        }
    }

    /// Append a child, keeping discovery order
    pub fn push_child(&mut self, child: impl Into<TreeNode>) {
        self.children.push(child.into());
    }

    /// Number of tests anywhere below this suite
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                TreeNode::Suite(suite) => suite.test_count(),
                TreeNode::Test(_) => 1,
            })
            .sum()
    }

    /// Number of suites anywhere below this suite, not counting itself
    #[must_use]
    pub fn suite_count(&self) -> usize {
        self.children
            .iter()
            .filter_map(TreeNode::as_suite)
            .map(|suite| 1 + suite.suite_count())
            .sum()
    }
}

/// A single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    /// Full qualified name
    pub id: String,
    /// Display name
    pub label: String,
    /// Source file, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Source line, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Whether the framework reported the spec as pending or disabled
    #[serde(default)]
    pub skipped: bool,
}

impl TestNode {
    /// Create a test with no location
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, skipped: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            file: None,
            line: None,
            skipped,
        }
    }

    /// Attach a source location
    pub fn set_location(&mut self, location: &Location) {
        self.file = Some(location.file.clone());
        self.line = Some(location.line);
    }
}
