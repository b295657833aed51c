// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The chain of currently open suites
//!
//! Layout, bottom to top: the synthetic root, at most one open file suite,
//! then the real suites that have started but not finished. Open suites are
//! owned by the stack and attached to their parent when they close, so a
//! node's children are complete by the time anything can serialize it.

use crate::error::TreeError;
use crate::node::SuiteNode;

/// Ordered chain of open suites above a synthetic root
#[derive(Debug, Clone)]
pub struct SuiteStack {
    root: SuiteNode,
    file: Option<SuiteNode>,
    open: Vec<SuiteNode>,
}

impl Default for SuiteStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteStack {
    /// Create a stack holding only the synthetic root
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: SuiteNode::root(),
            file: None,
            open: Vec::new(),
        }
    }

    /// Number of suites on the stack, root included; never zero
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + usize::from(self.file.is_some()) + self.open.len()
    }

    /// Whether a file suite is currently open
    #[must_use]
    pub fn has_file_suite(&self) -> bool {
        self.file.is_some()
    }

    /// The open file suite, if any
    #[must_use]
    pub fn file_suite(&self) -> Option<&SuiteNode> {
        self.file.as_ref()
    }

    /// Real suites that have started but not finished, outermost first
    #[must_use]
    pub fn open_suites(&self) -> &[SuiteNode] {
        &self.open
    }

    /// The synthetic root; holds whatever closed with no file suite beneath it
    #[must_use]
    pub fn root(&self) -> &SuiteNode {
        &self.root
    }

    /// The suite new children are attached to
    pub fn current_mut(&mut self) -> &mut SuiteNode {
        match (self.open.last_mut(), self.file.as_mut()) {
            (Some(suite), _) => suite,
            (None, Some(file)) => file,
            (None, None) => &mut self.root,
        }
    }

    /// Open a real suite
    pub fn push(&mut self, suite: SuiteNode) {
        self.open.push(suite);
    }

    /// Close the innermost real suite and attach it to its parent
    ///
    /// # Errors
    ///
    /// Returns `TreeError::UnbalancedSuiteDone` when no real suite is open;
    /// the root and the file suite are never popped this way and the stack
    /// is left unchanged.
    pub fn pop(&mut self) -> Result<(), TreeError> {
        let suite = self.open.pop().ok_or(TreeError::UnbalancedSuiteDone {
            depth: self.depth(),
        })?;
        self.current_mut().push_child(suite);
        Ok(())
    }

    /// Replace the open file suite with `next`
    ///
    /// Returns the previous file suite, completed with everything discovered
    /// so far. Real suites still open continue under `next`: when a previous
    /// file suite existed they are reopened as empty copies (their content
    /// so far belongs to the previous file); otherwise they move over intact.
    pub fn rotate(&mut self, next: SuiteNode) -> Option<SuiteNode> {
        let open = std::mem::take(&mut self.open);
        let previous = match self.file.take() {
            Some(mut file) => {
                self.open = open.iter().map(SuiteNode::reopened).collect();
                fold_into(&mut file, open);
                Some(file)
            }
            None => {
                self.open = open;
                None
            }
        };
        self.file = Some(next);
        previous
    }

    /// Take the open file suite, closing any real suites still open inside it
    pub fn close_file_suite(&mut self) -> Option<SuiteNode> {
        let mut file = self.file.take()?;
        fold_into(&mut file, std::mem::take(&mut self.open));
        Some(file)
    }
}

/// Attach an open chain (outermost first) to `base`, innermost closing first
fn fold_into(base: &mut SuiteNode, mut open: Vec<SuiteNode>) {
    while let Some(suite) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.push_child(suite),
            None => base.push_child(suite),
        }
    }
}
