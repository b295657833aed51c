// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Reassembling chunks on the receiving side
//!
//! One file can be delivered in several chunks when its events are not
//! contiguous in the stream, and a suite that was still open at a file
//! boundary shows up once per file it spans. [`TreeAssembler`] merges file
//! suites with the same id, and within them suites with the same id, keeping
//! first-seen order. Tests are never merged: repeated test ids are kept as
//! separate nodes.

use crate::chunk::{ChunkOptions, decode_chunk_with};
use crate::error::TreeError;
use crate::node::{SuiteNode, TreeNode};
use std::collections::HashMap;

/// Accumulates decoded chunks into one tree
#[derive(Debug, Clone)]
pub struct TreeAssembler {
    root: SuiteNode,
    files: HashMap<String, usize>,
    options: ChunkOptions,
    chunks: usize,
}

impl Default for TreeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeAssembler {
    /// Create an empty assembler
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: SuiteNode::root(),
            files: HashMap::new(),
            options: ChunkOptions::default(),
            chunks: 0,
        }
    }

    /// Use specific decoding options
    #[must_use]
    pub fn with_options(mut self, options: ChunkOptions) -> Self {
        self.options = options;
        self
    }

    /// Decode one encoded chunk and merge it
    ///
    /// # Errors
    ///
    /// Returns the decoding error; the assembled tree is unchanged.
    pub fn push_chunk(&mut self, chunk: &str) -> Result<(), TreeError> {
        let file_suite = decode_chunk_with(chunk, &self.options)?;
        self.push_file_suite(file_suite);
        Ok(())
    }

    /// Merge an already decoded file suite
    pub fn push_file_suite(&mut self, file_suite: SuiteNode) {
        self.chunks += 1;
        match self.files.get(&file_suite.id) {
            Some(&index) => {
                if let TreeNode::Suite(existing) = &mut self.root.children[index] {
                    merge_children(existing, file_suite.children);
                }
            }
            None => {
                self.files
                    .insert(file_suite.id.clone(), self.root.children.len());
                self.root.push_child(file_suite);
            }
        }
    }

    /// Number of chunks merged so far
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Number of distinct files seen
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The assembled tree so far
    #[must_use]
    pub fn root(&self) -> &SuiteNode {
        &self.root
    }

    /// Take the assembled tree
    #[must_use]
    pub fn into_root(self) -> SuiteNode {
        self.root
    }
}

fn merge_children(target: &mut SuiteNode, children: Vec<TreeNode>) {
    for child in children {
        match child {
            TreeNode::Suite(suite) => {
                let existing = target.children.iter_mut().find_map(|node| match node {
                    TreeNode::Suite(candidate) if candidate.id == suite.id => Some(candidate),
                    _ => None,
                });
                match existing {
                    Some(existing) => merge_children(existing, suite.children),
                    None => target.push_child(suite),
                }
            }
            test @ TreeNode::Test(_) => target.push_child(test),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::encode_chunk;
    use crate::node::TestNode;
    use similar_asserts::assert_eq;

    fn file_with(file: &str, suite: &str, tests: &[&str]) -> SuiteNode {
        let mut file_suite = SuiteNode::file_suite(file);
        let mut inner = SuiteNode::new(suite, suite);
        for test in tests {
            inner.push_child(TestNode::new(format!("{suite} {test}"), *test, false));
        }
        file_suite.push_child(inner);
        file_suite
    }

    #[test]
    fn test_distinct_files_keep_order() {
        let mut assembler = TreeAssembler::new();
        for suite in [file_with("b.spec", "B", &["x"]), file_with("a.spec", "A", &["y"])] {
            let chunk = encode_chunk(&suite).expect("encode");
            assembler.push_chunk(&chunk).expect("push");
        }

        let root = assembler.into_root();
        let ids: Vec<&str> = root.children.iter().map(TreeNode::id).collect();
        assert_eq!(ids, vec!["b.spec", "a.spec"]);
    }

    #[test]
    fn test_same_file_is_merged() {
        let mut assembler = TreeAssembler::new();
        assembler.push_file_suite(file_with("a.spec", "A", &["one"]));
        assembler.push_file_suite(file_with("b.spec", "B", &["two"]));
        assembler.push_file_suite(file_with("a.spec", "A", &["three"]));

        assert_eq!(assembler.chunk_count(), 3);
        assert_eq!(assembler.file_count(), 2);

        let root = assembler.root();
        let a = root.children[0].as_suite().expect("file suite");
        assert_eq!(a.children.len(), 1);
        let suite = a.children[0].as_suite().expect("suite A");
        let tests: Vec<&str> = suite.children.iter().map(TreeNode::label).collect();
        assert_eq!(tests, vec!["one", "three"]);
    }

    #[test]
    fn test_bad_chunk_leaves_tree_unchanged() {
        let mut assembler = TreeAssembler::new();
        assert!(assembler.push_chunk("not a chunk").is_err());
        assert_eq!(assembler.chunk_count(), 0);
        assert!(assembler.root().children.is_empty());
    }
}
