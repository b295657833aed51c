// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for suitestream-tree
//!
//! These tests use proptest to check that well-formed discovery streams are
//! delivered exactly once, in order, under the right file suite, and that
//! arbitrary streams never lose a spec.

use proptest::prelude::*;
use similar_asserts::assert_eq;
use suitestream_tree::{
    DiscoveryEvent, Location, LocationMap, MemorySink, SpecStarted, SuiteNode, SuiteStarted,
    TestNode, TreeBuilder, decode_chunk,
};

// ============================================================================
// Strategies
// ============================================================================

/// Shape of a source file's contents
#[derive(Debug, Clone)]
enum Item {
    Spec { pending: bool },
    Suite(Vec<Item>),
}

fn arbitrary_item() -> impl Strategy<Value = Item> {
    let leaf = any::<bool>().prop_map(|pending| Item::Spec { pending });
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Item::Suite)
    })
}

/// Files in discovery order, each with at least one top-level item
fn arbitrary_files() -> impl Strategy<Value = Vec<Vec<Item>>> {
    prop::collection::vec(prop::collection::vec(arbitrary_item(), 1..4), 1..6)
}

/// One step of an unconstrained event stream
#[derive(Debug, Clone)]
enum Op {
    Suite { file: Option<u8> },
    Spec { file: Option<u8> },
    Done,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::option::of(0u8..3).prop_map(|file| Op::Suite { file }),
        prop::option::of(0u8..3).prop_map(|file| Op::Spec { file }),
        Just(Op::Done),
    ]
}

// ============================================================================
// Stream generation
// ============================================================================

#[derive(Default)]
struct Stream {
    events: Vec<DiscoveryEvent>,
    locations: LocationMap,
    next_id: u32,
}

impl Stream {
    fn emit_items(&mut self, file: &str, prefix: &str, items: &[Item], parent: &mut SuiteNode) {
        for item in items {
            self.next_id += 1;
            let line = self.next_id;
            let location = Location::new(file, line);
            match item {
                Item::Spec { pending } => {
                    let id = format!("spec{line}");
                    let name = format!("{prefix}spec {line}");
                    let mut event = SpecStarted::new(id.as_str(), name.as_str(), name.as_str());
                    if *pending {
                        event = event.pending("xit");
                    }
                    self.locations.insert(id, location.clone());
                    self.events.push(event.into());

                    let mut test = TestNode::new(name.as_str(), name.as_str(), *pending);
                    test.set_location(&location);
                    parent.push_child(test);
                }
                Item::Suite(children) => {
                    let id = format!("suite{line}");
                    let name = format!("{prefix}suite {line}");
                    self.locations.insert(id.as_str(), location.clone());
                    self.events
                        .push(SuiteStarted::new(id.as_str(), name.as_str(), name.as_str()).into());

                    let mut suite = SuiteNode::new(name.as_str(), name.as_str());
                    suite.set_location(&location);
                    self.emit_items(file, &format!("{name} "), children, &mut suite);
                    parent.push_child(suite);

                    self.events.push(DiscoveryEvent::SuiteDone);
                }
            }
        }
    }
}

/// Build the event stream for `files` plus the file suites a receiver should see
fn generate(files: &[Vec<Item>]) -> (Stream, Vec<SuiteNode>) {
    let mut stream = Stream::default();
    let mut expected = Vec::new();
    for (index, items) in files.iter().enumerate() {
        let file = format!("spec/file{index}.spec.js");
        let mut file_suite = SuiteNode::file_suite(file.as_str());
        stream.emit_items(&file, "", items, &mut file_suite);
        expected.push(file_suite);
    }
    (stream, expected)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Well-formed streams come back exactly, one chunk per file, in order
    #[test]
    fn prop_well_formed_stream_round_trips(files in arbitrary_files()) {
        let (stream, expected) = generate(&files);

        let mut builder = TreeBuilder::new(stream.locations, MemorySink::new());
        {
            let mut guard = builder.flush_on_drop();
            for event in &stream.events {
                guard.process_event(event).expect("well-formed event");
            }
        }

        prop_assert_eq!(builder.stack().depth(), 1);
        prop_assert!(builder.diagnostics().is_empty());
        prop_assert_eq!(builder.report().unfiled, 0);

        let decoded: Vec<SuiteNode> = builder
            .sink()
            .chunks()
            .iter()
            .map(|chunk| decode_chunk(chunk).expect("decode"))
            .collect();
        prop_assert_eq!(decoded.len(), files.len());
        for (chunk, want) in decoded.iter().zip(&expected) {
            prop_assert!(chunk.is_file_suite);
            prop_assert_eq!(&chunk.id, &want.id);
            assert_eq!(chunk, want);
        }
    }

    /// No matter how the stream is shaped, every spec ends up somewhere
    #[test]
    fn prop_specs_are_never_lost(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let mut locations = LocationMap::new();
        let mut events: Vec<DiscoveryEvent> = Vec::new();
        for (index, op) in ops.iter().enumerate() {
            let id = format!("ev{index}");
            match op {
                Op::Suite { file } | Op::Spec { file } => {
                    if let Some(file) = file {
                        locations.insert(id.as_str(), Location::new(format!("f{file}.spec"), 1));
                    }
                    events.push(match op {
                        Op::Suite { .. } => SuiteStarted::new(id.as_str(), id.as_str(), id.as_str()).into(),
                        _ => SpecStarted::new(id.as_str(), id.as_str(), id.as_str()).into(),
                    });
                }
                Op::Done => events.push(DiscoveryEvent::SuiteDone),
            }
        }

        let mut builder = TreeBuilder::new(locations, MemorySink::new());
        for event in &events {
            // Unbalanced suite-done is rejected without touching the tree
            let _ = builder.process_event(event);
        }
        let report = builder.finish().expect("finish");

        let mut delivered = 0;
        for chunk in builder.sink().chunks() {
            let suite = decode_chunk(chunk).expect("decode");
            prop_assert!(suite.is_file_suite);
            delivered += suite.test_count();
        }
        let stack = builder.stack();
        let still_open: usize = stack.open_suites().iter().map(SuiteNode::test_count).sum();
        prop_assert!(!stack.has_file_suite());
        prop_assert_eq!(
            delivered + stack.root().test_count() + still_open,
            report.specs
        );
    }
}
