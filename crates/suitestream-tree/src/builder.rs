// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Incremental discovery tree builder
//!
//! [`TreeBuilder`] consumes discovery events in order, nests suites and specs
//! under the suite that is open when they start, and wraps everything found in
//! one source file in a synthetic file suite. When the stream moves on to a
//! different file, the previous file suite is encoded and delivered to the
//! sink as one chunk. The last file suite is delivered by [`TreeBuilder::flush`],
//! which callers arrange to run however the stream ends (see
//! [`crate::guard::FlushGuard`]).
//!
//! # Example
//!
//! ```no_run
//! use suitestream_tree::builder::TreeBuilder;
//! use suitestream_tree::event::SpecStarted;
//! use suitestream_tree::location::{Location, LocationMap};
//! use suitestream_tree::sink::MemorySink;
//!
//! let mut locations = LocationMap::new();
//! locations.insert("spec0", Location::new("a.spec", 3));
//!
//! let mut builder = TreeBuilder::new(locations, MemorySink::new());
//! builder.on_spec_started(&SpecStarted::new("spec0", "adds", "adds")).unwrap();
//! builder.flush().unwrap();
//! assert_eq!(builder.sink().chunks().len(), 1);
//! ```

use crate::chunk::{ChunkOptions, encode_chunk_with};
use crate::error::TreeError;
use crate::event::{DiscoveryEvent, SpecStarted, SuiteStarted, parse_event};
use crate::location::{Location, LocationMap};
use crate::node::{SuiteNode, TestNode};
use crate::report::{Diagnostic, StreamReport};
use crate::sink::ChunkSink;
use crate::stack::SuiteStack;
use tracing::{debug, info, warn};

/// Builds the discovery tree and streams it to a sink one file at a time
pub struct TreeBuilder<S: ChunkSink> {
    locations: LocationMap,
    sink: S,
    options: ChunkOptions,
    stack: SuiteStack,
    current_file: Option<String>,
    diagnostics: Vec<Diagnostic>,
    report: StreamReport,
}

impl<S: ChunkSink> TreeBuilder<S> {
    /// Create a builder that resolves locations from `locations` and delivers
    /// chunks to `sink`
    #[must_use]
    pub fn new(locations: LocationMap, sink: S) -> Self {
        Self {
            locations,
            sink,
            options: ChunkOptions::default(),
            stack: SuiteStack::new(),
            current_file: None,
            diagnostics: Vec::new(),
            report: StreamReport::default(),
        }
    }

    /// Use specific chunk encoding options
    #[must_use]
    pub fn with_options(mut self, options: ChunkOptions) -> Self {
        self.options = options;
        self
    }

    /// Handle a suite-started event
    ///
    /// A located suite that begins a new file is filed under the new file
    /// suite, not the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if crossing a file boundary fails to deliver the
    /// previous file's chunk.
    pub fn on_suite_started(&mut self, event: &SuiteStarted) -> Result<(), TreeError> {
        let mut suite = SuiteNode::new(event.full_name.as_str(), event.description.as_str());

        if let Some(location) = self.locations.get(&event.id).cloned() {
            self.process_current_location(&location)?;
            suite.set_location(&location);
        }

        self.stack.push(suite);
        self.report.suites += 1;
        Ok(())
    }

    /// Handle a suite-done event
    ///
    /// # Errors
    ///
    /// Returns `TreeError::UnbalancedSuiteDone` when no real suite is open.
    /// That means the stream has more suite-done than suite-started events;
    /// the stack is left untouched and callers should stop feeding events.
    pub fn on_suite_done(&mut self) -> Result<(), TreeError> {
        self.stack.pop().inspect_err(|_| {
            let diagnostic = Diagnostic::UnbalancedSuiteDone {
                depth: self.stack.depth(),
            };
            warn!("{diagnostic}");
            self.diagnostics.push(diagnostic);
        })
    }

    /// Handle a spec-started event
    ///
    /// A spec with no known location is still attached to the open suite,
    /// just without `file`/`line`, and a diagnostic is recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if crossing a file boundary fails to deliver the
    /// previous file's chunk.
    pub fn on_spec_started(&mut self, event: &SpecStarted) -> Result<(), TreeError> {
        let mut test = TestNode::new(
            event.full_name.as_str(),
            event.description.as_str(),
            event.is_skipped(),
        );

        match self.locations.get(&event.id).cloned() {
            Some(location) => {
                self.process_current_location(&location)?;
                test.set_location(&location);
            }
            None => {
                let diagnostic = Diagnostic::MissingSpecLocation {
                    id: event.id.clone(),
                    full_name: event.full_name.clone(),
                };
                warn!("{diagnostic}");
                self.diagnostics.push(diagnostic);
                self.report.missing_locations += 1;
            }
        }

        if test.skipped {
            self.report.skipped += 1;
        }
        self.report.specs += 1;
        self.stack.current_mut().push_child(test);
        Ok(())
    }

    /// Dispatch any discovery event
    ///
    /// # Errors
    ///
    /// See the individual `on_*` handlers.
    pub fn process_event(&mut self, event: &DiscoveryEvent) -> Result<(), TreeError> {
        match event {
            DiscoveryEvent::SuiteStarted(suite) => self.on_suite_started(suite),
            DiscoveryEvent::SuiteDone => self.on_suite_done(),
            DiscoveryEvent::SpecStarted(spec) => self.on_spec_started(spec),
        }
    }

    /// Parse and dispatch one NDJSON event line; blank lines are ignored
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Json` for an invalid line, otherwise see
    /// [`Self::process_event`].
    pub fn process_line(&mut self, line: &str) -> Result<(), TreeError> {
        match parse_event(line)? {
            Some(event) => self.process_event(&event),
            None => Ok(()),
        }
    }

    /// Deliver the open file suite, if any
    ///
    /// Any real suites still open are closed into it first, so a stream cut
    /// off mid-suite still delivers everything discovered. Calling this when
    /// no file suite is open does nothing, which makes it safe as a final
    /// flush after a normal end. The current file is not reset: if events for
    /// the same file arrive afterwards without another file in between, they
    /// are not treated as a new boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the sink rejects the chunk. The
    /// file suite is consumed either way; no partial chunk reaches the sink.
    pub fn flush(&mut self) -> Result<(), TreeError> {
        if self.current_file.is_none() {
            return Ok(());
        }
        match self.stack.close_file_suite() {
            Some(file_suite) => self.emit(&file_suite),
            None => Ok(()),
        }
    }

    /// Flush and return the final report
    ///
    /// # Errors
    ///
    /// See [`Self::flush`].
    pub fn finish(&mut self) -> Result<StreamReport, TreeError> {
        self.flush()?;
        let report = self.report();
        if report.unfiled > 0 {
            warn!(
                unfiled = report.unfiled,
                "Some suites and specs had no location and were never emitted"
            );
        }
        info!(
            suites = report.suites,
            specs = report.specs,
            skipped = report.skipped,
            chunks = report.chunks,
            missing_locations = report.missing_locations,
            "Discovery stream finished"
        );
        Ok(report)
    }

    /// Counters so far
    #[must_use]
    pub fn report(&self) -> StreamReport {
        let root = self.stack.root();
        StreamReport {
            unfiled: root.suite_count() + root.test_count(),
            ..self.report
        }
    }

    /// Diagnostics recorded so far, in order
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// File of the most recently processed location
    #[must_use]
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// The suite stack
    #[must_use]
    pub fn stack(&self) -> &SuiteStack {
        &self.stack
    }

    /// The location map in use
    #[must_use]
    pub fn locations(&self) -> &LocationMap {
        &self.locations
    }

    /// The sink chunks are delivered to
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give up the builder and keep the sink
    ///
    /// Does not flush; call [`Self::finish`] first.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Open a new file suite when `location` is in a different file
    ///
    /// The new file suite is on the stack before the triggering node is
    /// attached, so that node becomes its first child. A file seen earlier
    /// gets a fresh file suite with the same id when it comes back after
    /// another file: it is delivered as a separate chunk and receivers merge
    /// same-id file suites.
    fn process_current_location(&mut self, location: &Location) -> Result<(), TreeError> {
        if self.current_file.as_deref() == Some(location.file.as_str()) {
            return Ok(());
        }

        debug!(file = %location.file, "Entering file");
        let previous = self
            .stack
            .rotate(SuiteNode::file_suite(location.file.as_str()));
        self.current_file = Some(location.file.clone());

        match previous {
            Some(file_suite) => self.emit(&file_suite),
            None => Ok(()),
        }
    }

    fn emit(&mut self, file_suite: &SuiteNode) -> Result<(), TreeError> {
        let chunk = encode_chunk_with(file_suite, &self.options)?;
        debug!(
            file = %file_suite.id,
            tests = file_suite.test_count(),
            json_bytes = chunk.json_bytes,
            compressed_bytes = chunk.compressed_bytes,
            "Emitting file suite chunk"
        );
        self.sink.deliver(chunk.text)?;
        self.report.chunks += 1;
        Ok(())
    }
}
