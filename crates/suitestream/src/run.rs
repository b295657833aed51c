// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand execution
//!
//! The functions here take readers and writers rather than paths so they can
//! be driven from stdin/stdout in the binary and from memory in tests.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use suitestream_tree::{
    ChunkOptions, LocationMap, StreamReport, TreeAssembler, TreeBuilder, TreeNode, WriterSink,
};

use crate::config::{Command, Config};

/// Summary of an `assemble` run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssembleSummary {
    /// Chunk lines decoded
    pub chunks: usize,
    /// Distinct file suites after merging
    pub files: usize,
    /// Specs in the merged tree
    pub specs: usize,
}

/// Load a location map from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid map.
pub fn load_locations(path: &Path) -> Result<LocationMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read locations from {}", path.display()))?;
    let locations = LocationMap::from_json(&text)
        .with_context(|| format!("Invalid location map in {}", path.display()))?;
    debug!(path = %path.display(), entries = locations.len(), "Loaded locations");
    Ok(locations)
}

/// Build the tree from NDJSON `events` and write one chunk per line to `out`
///
/// The last file suite is flushed even when reading or processing fails part
/// way through, so everything discovered before the failure is delivered.
///
/// # Errors
///
/// Returns an error for an unreadable or malformed event line, or when a
/// chunk cannot be written.
pub fn stream<R: BufRead, W: Write>(
    locations: LocationMap,
    events: R,
    out: W,
    options: ChunkOptions,
) -> Result<StreamReport> {
    let mut builder = TreeBuilder::new(locations, WriterSink::new(out)).with_options(options);
    let mut guard = builder.flush_on_drop();

    for (index, line) in events.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read event line {line_no}"))?;
        guard
            .process_line(&line)
            .with_context(|| format!("Failed to process event line {line_no}"))?;
    }

    let report = guard.finish().context("Failed to flush the last file suite")?;
    Ok(report)
}

/// Decode chunk lines from `input` and write the merged tree as JSON
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns an error for an unreadable line, an invalid chunk, or a failed
/// write.
pub fn assemble<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    compact: bool,
) -> Result<AssembleSummary> {
    let mut assembler = TreeAssembler::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read chunk line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        assembler
            .push_chunk(line)
            .with_context(|| format!("Invalid chunk on line {line_no}"))?;
    }

    let summary = AssembleSummary {
        chunks: assembler.chunk_count(),
        files: assembler.file_count(),
        specs: assembler.root().test_count(),
    };

    let tree = TreeNode::from(assembler.into_root());
    if compact {
        serde_json::to_writer(&mut out, &tree)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &tree)?;
    }
    writeln!(out)?;
    out.flush()?;

    info!(
        chunks = summary.chunks,
        files = summary.files,
        specs = summary.specs,
        "Assembled tree"
    );
    Ok(summary)
}

/// Run the configured subcommand, writing its output to `out`
///
/// Input is read from the files named in the config, or from stdin.
///
/// # Errors
///
/// Returns an error if no subcommand is set or the subcommand fails.
pub fn execute<W: Write>(config: &Config, out: W) -> Result<()> {
    match &config.command {
        Some(Command::Stream {
            locations,
            events,
            level,
        }) => {
            let locations = load_locations(locations)?;
            let options = ChunkOptions::default().with_level(*level);
            let report = match events {
                Some(path) => stream(locations, open(path)?, out, options)?,
                None => stream(locations, io::stdin().lock(), out, options)?,
            };
            if !report.is_clean() {
                info!(
                    missing_locations = report.missing_locations,
                    unfiled = report.unfiled,
                    "Stream finished with diagnostics"
                );
            }
            Ok(())
        }
        Some(Command::Assemble { input, compact }) => {
            match input {
                Some(path) => assemble(open(path)?, out, *compact)?,
                None => assemble(io::stdin().lock(), out, *compact)?,
            };
            Ok(())
        }
        None => anyhow::bail!("No command given; use `stream` or `assemble`"),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
