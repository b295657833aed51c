// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Chunk sinks
//!
//! A sink receives each encoded chunk exactly once. Chunks for the same file
//! may arrive more than once when events for that file are not contiguous;
//! receivers must merge file suites by id (see [`crate::assemble`]) instead of
//! assuming one delivery per file.

use crate::error::TreeError;
use std::io::Write;

/// Receiver for encoded chunks
pub trait ChunkSink {
    /// Deliver one encoded chunk
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk could not be handed over.
    fn deliver(&mut self, chunk: String) -> Result<(), TreeError>;
}

impl<F> ChunkSink for F
where
    F: FnMut(String),
{
    fn deliver(&mut self, chunk: String) -> Result<(), TreeError> {
        self(chunk);
        Ok(())
    }
}

/// Sink that keeps every chunk in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    chunks: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks delivered so far, in delivery order
    #[must_use]
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Take ownership of the delivered chunks
    #[must_use]
    pub fn into_chunks(self) -> Vec<String> {
        self.chunks
    }
}

impl ChunkSink for MemorySink {
    fn deliver(&mut self, chunk: String) -> Result<(), TreeError> {
        self.chunks.push(chunk);
        Ok(())
    }
}

/// Sink that writes one chunk per line and flushes after each
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChunkSink for WriterSink<W> {
    fn deliver(&mut self, chunk: String) -> Result<(), TreeError> {
        self.writer.write_all(chunk.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
