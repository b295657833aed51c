// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Final flush on scope exit
//!
//! Discovery streams do not always end cleanly: the framework may never send
//! its closing events, an event may fail to parse, or the host may panic.
//! [`FlushGuard`] borrows a [`TreeBuilder`] for the duration of a scope and
//! flushes it when the scope is left for any reason, so the last open file
//! suite still reaches the sink. Process exits that skip destructors
//! (`std::process::exit`, `panic = "abort"`, signals) are not covered.

use crate::builder::TreeBuilder;
use crate::error::TreeError;
use crate::report::StreamReport;
use crate::sink::ChunkSink;
use std::ops::{Deref, DerefMut};
use tracing::error;

/// Flushes the borrowed builder when dropped
pub struct FlushGuard<'a, S: ChunkSink> {
    builder: &'a mut TreeBuilder<S>,
}

impl<'a, S: ChunkSink> FlushGuard<'a, S> {
    /// Guard `builder` until the returned value is dropped
    pub fn new(builder: &'a mut TreeBuilder<S>) -> Self {
        Self { builder }
    }

    /// Flush now and return the final report, surfacing any error
    ///
    /// The drop-time flush that follows is a no-op.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::flush`].
    pub fn finish(self) -> Result<StreamReport, TreeError> {
        self.builder.finish()
    }
}

impl<S: ChunkSink> Deref for FlushGuard<'_, S> {
    type Target = TreeBuilder<S>;

    fn deref(&self) -> &Self::Target {
        &*self.builder
    }
}

impl<S: ChunkSink> DerefMut for FlushGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.builder
    }
}

impl<S: ChunkSink> Drop for FlushGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.builder.flush() {
            error!(
                panicking = std::thread::panicking(),
                "Final flush failed: {e}"
            );
        }
    }
}

impl<S: ChunkSink> TreeBuilder<S> {
    /// Borrow this builder behind a guard that flushes on scope exit
    pub fn flush_on_drop(&mut self) -> FlushGuard<'_, S> {
        FlushGuard::new(self)
    }
}
