// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for suitestream-tree

use thiserror::Error;

/// Errors that can occur while building, encoding or decoding discovery trees
#[derive(Debug, Error)]
pub enum TreeError {
    /// Error serializing or parsing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error compressing, decompressing or writing a chunk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chunk text is not valid base64
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A suite-done event arrived with no real suite open
    #[error("Unbalanced suite-done: no open suite above the {depth}-deep synthetic base")]
    UnbalancedSuiteDone {
        /// Stack depth when the event was rejected
        depth: usize,
    },

    /// Decoded chunk does not describe a file suite
    #[error("Invalid chunk: {message}")]
    InvalidChunk {
        /// Description of what was wrong with the chunk
        message: String,
    },

    /// Decompressed chunk exceeds the configured limit
    #[error("Chunk too large: {size} bytes exceeds limit of {limit} bytes")]
    ChunkTooLarge {
        /// Bytes read before giving up
        size: usize,
        /// Configured maximum
        limit: usize,
    },
}
