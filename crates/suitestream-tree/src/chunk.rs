// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Chunk encoding
//!
//! A chunk is one file suite serialized to JSON, compressed with zlib and
//! base64-encoded (standard alphabet, padded) so it can travel as a plain
//! string over an inter-process channel.

use crate::error::TreeError;
use crate::node::{SuiteNode, TreeNode};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::Serialize;
use std::io::{Read, Write};

/// Default ceiling for a decompressed chunk (64 MiB)
pub const DEFAULT_MAX_DECODED_BYTES: usize = 64 * 1024 * 1024;

/// Borrowed view that serializes with the same `type` tag as [`TreeNode`]
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ChunkRoot<'a> {
    Suite(&'a SuiteNode),
}

/// Tuning for chunk encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    /// zlib level, 0 (store) to 9 (best)
    pub level: u32,
    /// Largest decompressed payload `decode_chunk_with` accepts
    pub max_decoded_bytes: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            level: Compression::default().level(),
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
        }
    }
}

impl ChunkOptions {
    /// Options with a specific compression level
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.min(9);
        self
    }
}

/// A chunk ready for delivery, with its size accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChunk {
    /// Base64 text handed to the sink
    pub text: String,
    /// Size of the canonical JSON before compression
    pub json_bytes: usize,
    /// Size after compression, before base64
    pub compressed_bytes: usize,
}

/// Encode a file suite with default options
///
/// # Errors
///
/// Returns `TreeError::Json` or `TreeError::Io` if serialization or
/// compression fails.
pub fn encode_chunk(suite: &SuiteNode) -> Result<String, TreeError> {
    encode_chunk_with(suite, &ChunkOptions::default()).map(|chunk| chunk.text)
}

/// Encode a file suite
///
/// # Errors
///
/// Returns `TreeError::Json` or `TreeError::Io` if serialization or
/// compression fails.
pub fn encode_chunk_with(
    suite: &SuiteNode,
    options: &ChunkOptions,
) -> Result<EncodedChunk, TreeError> {
    let json = serde_json::to_vec(&ChunkRoot::Suite(suite))?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(options.level));
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    Ok(EncodedChunk {
        text: STANDARD.encode(&compressed),
        json_bytes: json.len(),
        compressed_bytes: compressed.len(),
    })
}

/// Decode a chunk with default options
///
/// # Errors
///
/// See [`decode_chunk_with`].
pub fn decode_chunk(chunk: &str) -> Result<SuiteNode, TreeError> {
    decode_chunk_with(chunk, &ChunkOptions::default())
}

/// Decode a chunk back into its file suite
///
/// # Errors
///
/// Returns `TreeError::Base64` for malformed text, `TreeError::Io` for a
/// corrupt zlib stream, `TreeError::ChunkTooLarge` past the size limit,
/// `TreeError::Json` for invalid JSON and `TreeError::InvalidChunk` when the
/// root is not a file suite.
pub fn decode_chunk_with(chunk: &str, options: &ChunkOptions) -> Result<SuiteNode, TreeError> {
    let compressed = STANDARD.decode(chunk.trim().as_bytes())?;

    let limit = options.max_decoded_bytes;
    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(limit.saturating_add(1) as u64)
        .read_to_end(&mut json)?;
    if json.len() > limit {
        return Err(TreeError::ChunkTooLarge {
            size: json.len(),
            limit,
        });
    }

    let node: TreeNode = serde_json::from_slice(&json)?;
    let suite = match node {
        TreeNode::Suite(suite) => suite,
        TreeNode::Test(test) => {
            return Err(TreeError::InvalidChunk {
                message: format!("root is test '{}', expected a file suite", test.id),
            });
        }
    };
    if !suite.is_file_suite {
        return Err(TreeError::InvalidChunk {
            message: format!("root suite '{}' is not a file suite", suite.id),
        });
    }
    Ok(suite)
}
