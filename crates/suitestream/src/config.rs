//! Configuration for the suitestream command line
//!
//! This module provides the argument types for streaming discovery events into
//! chunks and for reassembling chunks into a tree, plus logging options.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Highest zlib compression level
pub const MAX_LEVEL: u32 = 9;

/// Suitestream - stream test-discovery trees one source file at a time
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "suitestream")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs one line per emitted chunk with its raw and compressed size.
    /// Logs are written to stderr; stdout carries only chunks or trees.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings (such as specs without a location) are logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the discovery tree from events and write one chunk per line
    ///
    /// Events are newline-delimited JSON read from stdin unless --events is
    /// given. Each output line is a base64, zlib-compressed JSON file suite.
    ///
    /// Example:
    ///   my-runner --list-json | suitestream stream --locations locations.json > chunks.txt
    Stream {
        /// JSON map from event id to {"file": ..., "line": ...}
        #[arg(short, long, env = "SUITESTREAM_LOCATIONS")]
        locations: PathBuf,

        /// Read events from this file instead of stdin
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// zlib compression level (0-9)
        #[arg(long, default_value_t = 6)]
        level: u32,
    },

    /// Decode chunks and print the merged tree as JSON
    ///
    /// Chunks for the same file are merged into one file suite.
    Assemble {
        /// Read chunks from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long, default_value = "false")]
        compact: bool,
    },
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No subcommand was given
    /// - An input file is specified but doesn't exist
    /// - The compression level is above 9
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            None => Err(ConfigError::MissingCommand),
            Some(Command::Stream {
                locations,
                events,
                level,
            }) => {
                require_file(locations)?;
                if let Some(events) = events {
                    require_file(events)?;
                }
                if *level > MAX_LEVEL {
                    return Err(ConfigError::InvalidLevel(*level));
                }
                Ok(())
            }
            Some(Command::Assemble { input, .. }) => match input {
                Some(input) => require_file(input),
                None => Ok(()),
            },
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn require_file(path: &PathBuf) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.clone()));
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile(path.clone()));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No subcommand given
    #[error("No command given; use `stream` or `assemble`")]
    MissingCommand,

    /// Input file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// Compression level out of range
    #[error("Compression level must be between 0 and 9, got {0}")]
    InvalidLevel(u32),
}
