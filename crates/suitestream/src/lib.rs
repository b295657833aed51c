//! suitestream library
//!
//! This module exports the command-line configuration and subcommand runners
//! for use in integration tests and as a library. The tree building itself
//! lives in `suitestream-tree`.

pub mod config;
pub mod run;
