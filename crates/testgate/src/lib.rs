//! testgate library
//!
//! This module exports the command-line surface and the single-invocation
//! gate for use in integration tests and as a library.

pub mod config;
pub mod gate;
