// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testgate-results

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, parsing or archiving a test log
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The structured report could not be parsed
    #[error("Malformed test report: {0}")]
    MalformedReport(#[from] serde_json::Error),

    /// The input could not be decoded as text
    #[error("Invalid text encoding: {message}")]
    Encoding {
        /// Description of the decoding failure
        message: String,
    },

    /// Error reading the source or writing the archive copy
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An archive file with the computed name already exists
    #[error("Archive destination already exists: {}", path.display())]
    ArchiveExists {
        /// The destination that would have been overwritten
        path: PathBuf,
    },

    /// The build identifier cannot be embedded in a file name
    #[error("Invalid build identifier: {build_id:?}")]
    InvalidBuildId {
        /// The rejected identifier
        build_id: String,
    },

    /// The source path has no file name to derive an archive name from
    #[error("Cannot derive an archive name from {}", path.display())]
    InvalidSourcePath {
        /// The source path
        path: PathBuf,
    },
}
