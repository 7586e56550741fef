// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Archival of the raw test log
//!
//! The source file is copied byte for byte next to itself under a name tagged
//! with the build identifier and a second-resolution timestamp. The source is
//! never modified and an existing file is never overwritten.

use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ResultsError;

/// Timestamp layout embedded in archive names
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// How the archive file is named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveNaming {
    /// `<stem>-build-<id>-<timestamp>.<ext>`, used for line logs
    Suffixed,
    /// `test-results_build-<id>_<timestamp>.<ext>`, used for JSON reports
    ResultsPrefix,
}

/// A completed archive copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveRecord {
    /// The file that was copied
    pub original_path: PathBuf,
    /// Where the copy was written
    pub copy_path: PathBuf,
    /// Build identifier embedded in the name
    pub build_id: String,
    /// Timestamp embedded in the name
    pub timestamp: String,
}

impl ArchiveNaming {
    /// Compute the archive file name for `source`
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::InvalidBuildId` if the build identifier is empty
    /// or contains a path separator, and `ResultsError::InvalidSourcePath` if
    /// `source` has no file name.
    pub fn file_name(
        self,
        source: &Path,
        build_id: &str,
        timestamp: &str,
    ) -> Result<OsString, ResultsError> {
        validate_build_id(build_id)?;
        let stem = source
            .file_stem()
            .ok_or_else(|| ResultsError::InvalidSourcePath {
                path: source.to_path_buf(),
            })?;

        let mut name = match self {
            Self::Suffixed => {
                let mut name = stem.to_os_string();
                name.push(format!("-build-{build_id}-{timestamp}"));
                name
            }
            Self::ResultsPrefix => OsString::from(format!("test-results_build-{build_id}_{timestamp}")),
        };
        if let Some(ext) = source.extension() {
            name.push(".");
            name.push(ext);
        }
        Ok(name)
    }

    /// Compute the full archive path, in the same directory as `source`
    ///
    /// # Errors
    ///
    /// See [`ArchiveNaming::file_name`].
    pub fn archive_path(
        self,
        source: &Path,
        build_id: &str,
        timestamp: &str,
    ) -> Result<PathBuf, ResultsError> {
        let name = self.file_name(source, build_id, timestamp)?;
        Ok(source.with_file_name(name))
    }
}

/// Check that a build identifier can be embedded in a file name
///
/// # Errors
///
/// Returns `ResultsError::InvalidBuildId` if the identifier is empty or
/// contains a path separator.
pub fn validate_build_id(build_id: &str) -> Result<(), ResultsError> {
    let invalid = build_id.is_empty()
        || build_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || std::path::is_separator(c));
    if invalid {
        return Err(ResultsError::InvalidBuildId {
            build_id: build_id.to_string(),
        });
    }
    Ok(())
}

/// Archive `source`, stamping the copy with `at`
///
/// # Errors
///
/// Returns `ResultsError::ArchiveExists` if the destination already exists,
/// `ResultsError::Io` if the source cannot be read or the copy cannot be
/// written, and the naming errors of [`ArchiveNaming::file_name`].
pub fn archive_at<Tz>(
    source: &Path,
    build_id: &str,
    naming: ArchiveNaming,
    at: &DateTime<Tz>,
) -> Result<ArchiveRecord, ResultsError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let copy_path = naming.archive_path(source, build_id, &timestamp)?;

    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&copy_path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ResultsError::ArchiveExists {
                path: copy_path.clone(),
            },
            _ => ResultsError::Io(e),
        })?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|bytes| {
        writer.sync_all()?;
        Ok(bytes)
    });
    let bytes = match copied {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(writer);
            if let Err(cleanup) = fs::remove_file(&copy_path) {
                warn!(path = %copy_path.display(), error = %cleanup, "could not remove partial archive");
            }
            return Err(ResultsError::Io(e));
        }
    };

    info!(
        source = %source.display(),
        archive = %copy_path.display(),
        bytes,
        "archived test log"
    );
    Ok(ArchiveRecord {
        original_path: source.to_path_buf(),
        copy_path,
        build_id: build_id.to_string(),
        timestamp,
    })
}
