// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One gate invocation
//!
//! Reads the log, archives it, parses it, prints one line per result plus a
//! summary, and decides the verdict. The log is read in one pass and its file
//! handle is closed before anything else happens.
//!
//! # Example
//!
//! ```no_run
//! use testgate::config::Config;
//! use testgate::gate;
//!
//! let config = Config::new("Saved/Logs/Automation.log", "1234");
//! let outcome = gate::run(&config).expect("gate run");
//! std::process::exit(outcome.exit_code());
//! ```

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use testgate_results::archive::validate_build_id;
use testgate_results::text::{DecodeMode, decode};
use testgate_results::verdict::USAGE_ERROR_EXIT_CODE;
use testgate_results::{ArchiveRecord, LogFormat, ResultsError, RunReport, Verdict, archive_at};

use crate::config::Config;

/// Exit status when the archive copy could not be written
pub const ARCHIVE_FAILED_EXIT_CODE: i32 = -2;

/// Exit status when a JSON report cannot be parsed
pub const MALFORMED_INPUT_EXIT_CODE: i32 = -3;

/// Exit status when results could not be written out
pub const OUTPUT_FAILED_EXIT_CODE: i32 = -4;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort a gate run
///
/// None of these is a test failure; each maps to its own exit status.
#[derive(Debug, Error)]
pub enum GateError {
    /// Arguments that cannot be used
    #[error("Usage error: {0}")]
    Usage(String),

    /// The log exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The log path
        path: PathBuf,
        /// The underlying IO error
        source: io::Error,
    },

    /// The structured report is malformed
    #[error("Malformed input: {0}")]
    MalformedInput(#[source] ResultsError),

    /// The archive copy failed
    #[error("Archive copy failed: {0}")]
    ArchiveCopyFailed(#[source] ResultsError),

    /// Results or the JSON summary could not be written
    #[error("Failed to write output: {0:#}")]
    Output(#[from] anyhow::Error),
}

impl GateError {
    /// Process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Read { .. } => USAGE_ERROR_EXIT_CODE,
            Self::ArchiveCopyFailed(_) => ARCHIVE_FAILED_EXIT_CODE,
            Self::MalformedInput(_) => MALFORMED_INPUT_EXIT_CODE,
            Self::Output(_) => OUTPUT_FAILED_EXIT_CODE,
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a completed gate run
#[derive(Debug, Clone, Serialize)]
pub struct GateOutcome {
    /// The log that was examined
    pub log_path: PathBuf,
    /// Build identifier supplied by the caller
    pub build_id: String,
    /// Format used to parse the log; `None` when the log was missing
    pub format: Option<LogFormat>,
    /// Passed and failed results
    pub report: RunReport,
    /// The build verdict
    pub verdict: Verdict,
    /// The archive copy, when one was made
    pub archive: Option<ArchiveRecord>,
}

impl GateOutcome {
    /// Process exit status for this outcome
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }
}

/// Map a gate result to the process exit status
#[must_use]
pub fn exit_code(result: &Result<GateOutcome, GateError>) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => e.exit_code(),
    }
}

// ============================================================================
// Running
// ============================================================================

/// Run the gate, printing results to stdout and archiving with the local time
///
/// # Errors
///
/// See [`run_to`].
pub fn run(config: &Config) -> Result<GateOutcome, GateError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_to(config, &mut out, &Local::now())
}

/// Run the gate, writing result lines to `out` and stamping the archive with `now`
///
/// A missing log is not an error: it yields the `NoInput` verdict.
///
/// # Errors
///
/// Returns `GateError::Usage` for an unusable build identifier,
/// `GateError::Read` if the log exists but cannot be read,
/// `GateError::ArchiveCopyFailed` if the archive copy fails,
/// `GateError::MalformedInput` if a JSON report cannot be parsed, and
/// `GateError::Output` if results cannot be written. The JSON summary is only
/// written when the run completes; any earlier summary at that path is removed
/// first.
pub fn run_to<W, Tz>(
    config: &Config,
    out: &mut W,
    now: &DateTime<Tz>,
) -> Result<GateOutcome, GateError>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    validate_build_id(&config.build_id).map_err(|e| GateError::Usage(e.to_string()))?;
    remove_stale_summary(config)?;
    let path = config.log_path.as_path();

    let Some(bytes) = read_source(path)? else {
        error!(path = %path.display(), "test log not found");
        let report = RunReport::missing_source();
        let outcome = GateOutcome {
            log_path: path.to_path_buf(),
            build_id: config.build_id.clone(),
            format: None,
            verdict: report.verdict(),
            report,
            archive: None,
        };
        write_summary_json(config, &outcome)?;
        return Ok(outcome);
    };
    debug!(path = %path.display(), bytes = bytes.len(), "read test log");

    let lossy = decode(&bytes, DecodeMode::Lossy).map_err(GateError::MalformedInput)?;
    let format = match config.format.explicit() {
        Some(format) => format,
        None => {
            let detected = LogFormat::detect(path, &lossy);
            debug!(format = %detected, "detected log format");
            detected
        }
    };
    let text = match format.decode_mode() {
        DecodeMode::Lossy => lossy,
        DecodeMode::Strict => {
            decode(&bytes, DecodeMode::Strict).map_err(GateError::MalformedInput)?
        }
    };
    info!(path = %path.display(), format = %format, "parsing test log");

    let parser = format.parser();
    let archive = if parser.permits_archive(&text) {
        let record = archive_at(path, &config.build_id, format.archive_naming(), now)
            .map_err(GateError::ArchiveCopyFailed)?;
        Some(record)
    } else {
        warn!(path = %path.display(), "report timestamp unreadable, not archiving");
        None
    };

    let results = parser.parse(&text).map_err(GateError::MalformedInput)?;
    for result in &results {
        writeln!(out, "Test result for {}: {}", result.identifier, result.status)
            .context("writing test result line")?;
    }

    let report = RunReport::from_results(results);
    let verdict = report.verdict();
    if let Some(line) = verdict.summary_line(&report) {
        writeln!(out, "{line}").context("writing summary line")?;
    }
    out.flush().context("flushing results")?;
    info!(
        passed = report.passed().len(),
        failed = report.failed().len(),
        verdict = %verdict,
        success = verdict.is_success(),
        "test log evaluated"
    );

    let outcome = GateOutcome {
        log_path: path.to_path_buf(),
        build_id: config.build_id.clone(),
        format: Some(format),
        report,
        verdict,
        archive,
    };
    write_summary_json(config, &outcome)?;
    Ok(outcome)
}

/// Read the whole log, or `None` if it does not exist
fn read_source(path: &Path) -> Result<Option<Vec<u8>>, GateError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(GateError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Delete a summary left by an earlier run, so a failed run never leaves one behind
fn remove_stale_summary(config: &Config) -> anyhow::Result<()> {
    let Some(path) = config.summary_json.as_deref() else {
        return Ok(());
    };
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale run summary");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing stale summary {}", path.display())),
    }
}

fn write_summary_json(config: &Config, outcome: &GateOutcome) -> anyhow::Result<()> {
    let Some(path) = config.summary_json.as_deref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating summary file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcome)
        .with_context(|| format!("serializing summary to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing summary file {}", path.display()))?;
    debug!(path = %path.display(), "wrote run summary");
    Ok(())
}
