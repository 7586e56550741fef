// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testgate-results: Test log parsing and build verdicts for testgate
//!
//! This library crate turns the raw output of an automation test run into a
//! pass/fail [`RunReport`], decides the build-level [`Verdict`], and archives
//! the raw log next to the original for audit.
//!
//! Three historical log representations are supported, each behind its own
//! [`FormatParser`]:
//! - [`LogFormat::AutomationLog`]: `Automation Test Succeeded (Short - Long.Path)` lines
//! - [`LogFormat::ResultLog`]: `Result={Passed} Name={Short} Path={Long.Path}` lines
//! - [`LogFormat::JsonReport`]: a JSON report with a `tests` array
//!
//! # Example
//!
//! ```no_run
//! use testgate_results::{LogFormat, RunReport};
//!
//! let log = "LogAutomationController: Automation Test Succeeded (Basic - Project.Core.Basic)";
//! let results = LogFormat::AutomationLog.parser().parse(log).unwrap();
//! let report = RunReport::from_results(results);
//! assert_eq!(report.verdict().exit_code(), 0);
//! ```

pub mod archive;
pub mod error;
pub mod format;
pub mod line;
pub mod report;
pub mod result;
pub mod structured;
pub mod text;
pub mod verdict;

pub use archive::{ArchiveNaming, ArchiveRecord, archive_at};
pub use error::ResultsError;
pub use format::{FormatParser, LogFormat};
pub use line::{AutomationLogParser, ResultLogParser};
pub use report::RunReport;
pub use result::{TestOutcome, TestResult};
pub use structured::{JsonReport, JsonReportParser, JsonTestRecord};
pub use verdict::Verdict;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ResultsError;
    pub use crate::format::{FormatParser, LogFormat};
    pub use crate::report::RunReport;
    pub use crate::result::{TestOutcome, TestResult};
    pub use crate::verdict::Verdict;
}
