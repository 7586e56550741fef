// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Log format selection
//!
//! Each supported log representation has its own [`FormatParser`]. The caller
//! either names the format explicitly or lets [`LogFormat::detect`] pick one
//! from the file name and contents.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::archive::ArchiveNaming;
use crate::error::ResultsError;
use crate::line::{AutomationLogParser, RESULT_LOG_MARKER, ResultLogParser};
use crate::result::TestResult;
use crate::structured::JsonReportParser;
use crate::text::DecodeMode;

/// Common contract for every log format
pub trait FormatParser {
    /// The format this parser handles
    fn format(&self) -> LogFormat;

    /// The exact status token that counts as a pass
    fn success_token(&self) -> &'static str;

    /// Extract test results in the order they appear in the input
    ///
    /// # Errors
    ///
    /// Line-oriented parsers never fail. The structured parser returns
    /// `ResultsError::MalformedReport` when the document cannot be read.
    fn parse(&self, content: &str) -> Result<Vec<TestResult>, ResultsError>;

    /// Whether the raw input should be archived before parsing
    fn permits_archive(&self, content: &str) -> bool;
}

/// Supported log representations, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// `Automation Test <Status> (<short> - <long>)` lines
    AutomationLog,
    /// `Result={<status>} Name={<short>} Path={<long>}` lines
    ResultLog,
    /// JSON report with `reportCreatedOn` and a `tests` array
    JsonReport,
}

impl LogFormat {
    /// All formats, oldest first
    pub const ALL: [LogFormat; 3] = [Self::AutomationLog, Self::ResultLog, Self::JsonReport];

    /// Get the parser for this format
    #[must_use]
    pub fn parser(self) -> Box<dyn FormatParser> {
        match self {
            Self::AutomationLog => Box::new(AutomationLogParser),
            Self::ResultLog => Box::new(ResultLogParser),
            Self::JsonReport => Box::new(JsonReportParser),
        }
    }

    /// How raw bytes are decoded for this format
    #[must_use]
    pub fn decode_mode(self) -> DecodeMode {
        match self {
            Self::AutomationLog | Self::ResultLog => DecodeMode::Lossy,
            Self::JsonReport => DecodeMode::Strict,
        }
    }

    /// How the archive copy is named for this format
    #[must_use]
    pub fn archive_naming(self) -> ArchiveNaming {
        match self {
            Self::AutomationLog | Self::ResultLog => ArchiveNaming::Suffixed,
            Self::JsonReport => ArchiveNaming::ResultsPrefix,
        }
    }

    /// Pick a format from the file name and a decoded view of the contents
    ///
    /// A `.json` extension or a document starting with `{` selects the JSON
    /// report; a `Result={` marker selects the result log; anything else is
    /// read as an automation log.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Self {
        let is_json_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json_ext || content.trim_start_matches('\u{feff}').trim_start().starts_with('{') {
            Self::JsonReport
        } else if content.contains(RESULT_LOG_MARKER) {
            Self::ResultLog
        } else {
            Self::AutomationLog
        }
    }

    /// Stable name used on the command line and in summaries
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutomationLog => "automation-log",
            Self::ResultLog => "result-log",
            Self::JsonReport => "json-report",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
