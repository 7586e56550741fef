// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Structured JSON report parsing
//!
//! The newest runner generation writes a single JSON document:
//!
//! ```json
//! {
//!   "reportCreatedOn": "2026.01.17-02.33.06",
//!   "tests": [
//!     {"fullTestPath": "Project.Math.Add", "state": "Success", "errors": 0}
//!   ]
//! }
//! ```
//!
//! Unlike the line grammars, a document that cannot be read is an error for
//! the whole run.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ResultsError;
use crate::format::{FormatParser, LogFormat};
use crate::result::{TestOutcome, TestResult};

const SUCCESS_STATE: &str = "Success";

/// A complete JSON test report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    /// When the runner wrote the report
    pub report_created_on: String,
    /// Test records in execution order
    pub tests: Vec<JsonTestRecord>,
}

/// One test entry in a JSON report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTestRecord {
    /// Fully-qualified test path
    pub full_test_path: String,
    /// Display name shown by the runner
    #[serde(default)]
    pub test_display_name: Option<String>,
    /// Final state, `Success` on a pass
    pub state: String,
    /// Number of errors logged by the test
    pub errors: u64,
    /// Number of warnings logged by the test
    #[serde(default)]
    pub warnings: u64,
}

impl JsonTestRecord {
    /// A record passes only with the success state and no errors
    #[must_use]
    pub fn outcome(&self) -> TestOutcome {
        if self.state == SUCCESS_STATE && self.errors == 0 {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed
        }
    }

    fn status_text(&self) -> String {
        if self.errors == 0 {
            self.state.clone()
        } else {
            format!("Failed (state={}, errors={})", self.state, self.errors)
        }
    }

    fn into_result(self) -> TestResult {
        TestResult {
            outcome: self.outcome(),
            status: self.status_text(),
            identifier: self.full_test_path,
            short_name: self.test_display_name,
        }
    }
}

impl JsonReport {
    /// Parse a report document
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::MalformedReport` if the document is not valid
    /// JSON or a required key is missing.
    pub fn from_json(content: &str) -> Result<Self, ResultsError> {
        serde_json::from_str(strip_bom(content)).map_err(ResultsError::from)
    }

    /// Read only the creation timestamp, tolerating malformed test records
    #[must_use]
    pub fn created_on(content: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(strip_bom(content)).ok()?;
        value
            .get("reportCreatedOn")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }
}

/// Parser for JSON reports
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportParser;

impl FormatParser for JsonReportParser {
    fn format(&self) -> LogFormat {
        LogFormat::JsonReport
    }

    fn success_token(&self) -> &'static str {
        SUCCESS_STATE
    }

    fn parse(&self, content: &str) -> Result<Vec<TestResult>, ResultsError> {
        let report = JsonReport::from_json(content).inspect_err(|e| {
            warn!(error = %e, "test report could not be parsed");
        })?;
        debug!(
            created_on = %report.report_created_on,
            records = report.tests.len(),
            "parsed test report"
        );
        Ok(report
            .tests
            .into_iter()
            .map(JsonTestRecord::into_result)
            .collect())
    }

    fn permits_archive(&self, content: &str) -> bool {
        JsonReport::created_on(content).is_some()
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
