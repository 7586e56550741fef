// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Build verdicts and their exit statuses
//!
//! External tooling branches on these exit statuses, so the mapping is fixed:
//!
//! | Verdict        | Exit status |
//! |----------------|-------------|
//! | `AllPassed`    | 0           |
//! | `HasFailures`  | 1           |
//! | `NoTestsFound` | 2           |
//! | `NoInput`      | -1          |

use std::fmt;

use serde::Serialize;

use crate::report::RunReport;

/// Exit status for usage and environment errors, including a missing log
pub const USAGE_ERROR_EXIT_CODE: i32 = -1;

/// Build-level outcome of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The log file does not exist
    NoInput,
    /// The log exists but contains no recognizable results
    NoTestsFound,
    /// At least one test failed
    HasFailures,
    /// Every recognized test passed
    AllPassed,
}

impl Verdict {
    /// Decide the verdict from the report counts
    ///
    /// Zero results never count as success: a runner that crashed before
    /// writing anything must not turn the build green.
    #[must_use]
    pub fn decide(source_existed: bool, passed: usize, failed: usize) -> Self {
        if !source_existed {
            Self::NoInput
        } else if failed > 0 {
            Self::HasFailures
        } else if passed == 0 {
            Self::NoTestsFound
        } else {
            Self::AllPassed
        }
    }

    /// Process exit status for this verdict
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::AllPassed => 0,
            Self::HasFailures => 1,
            Self::NoTestsFound => 2,
            Self::NoInput => USAGE_ERROR_EXIT_CODE,
        }
    }

    /// Whether the pipeline may proceed
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::AllPassed
    }

    /// Final summary line printed after the per-test lines
    ///
    /// Returns `None` for `NoInput`, where there is nothing to summarize.
    #[must_use]
    pub fn summary_line(self, report: &RunReport) -> Option<String> {
        match self {
            Self::AllPassed => Some(format!("SUCCESS: all {} tests passed!", report.passed().len())),
            Self::HasFailures => Some(format!("ERROR: {} test(s) failed!", report.failed().len())),
            Self::NoTestsFound => Some("ERROR: no tests found!".to_string()),
            Self::NoInput => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoInput => "no input",
            Self::NoTestsFound => "no tests found",
            Self::HasFailures => "has failures",
            Self::AllPassed => "all passed",
        };
        f.write_str(text)
    }
}
