// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single test outcome recognized in a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Fully-qualified test path; the identity of the test
    pub identifier: String,
    /// Short display name, when the format provides one
    pub short_name: Option<String>,
    /// Status text exactly as it appeared in the input
    pub status: String,
    /// Normalized outcome
    pub outcome: TestOutcome,
}

/// Possible test outcomes
///
/// There is no skipped or unknown outcome: anything that is not the format's
/// success token is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
}

impl TestOutcome {
    /// Map a raw status token to an outcome
    ///
    /// The comparison is exact and case-sensitive.
    #[must_use]
    pub fn from_status(status: &str, success_token: &str) -> Self {
        if status == success_token {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("Passed"),
            Self::Failed => f.write_str("Failed"),
        }
    }
}

impl TestResult {
    /// Build a result, deriving the outcome from the status token
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        short_name: Option<String>,
        status: impl Into<String>,
        success_token: &str,
    ) -> Self {
        let status = status.into();
        let outcome = TestOutcome::from_status(&status, success_token);
        Self {
            identifier: identifier.into(),
            short_name,
            status,
            outcome,
        }
    }

    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == TestOutcome::Passed
    }

    /// Check if the test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.outcome == TestOutcome::Failed
    }
}
