// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Aggregation of parsed results into a run report

use serde::Serialize;

use crate::result::TestResult;
use crate::verdict::Verdict;

/// Passed and failed results of one invocation
///
/// Both buckets keep the order in which results appeared in the log.
/// Repeated identifiers are kept, since a retried test shows up once per
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    passed: Vec<TestResult>,
    failed: Vec<TestResult>,
    source_existed: bool,
}

impl RunReport {
    /// Partition results from an existing source
    #[must_use]
    pub fn from_results(results: impl IntoIterator<Item = TestResult>) -> Self {
        let (passed, failed): (Vec<_>, Vec<_>) = results.into_iter().partition(TestResult::passed);
        Self {
            passed,
            failed,
            source_existed: true,
        }
    }

    /// Report for a source file that does not exist
    #[must_use]
    pub fn missing_source() -> Self {
        Self {
            passed: Vec::new(),
            failed: Vec::new(),
            source_existed: false,
        }
    }

    /// Passed results, in log order
    #[must_use]
    pub fn passed(&self) -> &[TestResult] {
        &self.passed
    }

    /// Failed results, in log order
    #[must_use]
    pub fn failed(&self) -> &[TestResult] {
        &self.failed
    }

    /// Whether the source file existed
    #[must_use]
    pub fn source_existed(&self) -> bool {
        self.source_existed
    }

    /// Number of recognized results
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    /// Identifiers of the failed tests
    #[must_use]
    pub fn failing_identifiers(&self) -> Vec<&str> {
        self.failed.iter().map(|r| r.identifier.as_str()).collect()
    }

    /// Decide the build verdict for this report
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::decide(self.source_existed, self.passed.len(), self.failed.len())
    }
}
