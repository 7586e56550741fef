// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line-oriented log grammars
//!
//! The automation controller interleaves test results with unrelated engine
//! output, so both grammars scan line by line and skip anything that does not
//! match. The two patterns are kept separate: feeding one grammar's log to the
//! other's parser yields no results.
//!
//! # Example
//!
//! ```
//! use testgate_results::{FormatParser, ResultLogParser};
//!
//! let log = "LogAutomationController: Display: Test Completed. \
//!            Result={Failed} Name={Add} Path={Project.Math.Add}";
//! let results = ResultLogParser.parse(log).unwrap();
//! assert_eq!(results[0].identifier, "Project.Math.Add");
//! assert!(results[0].failed());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::error::ResultsError;
use crate::format::{FormatParser, LogFormat};
use crate::result::TestResult;

/// Substring that identifies a result log line
pub(crate) const RESULT_LOG_MARKER: &str = "Result={";

/// Substring that identifies an automation log result line
const AUTOMATION_LOG_MARKER: &str = "Automation Test ";

/// `Automation Test Succeeded (Short - Long.Path)`
///
/// The status may span several words and the long name runs to the last
/// closing parenthesis on the line, so names like `Load(Level1)` survive.
static AUTOMATION_LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Automation Test (?P<status>[^(]+?) \((?P<short>.+?) - (?P<long>.+)\)\s*$")
        .expect("automation log pattern is valid")
});

/// `Result={Passed} Name={Short} Path={Long.Path}`
static RESULT_LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Result=\{(?P<status>[^}]*)\}.*?Name=\{(?P<short>[^}]*)\}.*?Path=\{(?P<long>[^}]*)\}",
    )
    .expect("result log pattern is valid")
});

/// Parser for the oldest grammar, where the status precedes the names
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomationLogParser;

/// Parser for the `Result={..} Name={..} Path={..}` grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultLogParser;

impl FormatParser for AutomationLogParser {
    fn format(&self) -> LogFormat {
        LogFormat::AutomationLog
    }

    fn success_token(&self) -> &'static str {
        "Succeeded"
    }

    fn parse(&self, content: &str) -> Result<Vec<TestResult>, ResultsError> {
        Ok(scan_lines(
            content,
            &AUTOMATION_LOG_LINE,
            AUTOMATION_LOG_MARKER,
            self.success_token(),
        ))
    }

    fn permits_archive(&self, _content: &str) -> bool {
        true
    }
}

impl FormatParser for ResultLogParser {
    fn format(&self) -> LogFormat {
        LogFormat::ResultLog
    }

    fn success_token(&self) -> &'static str {
        "Passed"
    }

    fn parse(&self, content: &str) -> Result<Vec<TestResult>, ResultsError> {
        Ok(scan_lines(
            content,
            &RESULT_LOG_LINE,
            RESULT_LOG_MARKER,
            self.success_token(),
        ))
    }

    fn permits_archive(&self, _content: &str) -> bool {
        true
    }
}

/// Match every line against `pattern`, keeping at most one result per line
///
/// Lines that carry `marker` but do not match are reported at `warn` level,
/// since they usually mean a result line changed shape.
fn scan_lines(
    content: &str,
    pattern: &Regex,
    marker: &str,
    success_token: &str,
) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in content.lines().enumerate() {
        let Some(caps) = pattern.captures(line) else {
            if line.contains(marker) {
                warn!(line = index + 1, text = line, "unrecognized result line");
            }
            skipped += 1;
            continue;
        };
        let status = &caps["status"];
        let short = caps["short"].trim();
        let long = caps["long"].trim();
        trace!(line = index + 1, status, test = long, "matched result line");
        results.push(TestResult::new(
            long,
            Some(short.to_string()),
            status,
            success_token,
        ));
    }

    debug!(
        matched = results.len(),
        skipped, "finished scanning log lines"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TestOutcome;
    use similar_asserts::assert_eq;

    const AUTOMATION_LOG: &str = "\
[2026.01.17-02.33.06:123][  0]LogInit: Display: Engine is initialized.
[2026.01.17-02.33.07:001][  1]LogAutomationController: Display: Automation Test Succeeded (Add - Project.Math.Add)
[2026.01.17-02.33.07:002][  1]LogAutomationController: Error: Automation Test Failed (Sub - Project.Math.Sub)
[2026.01.17-02.33.07:003][  1]LogTemp: Warning: unrelated output (with - parens)
[2026.01.17-02.33.07:004][  1]LogAutomationController: Display: Automation Test Succeeded (Add - Project.Math.Add)
";

    const RESULT_LOG: &str = "\
LogInit: Display: Engine is initialized.
LogAutomationController: Display: Test Completed. Result={Passed} Name={Add} Path={Project.Math.Add}
LogAutomationController: Error: Test Completed. Result={Fail} Name={Sub} Path={Project.Math.Sub}
LogAutomationController: Display: Test Completed. Result={Skipped} Name={Mul} Path={Project.Math.Mul}
";

    #[test]
    fn test_automation_log_single_success() {
        let results = AutomationLogParser
            .parse("... Automation Test Succeeded (S - my.Long.Test)")
            .expect("never fails");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "my.Long.Test");
        assert_eq!(results[0].short_name.as_deref(), Some("S"));
        assert_eq!(results[0].outcome, TestOutcome::Passed);
    }

    #[test]
    fn test_automation_log_mixed() {
        let results = AutomationLogParser.parse(AUTOMATION_LOG).expect("never fails");
        let names: Vec<_> = results.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(
            names,
            vec!["Project.Math.Add", "Project.Math.Sub", "Project.Math.Add"]
        );
        assert!(results[0].passed());
        assert!(results[1].failed());
        assert_eq!(results[1].status, "Failed");
    }

    #[test]
    fn test_automation_log_parentheses_in_names() {
        let log = "\
Automation Test Succeeded (Add - Project.Math.Add)
Automation Test Failed (Load - Project.Maps.Load(Level1))
Automation Test Failed (Load (fast) - Project.Maps.Load(Level1, Fast))
";
        let results = AutomationLogParser.parse(log).expect("never fails");
        let names: Vec<_> = results.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Project.Math.Add",
                "Project.Maps.Load(Level1)",
                "Project.Maps.Load(Level1, Fast)"
            ]
        );
        assert!(results[1].failed());
        assert_eq!(results[2].short_name.as_deref(), Some("Load (fast)"));
        assert!(results[2].failed());
    }

    #[test]
    fn test_automation_log_multi_word_status_is_kept() {
        let results = AutomationLogParser
            .parse("Automation Test Succeeded With Warnings (W - Project.W)")
            .expect("never fails");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "Project.W");
        assert_eq!(results[0].status, "Succeeded With Warnings");
        assert!(results[0].failed());
    }

    #[test]
    fn test_result_log_single_failure() {
        let results = ResultLogParser
            .parse("Result={Failed}...Name={S}...Path={my.Long.Test}")
            .expect("never fails");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "my.Long.Test");
        assert_eq!(results[0].outcome, TestOutcome::Failed);
    }

    #[test]
    fn test_result_log_unknown_status_fails() {
        let results = ResultLogParser.parse(RESULT_LOG).expect("never fails");
        assert_eq!(results.len(), 3);
        assert!(results[0].passed());
        assert_eq!(results[1].status, "Fail");
        assert!(results[1].failed());
        assert!(results[2].failed());
    }

    #[test]
    fn test_grammars_do_not_cross_match() {
        assert!(AutomationLogParser.parse(RESULT_LOG).unwrap().is_empty());
        assert!(ResultLogParser.parse(AUTOMATION_LOG).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let log = "Result={Passed} Name={A} Path={P.A}\r\nResult={Passed} Name={B} Path={P.B}\r\n";
        let results = ResultLogParser.parse(log).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].identifier, "P.B");
        assert!(results.iter().all(TestResult::passed));
    }

    #[test]
    fn test_empty_and_noise_inputs() {
        assert!(AutomationLogParser.parse("").unwrap().is_empty());
        assert!(ResultLogParser.parse("\n\n  \n").unwrap().is_empty());
        assert!(
            AutomationLogParser
                .parse("Automation Test Succeeded without names")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_line_parsers_always_archive() {
        assert!(AutomationLogParser.permits_archive(""));
        assert!(ResultLogParser.permits_archive("garbage"));
    }
}
