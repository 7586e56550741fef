// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for testgate
//!
//! These tests use proptest to verify that a full gate run prints one line
//! per recognized result and reaches the verdict implied by the counts.


use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use testgate::config::Config;
use testgate::gate;
use testgate_results::Verdict;
use test_utils::TempTestDir;

// ============================================================================
// Strategies
// ============================================================================

/// A log line and, for result lines, whether the test passed
fn automation_line() -> impl Strategy<Value = (String, Option<bool>)> {
    prop_oneof![
        (
            "[A-Za-z]{1,10}",
            "[A-Za-z]{1,10}(\\.[A-Za-z0-9() -]{0,9}[A-Za-z0-9()]){1,4}",
            any::<bool>(),
        )
            .prop_map(
            |(short, long, passed)| {
                let status = if passed { "Succeeded" } else { "Failed" };
                (
                    format!("LogAutomationController: Display: Automation Test {status} ({short} - {long})"),
                    Some(passed),
                )
            }
        ),
        "[A-Za-z0-9 :.]{0,80}".prop_map(|noise| (noise, None)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_gate_output_matches_log(lines in proptest::collection::vec(automation_line(), 0..30)) {
        let temp = TempTestDir::new("prop_gate");
        let content = lines.iter().map(|(line, _)| line.as_str()).collect::<Vec<_>>().join("\n");
        let log = temp.create_file("Automation.log", content);

        let passed = lines.iter().filter(|(_, r)| *r == Some(true)).count();
        let failed = lines.iter().filter(|(_, r)| *r == Some(false)).count();

        let mut out = Vec::new();
        let now = Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap();
        let outcome = gate::run_to(&Config::new(&log, "1"), &mut out, &now).unwrap();
        let stdout = String::from_utf8(out).unwrap();

        prop_assert_eq!(outcome.report.passed().len(), passed);
        prop_assert_eq!(outcome.report.failed().len(), failed);
        prop_assert_eq!(stdout.lines().count(), passed + failed + 1);
        prop_assert_eq!(outcome.verdict, Verdict::decide(true, passed, failed));
        prop_assert_eq!(temp.archive_names().len(), 1);
    }

    #[test]
    fn prop_build_ids_without_separators_archive(build_id in "[A-Za-z0-9._-]{1,24}") {
        let temp = TempTestDir::new("prop_build_id");
        let log = temp.create_file("Results.log", "Result={Passed} Name={A} Path={P.A}\n");

        let mut out = Vec::new();
        let now = Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap();
        let outcome = gate::run_to(&Config::new(&log, build_id.as_str()), &mut out, &now).unwrap();

        let record = outcome.archive.expect("archive record");
        prop_assert_eq!(record.copy_path.parent(), Some(temp.path()));
        prop_assert_eq!(std::fs::read(&record.copy_path).unwrap(), std::fs::read(&log).unwrap());
    }
}
