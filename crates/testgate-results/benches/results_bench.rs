// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{Criterion, criterion_group, criterion_main};
use testgate_results::{LogFormat, RunReport};

fn automation_log(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 3 {
            0 => format!("LogAutomationController: Display: Automation Test Succeeded (T{i} - Project.Suite.T{i})"),
            1 => format!("LogAutomationController: Error: Automation Test Failed (T{i} - Project.Suite.T{i})"),
            _ => format!("LogTemp: Display: unrelated engine output {i}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_report(records: usize) -> String {
    let tests = (0..records)
        .map(|i| {
            format!(
                r#"{{"fullTestPath":"Project.Suite.T{i}","state":"Success","errors":{}}}"#,
                i % 2
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"reportCreatedOn":"2026.01.17-02.33.06","tests":[{tests}]}}"#)
}

fn parse_benchmark(c: &mut Criterion) {
    let log = automation_log(10_000);
    let json = json_report(10_000);

    c.bench_function("automation_log_10k_lines", |b| {
        let parser = LogFormat::AutomationLog.parser();
        b.iter(|| {
            let results = parser.parse(std::hint::black_box(&log)).unwrap();
            RunReport::from_results(results)
        })
    });

    c.bench_function("json_report_10k_records", |b| {
        let parser = LogFormat::JsonReport.parser();
        b.iter(|| {
            let results = parser.parse(std::hint::black_box(&json)).unwrap();
            RunReport::from_results(results)
        })
    });
}

criterion_group!(benches, parse_benchmark);
criterion_main!(benches);
