// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the line-oriented grammars
//!
//! Raw bytes go through lossy decoding first, as they do in the gate. Neither
//! grammar may fail or panic on any input.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testgate_results::LogFormat;
use testgate_results::text::decode;

fuzz_target!(|data: &[u8]| {
    for format in [LogFormat::AutomationLog, LogFormat::ResultLog] {
        let text = decode(data, format.decode_mode()).expect("lossy decoding never fails");
        let results = format.parser().parse(&text).expect("line parsers never fail");
        assert!(results.len() <= text.lines().count());
    }
});
