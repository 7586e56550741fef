// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for JSON report parsing
//!
//! Malformed documents must come back as errors, never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testgate_results::LogFormat;
use testgate_results::text::decode;

fuzz_target!(|data: &[u8]| {
    let format = LogFormat::JsonReport;
    if let Ok(text) = decode(data, format.decode_mode()) {
        let parser = format.parser();
        let _ = parser.permits_archive(&text);
        let _ = parser.parse(&text);
    }
});
