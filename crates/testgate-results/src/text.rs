// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Byte-order-mark aware text decoding
//!
//! Automation tooling writes logs and reports with a UTF-8 BOM or as UTF-16
//! depending on the platform. Decoding strips the marker so it never ends up
//! glued to the first key or line.

use std::borrow::Cow;

use crate::error::ResultsError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// How to treat bytes that are not valid in the detected encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Reject invalid input with `ResultsError::Encoding`
    Strict,
    /// Replace invalid sequences with U+FFFD
    Lossy,
}

/// Decode raw file contents into text
///
/// # Errors
///
/// Returns `ResultsError::Encoding` in strict mode if the bytes are not
/// valid for the detected encoding.
pub fn decode(bytes: &[u8], mode: DecodeMode) -> Result<Cow<'_, str>, ResultsError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return decode_utf8(rest, mode);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes, mode).map(Cow::Owned);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes, mode).map(Cow::Owned);
    }
    decode_utf8(bytes, mode)
}

fn decode_utf8(bytes: &[u8], mode: DecodeMode) -> Result<Cow<'_, str>, ResultsError> {
    match mode {
        DecodeMode::Lossy => Ok(String::from_utf8_lossy(bytes)),
        DecodeMode::Strict => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| ResultsError::Encoding {
                message: e.to_string(),
            }),
    }
}

fn decode_utf16(
    bytes: &[u8],
    to_unit: fn([u8; 2]) -> u16,
    mode: DecodeMode,
) -> Result<String, ResultsError> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() && mode == DecodeMode::Strict {
        return Err(ResultsError::Encoding {
            message: "odd number of bytes in UTF-16 input".to_string(),
        });
    }
    let units: Vec<u16> = chunks.map(|pair| to_unit([pair[0], pair[1]])).collect();
    match mode {
        DecodeMode::Lossy => Ok(String::from_utf16_lossy(&units)),
        DecodeMode::Strict => String::from_utf16(&units).map_err(|e| ResultsError::Encoding {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_le(text: &str) -> Vec<u8> {
        let mut bytes = UTF16_LE_BOM.to_vec();
        bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        bytes
    }

    #[test]
    fn test_plain_utf8_is_borrowed() {
        let decoded = decode(b"{\"a\":1}", DecodeMode::Strict).expect("decode");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "{\"a\":1}");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let decoded = decode(b"\xEF\xBB\xBF{\"a\":1}", DecodeMode::Strict).expect("decode");
        assert_eq!(decoded, "{\"a\":1}");
    }

    #[test]
    fn test_utf16_le_with_bom() {
        let bytes = utf16_le("Result={Passed}");
        let decoded = decode(&bytes, DecodeMode::Strict).expect("decode");
        assert_eq!(decoded, "Result={Passed}");
    }

    #[test]
    fn test_utf16_be_with_bom() {
        let mut bytes = UTF16_BE_BOM.to_vec();
        bytes.extend("ok".encode_utf16().flat_map(u16::to_be_bytes));
        assert_eq!(decode(&bytes, DecodeMode::Strict).expect("decode"), "ok");
    }

    #[test]
    fn test_invalid_utf8_strict_vs_lossy() {
        let bytes = b"line one\n\xFF\xFEgarbage";
        // No BOM at the start, so this is treated as UTF-8
        assert!(matches!(
            decode(bytes, DecodeMode::Strict),
            Err(ResultsError::Encoding { .. })
        ));
        let lossy = decode(bytes, DecodeMode::Lossy).expect("lossy never fails");
        assert!(lossy.starts_with("line one\n"));
    }

    #[test]
    fn test_odd_utf16_length() {
        let mut bytes = utf16_le("ab");
        bytes.push(0x41);
        assert!(decode(&bytes, DecodeMode::Strict).is_err());
        assert_eq!(decode(&bytes, DecodeMode::Lossy).expect("lossy"), "ab");
    }
}
