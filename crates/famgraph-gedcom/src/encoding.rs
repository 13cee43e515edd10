//! Byte-to-text decoding.
//!
//! GEDCOM files in the wild are UTF-8 (with or without BOM), UTF-16 with a
//! BOM, or legacy 8-bit text (ANSEL, Windows-1252, Latin-1). The 8-bit
//! variants are read as Latin-1, which keeps every ASCII tag and pointer
//! intact and maps each remaining byte to one character.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Encoding detected by [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8
    Utf8,
    /// UTF-16, little endian
    Utf16Le,
    /// UTF-16, big endian
    Utf16Be,
    /// Latin-1 fallback
    Latin1,
}

/// Decode `bytes` to text.
///
/// Returns a message describing the failure when the bytes are not UTF-8 and
/// `latin1_fallback` is off.
pub fn decode(bytes: &[u8], latin1_fallback: bool) -> Result<(Cow<'_, str>, TextEncoding), String> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes).map(|t| (Cow::Owned(t), TextEncoding::Utf16Le));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes).map(|t| (Cow::Owned(t), TextEncoding::Utf16Be));
    }

    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((Cow::Borrowed(text), TextEncoding::Utf8)),
        Err(_) if latin1_fallback => Ok((
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Latin1,
        )),
        Err(e) => Err(format!("invalid UTF-8 at byte {}", e.valid_up_to())),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err("odd number of bytes in UTF-16 input".to_string());
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| format!("invalid UTF-16: {e}"))
}
