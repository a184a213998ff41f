//! Base64 transcoding for the contents API.
//!
//! Upstream payloads are standard base64 wrapped at 60 columns. Text is always encoded from
//! its UTF-8 bytes so multi-byte characters survive a round trip.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact).context("decode base64 payload")
}

pub fn encode_utf8_base64(text: &str) -> String {
    encode_base64(text.as_bytes())
}

pub fn decode_utf8_base64(payload: &str) -> Result<String> {
    let bytes = decode_base64(payload)?;
    String::from_utf8(bytes).context("payload is not valid UTF-8 text")
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
