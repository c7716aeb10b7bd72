//! Output transcoding.
//!
//! When an output encoding is configured, the rendered event text is
//! encoded incrementally; codepoints the target encoding cannot
//! represent come out as decimal numeric character references, which
//! an XML parser resolves back to the original characters.

use encoding_rs::{CoderResult, Encoding};

use crate::error::ConfigError;

/// Resolve a WHATWG encoding label, normalized through the output
/// encoding (UTF-16 labels encode as UTF-8 per the encode step).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, ConfigError> {
    Encoding::for_label(label.as_bytes())
        .map(Encoding::output_encoding)
        .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
}

/// Encode `text`, replacing unmappable codepoints with `&#<decimal>;`.
pub fn encode_with_char_refs(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 1024];
    let mut rest = text;
    loop {
        let (result, read, written, _replaced) = encoder.encode_from_utf8(rest, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        rest = &rest[read..];
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => continue,
        }
    }
    out
}
