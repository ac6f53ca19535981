//! Lossy decoding of lookup path segments.
//!
//! axum's `Path` extractor rejects percent-encoded bytes that are not UTF-8
//! with a plain-text 400. Lookups decode the raw path themselves instead, so
//! a malformed segment still resolves to a "not found" body.

use std::borrow::Cow;

/// Percent-decoded, non-empty segments of `path`. Invalid UTF-8 sequences
/// become U+FFFD.
pub fn lossy_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let bytes: Cow<[u8]> = urlencoding::decode_binary(raw.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        })
        .collect()
}

/// Segment at `index`, or `""` when the path is shorter.
pub fn segment(segments: &[String], index: usize) -> &str {
    segments.get(index).map(String::as_str).unwrap_or_default()
}
