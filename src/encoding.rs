//! Response body decoding.
//!
//! The HTTP fallback receives raw bytes. The charset is taken from the
//! `Content-Type` header when it names one, else from a `<meta>` declaration
//! near the top of the document, else UTF-8.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes scanned for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// `charset=` parameter of a header value, or of an http-equiv meta tag.
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s>]+)"#).expect("CHARSET_PARAM_RE regex")
});

/// `<meta charset="...">` or `<meta http-equiv=... content="...; charset=...">`.
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"';\s>]+)"#).expect("META_CHARSET_RE regex")
});

/// Encoding named by a `Content-Type` header value, if recognized.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = CHARSET_PARAM_RE.captures(content_type)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Encoding declared by a `<meta>` tag in the first bytes of the document.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let label = META_CHARSET_RE.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}

/// Decode a response body to UTF-8.
///
/// Invalid sequences become U+FFFD; decoding never fails.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
