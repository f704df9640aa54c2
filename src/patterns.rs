//! Compiled regex patterns shared across the pipeline.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Normalization
// =============================================================================

/// Runs of whitespace, collapsed to a single space.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Any single non-word character.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("NON_WORD regex"));

/// Stray digits, quotes, angle brackets and slashes inside a token.
pub static STRAY_TOKEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\d'"”<>/]"#).expect("STRAY_TOKEN_CHARS regex"));

/// A run of word characters, used by the keyword and TF-IDF tokenizers.
pub static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("WORD regex"));

// =============================================================================
// Metadata Cleaning
// =============================================================================

/// Tag-like fragments in titles and descriptions, escaped or literal
/// (`&lt;b&gt;`, `</em>`).
pub static BAD_TITLE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&lt;/?\w+?&gt;|</?[a-z][a-z0-9]*\s*/?>").expect("BAD_TITLE_TAGS regex")
});

/// Encoded ampersand.
pub static ENCODED_AMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&amp;").expect("ENCODED_AMP regex"));

/// Image URLs that are already absolute (`http:`, `https:`, scheme-relative, `data:`).
pub static ABSOLUTE_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((https?:)?//|data:)").expect("ABSOLUTE_IMAGE_URL regex")
});

// =============================================================================
// Acquisition
// =============================================================================

/// Error marker printed by the render subprocess.
pub static RENDER_ERROR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[error\]").expect("RENDER_ERROR_MARKER regex"));
