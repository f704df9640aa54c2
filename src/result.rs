//! Result types for analysis output.
//!
//! This module defines the structured output of a page analysis: the
//! head-derived metadata, the ranked keywords, and the assembled result.

use serde::{Deserialize, Serialize};

/// Title used when a page carries no title signal at all.
pub const UNTITLED: &str = "Untitled";

/// Metadata extracted from the head of an HTML document.
///
/// Missing fields are empty strings rather than errors; `title` is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title (`og:title`, `twitter:title`, `<title>`, else "Untitled").
    pub title: String,

    /// Absolute lead image URL, or empty.
    pub image: String,

    /// `og:description`, or empty.
    pub description: String,

    /// `<link rel="amphtml">` target, or empty.
    pub amphtml: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            image: String::new(),
            description: String::new(),
            amphtml: String::new(),
        }
    }
}

/// A ranked keyword or phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    /// Surface form of the term or phrase.
    pub term: String,

    /// Occurrence count from candidate extraction.
    #[serde(rename = "tf")]
    pub frequency_score: f64,

    /// Single-document TF-IDF value of the term.
    #[serde(rename = "score")]
    pub tfidf_score: f64,
}

/// Result of analyzing one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Page URL (the post-redirect URL when acquired internally).
    pub url: String,

    pub title: String,

    pub description: String,

    pub image: String,

    pub amphtml: String,

    /// Whitespace-token count of the text fed into scoring.
    pub total_words: usize,

    /// At most `limit` keywords in frequency-rank order.
    pub relevance: Vec<KeywordScore>,

    /// Scripts and styles stripped copy of the document, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}
