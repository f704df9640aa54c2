//! # pagesift
//!
//! Relevance-ranked summaries of web pages.
//!
//! Given a URL (and optionally its markup), pagesift produces a canonical
//! title, description, lead image, AMP link, a word count and a ranked list
//! of salient keywords and phrases. Pages are rendered through a headless
//! browser subprocess, with an optional plain HTTP fallback.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagesift::{analyze_html, Options};
//!
//! # async fn demo() -> pagesift::Result<()> {
//! let html = r#"<html><head><meta property="og:title" content="Hello &amp; World"></head>
//! <body><p>fox fox fox jumps</p></body></html>"#;
//!
//! let result = analyze_html("https://example.com/", html, &Options::default()).await?;
//! assert_eq!(result.title, "Hello & World");
//! assert_eq!(result.relevance[0].term, "fox");
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! - **Acquisition**: render subprocess bounded by `timeout + 1000ms`,
//!   HTTP fallback on request
//! - **Sanitizing**: head, body and source passes that prune scripts, media
//!   and boilerplate before the target subtree is read
//! - **Metadata**: Open Graph, Twitter card and `<title>` heuristics
//! - **Relevance**: stemmed n-gram frequencies, rescored with TF-IDF

mod error;
mod options;
mod patterns;
mod pipeline;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Removal rules used by the sanitizing passes.
pub mod selector;

/// Sanitizing passes (head, body, source).
pub mod sanitize;

/// Title, image, description and AMP link extraction.
pub mod metadata;

/// Common-word filtering and tokenization.
pub mod text;

/// Keyword candidates and TF-IDF rescoring.
pub mod relevance;

/// Render subprocess and HTTP fallback.
pub mod acquire;

/// URL validation and image URL resolution.
pub mod url_utils;

/// Response body decoding.
pub mod encoding;

// Public API - re-exports
pub use acquire::{AcquisitionRequest, PageAcquirer, RenderResult};
pub use error::{Error, ErrorKind, Result};
pub use options::{Options, Proxy, ProxyKind, RenderCommand, ScoringOptions, DEFAULT_USER_AGENT};
pub use pipeline::Analyzer;
pub use relevance::{NoStem, RelevanceScorer, Stem};
pub use result::{AnalysisResult, KeywordScore, Metadata};
pub use text::StopWords;

/// Analyzes markup supplied by the caller. Nothing is fetched.
///
/// The result's `url` is `url` as given.
///
/// # Errors
///
/// `Config` for invalid options, `InvalidUrl` unless `url` is an absolute
/// http(s) URL, `DomParseTimeout` if a sanitizing pass overruns.
pub async fn analyze_html(url: &str, html: &str, options: &Options) -> Result<AnalysisResult> {
    pipeline::analyze_document(url, html, options).await
}

/// Acquires `url` and analyzes it.
///
/// The result's `url` is the final URL after redirects. Callers analyzing
/// many pages should keep an [`Analyzer`] instead, which reuses its HTTP
/// connection pool.
///
/// # Errors
///
/// Any [`ErrorKind`]; acquisition failures are `RenderTimeout`,
/// `RenderProcessError` or, when fallback ran, `FetchHttpError`.
pub async fn analyze_url(url: &str, options: &Options) -> Result<AnalysisResult> {
    Analyzer::new(options.clone())?.analyze_url(url).await
}

/// Analyzes `body` when given, otherwise acquires `url` first.
///
/// # Errors
///
/// See [`analyze_html`] and [`analyze_url`].
pub async fn analyze(url: &str, body: Option<&str>, options: &Options) -> Result<AnalysisResult> {
    match body {
        Some(html) => analyze_html(url, html, options).await,
        None => analyze_url(url, options).await,
    }
}
