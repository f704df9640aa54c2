//! Extraction Pipeline
//!
//! Sequences acquisition, the sanitizing passes, metadata extraction,
//! normalization and scoring into one [`AnalysisResult`].
//!
//! The head and body passes run concurrently (each on the blocking pool
//! under its own timeout); scoring waits for both. Either pass failing
//! fails the whole call.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::acquire::{AcquisitionRequest, PageAcquirer};
use crate::error::{Error, Result};
use crate::metadata::extract_metadata;
use crate::options::Options;
use crate::relevance::{english_stemmer, RelevanceScorer, Stem};
use crate::result::AnalysisResult;
use crate::sanitize::{sanitize_with_timeout, SanitizationSpec, SANITIZE_TIMEOUT};
use crate::text::{count_words, normalize, StopWords};
use crate::url_utils::parse_page_url;

/// Borrowed view of everything the offline stages need.
struct Extraction<'a> {
    options: &'a Options,
    stop_words: &'a StopWords,
    stemmer: &'a dyn Stem,
    sanitize_timeout: Duration,
}

impl Extraction<'_> {
    async fn run(&self, url: String, page_url: &Url, raw: &str) -> Result<AnalysisResult> {
        let raw: Arc<str> = Arc::from(raw);
        let return_source = self.options.return_source;
        let bound = self.sanitize_timeout;

        let metadata = async {
            let head = sanitize_with_timeout(Arc::clone(&raw), SanitizationSpec::METADATA, bound).await?;
            Ok::<_, Error>(extract_metadata(&head, page_url))
        };
        let body = async {
            let body = sanitize_with_timeout(Arc::clone(&raw), SanitizationSpec::BODY, bound).await?;
            Ok::<_, Error>(normalize(&body.text, self.stop_words, !return_source))
        };
        let source = async {
            if return_source {
                let doc = sanitize_with_timeout(Arc::clone(&raw), SanitizationSpec::SOURCE, bound).await?;
                Ok::<_, Error>(Some(doc.html))
            } else {
                Ok(None)
            }
        };

        let (metadata, text, source) = tokio::try_join!(metadata, body, source)?;

        let total_words = count_words(&text);
        let scorer = RelevanceScorer::new(self.stop_words, self.stemmer, &self.options.scoring);
        let relevance = scorer.score(&metadata.title, &text);

        tracing::debug!(%url, total_words, keywords = relevance.len(), "analyzed page");

        Ok(AnalysisResult {
            url,
            title: metadata.title,
            description: metadata.description,
            image: metadata.image,
            amphtml: metadata.amphtml,
            total_words,
            relevance,
            source,
        })
    }
}

/// Reusable analyzer.
///
/// Owns the acquirer (and with it the HTTP connection pool), the common-word
/// set and the stemmer.
///
/// ```no_run
/// use pagesift::{Analyzer, Options};
///
/// # async fn run() -> pagesift::Result<()> {
/// let analyzer = Analyzer::new(Options::default())?;
/// let result = analyzer.analyze_url("https://example.com/").await?;
/// println!("{}: {} words", result.title, result.total_words);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Analyzer {
    options: Options,
    acquirer: PageAcquirer,
    stop_words: Cow<'static, StopWords>,
    stemmer: Arc<dyn Stem>,
}

impl Analyzer {
    /// # Errors
    ///
    /// `Config` if `options` fail validation or the HTTP client cannot be
    /// built.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        let acquirer = PageAcquirer::new(&options)?;
        Ok(Self {
            options,
            acquirer,
            stop_words: Cow::Borrowed(StopWords::bundled()),
            stemmer: Arc::new(english_stemmer()),
        })
    }

    /// Kill outstanding render subprocesses when `token` is cancelled.
    #[must_use]
    pub fn with_shutdown(mut self, token: tokio_util::sync::CancellationToken) -> Self {
        self.acquirer = self.acquirer.with_shutdown(token);
        self
    }

    /// Replace the English stemmer used for keyword candidates.
    #[must_use]
    pub fn with_stemmer(mut self, stemmer: impl Stem + 'static) -> Self {
        self.stemmer = Arc::new(stemmer);
        self
    }

    /// Replace the bundled common-word list.
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Cow::Owned(stop_words);
        self
    }

    /// Options this analyzer was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Analyze `body` when given, otherwise acquire `url` first.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze_html`] and [`Analyzer::analyze_url`].
    pub async fn analyze(&self, url: &str, body: Option<&str>) -> Result<AnalysisResult> {
        match body {
            Some(html) => self.analyze_html(url, html).await,
            None => self.analyze_url(url).await,
        }
    }

    /// Acquire `url`, then analyze it. The result's `url` is the final URL.
    ///
    /// # Errors
    ///
    /// `InvalidUrl`, any acquisition error, or `DomParseTimeout`.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult> {
        let page_url = parse_page_url(url)?;
        let request = AcquisitionRequest::new(page_url, &self.options);
        let page = self.acquirer.acquire(&request).await?;

        self.extraction()
            .run(page.final_url.to_string(), &page.final_url, &page.raw_body)
            .await
    }

    /// Analyze markup supplied by the caller; nothing is fetched.
    ///
    /// # Errors
    ///
    /// `InvalidUrl` or `DomParseTimeout`.
    pub async fn analyze_html(&self, url: &str, html: &str) -> Result<AnalysisResult> {
        let page_url = parse_page_url(url)?;
        self.extraction().run(url.trim().to_string(), &page_url, html).await
    }

    fn extraction(&self) -> Extraction<'_> {
        Extraction {
            options: &self.options,
            stop_words: &self.stop_words,
            stemmer: self.stemmer.as_ref(),
            sanitize_timeout: SANITIZE_TIMEOUT,
        }
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("options", &self.options)
            .field("acquirer", &self.acquirer)
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

/// Analyze caller-supplied markup with the bundled common words and the
/// English stemmer, without building an HTTP client.
///
/// # Errors
///
/// `Config`, `InvalidUrl` or `DomParseTimeout`.
pub async fn analyze_document(url: &str, html: &str, options: &Options) -> Result<AnalysisResult> {
    options.validate()?;
    let page_url = parse_page_url(url)?;
    let stemmer = english_stemmer();
    Extraction {
        options,
        stop_words: StopWords::bundled(),
        stemmer: &stemmer,
        sanitize_timeout: SANITIZE_TIMEOUT,
    }
    .run(url.trim().to_string(), &page_url, html)
    .await
}
