//! Configuration options for acquisition and analysis.
//!
//! The `Options` struct controls how a page is acquired (render timeout,
//! redirects, proxy, HTTP fallback) and how it is analyzed (source
//! attachment, keyword scoring knobs).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// User agent sent by the renderer and the HTTP fallback unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "pagesift/",
    env!("CARGO_PKG_VERSION"),
    " (+",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Configuration options for page analysis.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use pagesift::Options;
///
/// let options = Options {
///     fallback_request: true,
///     timeout_ms: 8000,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Render timeout handed to the subprocess, in milliseconds.
    ///
    /// The subprocess is killed after `timeout_ms + 1000`. The HTTP
    /// fallback uses `timeout_ms` as its request timeout.
    ///
    /// Default: `5000`
    pub timeout_ms: u64,

    /// Maximum number of redirects followed.
    ///
    /// Default: `30`
    pub max_redirects: u32,

    /// User agent for the renderer and the HTTP fallback.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Optional proxy for both acquisition strategies.
    ///
    /// Default: `None`
    pub proxy: Option<Proxy>,

    /// Retry a failed render with a plain HTTP GET.
    ///
    /// Default: `false`
    pub fallback_request: bool,

    /// Attach the lightly-cleaned document as `source`.
    ///
    /// Also disables common-word filtering of the body text.
    ///
    /// Default: `false`
    pub return_source: bool,

    /// How the render subprocess is launched.
    pub renderer: RenderCommand,

    /// Keyword extraction knobs.
    pub scoring: ScoringOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_redirects: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            fallback_request: false,
            return_source: false,
            renderer: RenderCommand::default(),
            scoring: ScoringOptions::default(),
        }
    }
}

impl Options {
    /// Validates these options, returning `Error::Config` for the first
    /// invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be greater than 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("user_agent must not be empty".into()));
        }
        if self.renderer.program.as_os_str().is_empty() {
            return Err(Error::Config("renderer program must not be empty".into()));
        }
        if self.scoring.limit == 0 {
            return Err(Error::Config("scoring limit must be greater than 0".into()));
        }
        if self.scoring.max_ngram == 0 {
            return Err(Error::Config("scoring max_ngram must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Proxy protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    #[default]
    Socks5,
    Socks4,
    Http,
}

impl ProxyKind {
    fn scheme(self) -> &'static str {
        match self {
            Self::Socks5 => "socks5",
            Self::Socks4 => "socks4",
            Self::Http => "http",
        }
    }
}

/// Proxy endpoint used by both acquisition strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    #[serde(default)]
    pub kind: ProxyKind,
    pub host: String,
    pub port: u16,
}

impl Proxy {
    /// SOCKS5 proxy at `host:port`.
    #[must_use]
    pub fn socks5(host: impl Into<String>, port: u16) -> Self {
        Self {
            kind: ProxyKind::Socks5,
            host: host.into(),
            port,
        }
    }

    /// Parses `host:port` into a SOCKS5 proxy.
    pub fn parse(s: &str) -> Result<Self> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| Error::Config(format!("proxy must be host:port, got {s:?}")))?;
        if host.is_empty() {
            return Err(Error::Config(format!("proxy host is empty in {s:?}")));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid proxy port in {s:?}: {e}")))?;
        Ok(Self::socks5(host, port))
    }

    /// `host:port`, as passed to the renderer.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Proxy URL for the HTTP client.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}", self.kind.scheme(), self.address())
    }
}

/// How the render subprocess is launched.
///
/// The full argument vector is `program, pre_args..., <flags>, [script],
/// url, user_agent, max_redirects, timeout_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderCommand {
    /// Renderer executable.
    ///
    /// Default: `phantomjs`
    pub program: PathBuf,

    /// Arguments placed before the contract flags (launchers such as `sh -c`).
    ///
    /// Default: empty
    pub pre_args: Vec<String>,

    /// Load script placed between the flags and the positional arguments.
    ///
    /// The script is not shipped with this crate. The default is a relative
    /// path, resolved by the renderer against the current working
    /// directory; set an absolute path (or `--render-script` /
    /// `PAGESIFT_RENDER_SCRIPT` on the CLI) when running elsewhere.
    ///
    /// Default: `phantom-load.js`
    pub script: Option<PathBuf>,
}

impl Default for RenderCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("phantomjs"),
            pre_args: Vec::new(),
            script: Some(PathBuf::from("phantom-load.js")),
        }
    }
}

/// Keyword extraction knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringOptions {
    /// Maximum number of ranked keywords.
    ///
    /// Default: `20`
    pub limit: usize,

    /// Minimum occurrences for a candidate term.
    ///
    /// Default: `2`
    pub min_frequency: usize,

    /// Longest phrase, in tokens.
    ///
    /// Default: `3`
    pub max_ngram: usize,

    /// A shorter candidate is absorbed by a longer phrase containing it
    /// when `phrase_count / candidate_count >= phrase_cutoff`.
    ///
    /// Default: `0.5`
    pub phrase_cutoff: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            min_frequency: 2,
            max_ngram: 3,
            phrase_cutoff: 0.5,
        }
    }
}
