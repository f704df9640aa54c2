//! Error types for pagesift.
//!
//! This module defines the error types returned by acquisition and
//! analysis. Metadata fields that cannot be found are never errors; they
//! degrade to defaults instead.

/// Error type for acquisition and analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL is not an absolute `http`/`https` URL with a host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The render subprocess did not exit within `timeout + 1000ms`.
    #[error("Process exceeded timeout of {timeout_ms}ms retrieving url[{url}]")]
    RenderTimeout {
        /// URL being rendered.
        url: String,
        /// Effective bound that expired, in milliseconds.
        timeout_ms: u64,
    },

    /// The render subprocess failed, reported an error marker, or was
    /// terminated because the owning process is shutting down.
    #[error("{message}")]
    RenderProcess {
        /// URL being rendered.
        url: String,
        /// Human-readable failure description.
        message: String,
    },

    /// The HTTP fallback fetch did not return a 200 with a non-empty body.
    #[error("Webpage could not resolve url[{url}]: {message}")]
    FetchHttp {
        /// URL being fetched.
        url: String,
        /// Status or transport error.
        message: String,
    },

    /// A sanitizing pass did not finish within its bound.
    #[error("Timed out trying to get {target} element")]
    DomParseTimeout {
        /// Target subtree of the pass (`head`, `body` or `html`).
        target: &'static str,
    },

    /// Options failed validation.
    #[error("Invalid options: {0}")]
    Config(String),

    /// A blocking worker panicked or was cancelled by the runtime.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Taxonomy member of an [`Error`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    RenderTimeout,
    RenderProcessError,
    FetchHttpError,
    DomParseTimeout,
    Config,
    Internal,
}

impl Error {
    /// Returns the taxonomy member of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::RenderTimeout { .. } => ErrorKind::RenderTimeout,
            Self::RenderProcess { .. } => ErrorKind::RenderProcessError,
            Self::FetchHttp { .. } => ErrorKind::FetchHttpError,
            Self::DomParseTimeout { .. } => ErrorKind::DomParseTimeout,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether a failed render may be retried through the HTTP fallback.
    pub(crate) fn is_render_failure(&self) -> bool {
        matches!(self, Self::RenderTimeout { .. } | Self::RenderProcess { .. })
    }
}

/// Result type alias for pagesift operations.
pub type Result<T> = std::result::Result<T, Error>;
