//! Page Acquisition
//!
//! Fetches the markup of a page. The render subprocess is tried first; when
//! it fails and the request allows it, a plain HTTP GET is tried instead.
//! Exactly one strategy's output is returned, never a mix of both.

pub mod fetch;
pub mod render;

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Result;
use crate::options::{Options, Proxy, RenderCommand};

/// One acquisition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionRequest {
    pub url: Url,
    pub timeout: Duration,
    pub max_redirects: u32,
    pub user_agent: String,
    pub proxy: Option<Proxy>,
    pub allow_fallback: bool,
}

impl AcquisitionRequest {
    /// Request for `url` using the acquisition settings of `options`.
    #[must_use]
    pub fn new(url: Url, options: &Options) -> Self {
        Self {
            url,
            timeout: Duration::from_millis(options.timeout_ms),
            max_redirects: options.max_redirects,
            user_agent: options.user_agent.clone(),
            proxy: options.proxy.clone(),
            allow_fallback: options.fallback_request,
        }
    }

    /// Timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Acquired page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// URL after redirects.
    pub final_url: Url,
    pub raw_body: String,
}

/// Runs the render subprocess and the HTTP fallback.
///
/// Holds the fallback client, so one acquirer should serve many requests.
#[derive(Debug, Clone)]
pub struct PageAcquirer {
    renderer: RenderCommand,
    client: reqwest::Client,
    shutdown: CancellationToken,
}

impl PageAcquirer {
    /// # Errors
    ///
    /// `Config` if the fallback client cannot be built.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self {
            renderer: options.renderer.clone(),
            client: fetch::build_client(options)?,
            shutdown: CancellationToken::new(),
        })
    }

    /// Cancelling `token` kills any outstanding render subprocess and
    /// suppresses the fallback.
    #[must_use]
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    #[must_use]
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Acquire the page named by `request`.
    ///
    /// # Errors
    ///
    /// The render error when fallback is disabled (or shutdown is under
    /// way), otherwise the fallback's `FetchHttp` error.
    pub async fn acquire(&self, request: &AcquisitionRequest) -> Result<RenderResult> {
        let rendered = render::render(&self.renderer, request, &self.shutdown).await;

        match rendered {
            Ok(page) => {
                tracing::debug!(url = %request.url, final_url = %page.final_url, "rendered page");
                Ok(page)
            }
            Err(err)
                if err.is_render_failure()
                    && request.allow_fallback
                    && !self.shutdown.is_cancelled() =>
            {
                tracing::warn!(url = %request.url, error = %err, "render failed, falling back to HTTP");
                fetch::fetch(&self.client, request).await
            }
            Err(err) => Err(err),
        }
    }
}
