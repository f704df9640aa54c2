//! Plain HTTP fallback.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::options::Options;

use super::{AcquisitionRequest, RenderResult};

/// Idle connections kept per host by the fallback client.
const POOL_IDLE_PER_HOST: usize = 32;

/// Build the fallback client.
///
/// The client carries the user agent, redirect limit, proxy and request
/// timeout of `options`, and owns the connection pool.
///
/// # Errors
///
/// `Config` if the proxy URL is rejected or the TLS backend fails to
/// initialize.
pub fn build_client(options: &Options) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(Duration::from_millis(options.timeout_ms))
        .redirect(reqwest::redirect::Policy::limited(options.max_redirects as usize))
        .pool_max_idle_per_host(POOL_IDLE_PER_HOST);

    if let Some(proxy) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy.url())
            .map_err(|e| Error::Config(format!("invalid proxy {}: {e}", proxy.url())))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}

/// GET `request.url`, following redirects.
///
/// Succeeds only on `200 OK` with a non-empty body. The reported final URL
/// is the one the last redirect landed on.
///
/// # Errors
///
/// `FetchHttp` for transport errors, redirect overflow, any other status,
/// or an empty body.
pub async fn fetch(client: &reqwest::Client, request: &AcquisitionRequest) -> Result<RenderResult> {
    let url = request.url.as_str();
    let fail = |message: String| Error::FetchHttp {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(request.url.clone())
        .header(USER_AGENT, request.user_agent.as_str())
        .timeout(request.timeout)
        .send()
        .await
        .map_err(|e| fail(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(fail(format!("status {status}")));
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let bytes = response.bytes().await.map_err(|e| fail(e.to_string()))?;
    let raw_body = decode_body(&bytes, content_type.as_deref());
    if raw_body.trim().is_empty() {
        return Err(fail("empty body".into()));
    }

    tracing::debug!(%url, final_url = %final_url, bytes = bytes.len(), "fetched page");

    Ok(RenderResult { final_url, raw_body })
}
