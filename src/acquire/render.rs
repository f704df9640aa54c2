//! Render subprocess.
//!
//! The renderer is an opaque executable (phantomjs with a load script by
//! default). It is called as
//!
//! ```text
//! program [pre_args...] --ignore-ssl-errors=true --load-images=false
//!         [--proxy=host:port] [script] url user_agent max_redirects timeout_ms
//! ```
//!
//! and prints the final URL on its first line followed by the rendered
//! document. The process is owned by a single future which races it against
//! the deadline and the shutdown token; every exit path leaves the child
//! killed or reaped.

use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout, Command};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::options::RenderCommand;
use crate::patterns::RENDER_ERROR_MARKER;
use crate::url_utils::parse_page_url;

use super::{AcquisitionRequest, RenderResult};

/// Added to the request timeout to get the kill deadline.
pub const KILL_GRACE: Duration = Duration::from_millis(1000);

enum Outcome {
    Exited(std::io::Result<(ExitStatus, Vec<u8>)>),
    TimedOut,
    Cancelled,
}

/// Full argument vector after the program name.
#[must_use]
pub fn render_args(command: &RenderCommand, request: &AcquisitionRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = command.pre_args.iter().map(OsString::from).collect();

    args.push("--ignore-ssl-errors=true".into());
    args.push("--load-images=false".into());
    if let Some(proxy) = &request.proxy {
        args.push(format!("--proxy={}", proxy.address()).into());
    }
    if let Some(script) = &command.script {
        args.push(script.as_os_str().to_owned());
    }

    args.push(request.url.as_str().into());
    args.push(request.user_agent.as_str().into());
    args.push(request.max_redirects.to_string().into());
    args.push(request.timeout_ms().to_string().into());

    args
}

/// Render `request.url` through the subprocess.
///
/// # Errors
///
/// - `RenderTimeout` when the process outlives `timeout + 1000ms`
/// - `RenderProcess` on spawn failure, non-zero exit, an error marker in the
///   output, an unusable final URL, or shutdown
pub async fn render(
    command: &RenderCommand,
    request: &AcquisitionRequest,
    shutdown: &CancellationToken,
) -> Result<RenderResult> {
    let url = request.url.as_str();
    let args = render_args(command, request);
    tracing::trace!(program = %command.program.display(), ?args, "spawning renderer");

    let mut child = Command::new(&command.program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::RenderProcess {
            url: url.to_string(),
            message: format!(
                "Error occurred scraping {url}: cannot start {}: {e}",
                command.program.display()
            ),
        })?;

    let stdout = child.stdout.take().ok_or_else(|| Error::Internal("renderer stdout not captured".into()))?;

    let deadline = request.timeout + KILL_GRACE;
    let outcome = {
        let run = collect_output(&mut child, stdout);
        tokio::select! {
            res = run => Outcome::Exited(res),
            () = tokio::time::sleep(deadline) => Outcome::TimedOut,
            () = shutdown.cancelled() => Outcome::Cancelled,
        }
    };

    match outcome {
        Outcome::Exited(Ok((status, output))) => parse_output(url, status, &output),
        Outcome::Exited(Err(e)) => {
            terminate(&mut child).await;
            Err(Error::RenderProcess {
                url: url.to_string(),
                message: format!("Error occurred scraping {url}: {e}"),
            })
        }
        Outcome::TimedOut => {
            terminate(&mut child).await;
            Err(Error::RenderTimeout {
                url: url.to_string(),
                timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            })
        }
        Outcome::Cancelled => {
            terminate(&mut child).await;
            Err(Error::RenderProcess {
                url: url.to_string(),
                message: format!("Process terminated. Canceling child process retrieving url[{url}]"),
            })
        }
    }
}

async fn collect_output(child: &mut Child, mut stdout: ChildStdout) -> std::io::Result<(ExitStatus, Vec<u8>)> {
    let mut output = Vec::new();
    stdout.read_to_end(&mut output).await?;
    let status = child.wait().await?;
    Ok((status, output))
}

/// Kill and reap the child.
async fn terminate(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "renderer already gone");
    }
}

fn parse_output(url: &str, status: ExitStatus, output: &[u8]) -> Result<RenderResult> {
    let output = String::from_utf8_lossy(output);

    if !status.success() || RENDER_ERROR_MARKER.is_match(&output) {
        let message = if RENDER_ERROR_MARKER.is_match(&output) {
            output.trim().to_string()
        } else {
            format!("Error occurred scraping {url}")
        };
        tracing::debug!(%url, ?status, "renderer failed");
        return Err(Error::RenderProcess {
            url: url.to_string(),
            message,
        });
    }

    let output = output.trim_start();
    let (first_line, body) = output.split_once('\n').unwrap_or((output, ""));

    let final_url = parse_page_url(first_line.trim()).map_err(|_| Error::RenderProcess {
        url: url.to_string(),
        message: format!("Error occurred scraping {url}: renderer reported final url {first_line:?}"),
    })?;

    Ok(RenderResult {
        final_url,
        raw_body: body.trim().to_string(),
    })
}
