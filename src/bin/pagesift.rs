//! Command-line front end: analyze one page and print the result as JSON.
//!
//! ```text
//! pagesift https://example.com/article
//! curl -s https://example.com/ | pagesift --stdin https://example.com/
//! ```

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pagesift::{Analyzer, Options, Proxy};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Relevance-ranked summary of a web page.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "Extract title, description, image and ranked keywords from a web page")]
struct Cli {
    /// Page URL.
    url: String,

    /// Read the page markup from stdin instead of fetching it.
    #[arg(long)]
    stdin: bool,

    /// Render timeout in milliseconds.
    #[arg(long, default_value_t = 5000)]
    timeout: u64,

    /// Maximum number of redirects to follow.
    #[arg(long, default_value_t = 30)]
    max_redirects: u32,

    /// User agent for the renderer and the HTTP fallback.
    #[arg(long)]
    user_agent: Option<String>,

    /// SOCKS5 proxy as HOST:PORT.
    #[arg(long, value_name = "HOST:PORT")]
    proxy: Option<String>,

    /// Retry with a plain HTTP GET when rendering fails.
    #[arg(long)]
    fallback: bool,

    /// Attach the script-free document source to the result.
    #[arg(long)]
    source: bool,

    /// Renderer executable.
    #[arg(long, env = "PAGESIFT_RENDERER")]
    renderer: Option<PathBuf>,

    /// Load script passed to the renderer (default: `phantom-load.js` in the
    /// working directory).
    #[arg(long, env = "PAGESIFT_RENDER_SCRIPT")]
    render_script: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn options(&self) -> pagesift::Result<Options> {
        let mut options = Options {
            timeout_ms: self.timeout,
            max_redirects: self.max_redirects,
            fallback_request: self.fallback,
            return_source: self.source,
            ..Options::default()
        };
        if let Some(ua) = &self.user_agent {
            options.user_agent.clone_from(ua);
        }
        if let Some(proxy) = &self.proxy {
            options.proxy = Some(Proxy::parse(proxy)?);
        }
        if let Some(program) = &self.renderer {
            options.renderer.program.clone_from(program);
        }
        if let Some(script) = &self.render_script {
            options.renderer.script = Some(script.clone());
        }
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let shutdown = CancellationToken::new();
    spawn_shutdown_listener(shutdown.clone())?;

    let analyzer = Analyzer::new(cli.options()?)?.with_shutdown(shutdown);

    let body = if cli.stdin {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        Some(html)
    } else {
        None
    };

    let result = analyzer.analyze(&cli.url, body.as_deref()).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(json)
}

/// Cancel `token` on SIGINT or SIGTERM, so an outstanding renderer is killed
/// and reaped before the process exits.
#[cfg(unix)]
fn spawn_shutdown_listener(token: CancellationToken) -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            Ok(()) = tokio::signal::ctrl_c() => tracing::debug!("received SIGINT"),
            Some(()) = terminate.recv() => tracing::debug!("received SIGTERM"),
            else => return,
        }
        token.cancel();
    });
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn spawn_shutdown_listener(token: CancellationToken) -> io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    Ok(())
}
