//! # textdesk
//!
//! textdesk server binary: loads configuration, initializes logging and
//! metrics, and runs the HTTP server until Ctrl-C or SIGTERM.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use textdesk_core::logging::{self, LogFormat};
use textdesk_server::config::ServerConfig;
use textdesk_server::server::TextdeskServer;
use textdesk_settings::TextdeskSettings;

/// Text processing and task API server.
#[derive(Parser, Debug)]
#[command(name = "textdesk", about = "Text processing and task API server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for auto-assign (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the HTML pages and static assets.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Settings file to load instead of `~/.textdesk/settings.json`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `textdesk_server=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl Cli {
    /// Overlay flags that were given onto `settings`.
    fn apply(&self, settings: &mut TextdeskSettings) {
        if let Some(ref host) = self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(ref dir) = self.static_dir {
            settings.server.static_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(ref level) = self.log_level {
            settings.logging.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            settings.logging.format = format;
        }
    }

    fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(textdesk_settings::settings_path)
    }
}

/// Resolve the effective settings: file, env, then flags.
fn resolve_settings(cli: &Cli) -> Result<TextdeskSettings> {
    let path = cli.settings_path();
    let mut settings = textdesk_settings::load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    cli.apply(&mut settings);
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Resolve when the process is asked to stop.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term =
            signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.context("Failed to listen for ctrl-c")?,
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenv::dotenv();

    let args = Cli::parse();
    let settings = resolve_settings(&args)?;

    logging::init_subscriber(&settings.logging.level, settings.logging.format);

    let config = ServerConfig::from(&settings.server);
    let shutdown_timeout = config.shutdown_timeout;
    let mut server = TextdeskServer::new(config);
    match textdesk_server::metrics::install_recorder() {
        Ok(handle) => server = server.with_metrics(handle),
        Err(e) => tracing::warn!(error = %e, "metrics recorder unavailable, /metrics disabled"),
    }

    let listener = server.bind().await.context("Failed to bind server")?;
    let port = listener
        .local_addr()
        .context("Failed to read bound address")?
        .port();
    let handle = server.spawn(listener);

    tracing::info!("Server is running on port {port}");
    tracing::info!("Open http://localhost:{port} in your browser");

    shutdown_signal().await?;

    tracing::info!("Shutting down...");
    server
        .shutdown()
        .graceful_shutdown(vec![handle], Some(shutdown_timeout))
        .await;
    tracing::info!("Shutdown complete");
    Ok(())
}
