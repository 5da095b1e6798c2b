//! `epaper-status` binary.
//!
//! # Usage
//!
//! ```bash
//! # Default panel, one update per minute, frames in ./epaper-frames
//! epaper-status
//!
//! # Larger panel, seconds shown, partial refresh when available
//! epaper-status --panel waveshare-4.2-v2 --interval 1 --show-seconds --partial
//! ```

#![allow(missing_docs)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use epaper_status::{Args, FontLoader, SnapshotPanel};
use platform::config::banner;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    tracing::info!("{}", banner());

    let spec = args.panel_spec()?;
    let panel = SnapshotPanel::open(spec, &args.output_dir)
        .with_context(|| format!("cannot open panel output {}", args.output_dir.display()))?;
    tracing::info!(panel = spec.name, path = %panel.snapshot_path().display(), "panel selected");

    let config = args.loop_config(&FontLoader::default());

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    let report = epaper_status::run_until(panel, config, shutdown)
        .await
        .context("panel startup failed")?;
    tracing::info!(
        ticks = report.ticks,
        dispatched = report.dispatched,
        skipped = report.skipped,
        "exited cleanly"
    );
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
///
/// If no signal can be listened for, the loop keeps running.
async fn watch_signals(shutdown: CancellationToken) {
    match wait_for_signal().await {
        Ok(name) => {
            tracing::info!(signal = name, "shutdown requested");
            shutdown.cancel();
        }
        Err(err) => tracing::warn!(%err, "signal listener failed, shutdown via signals disabled"),
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(err) => {
            tracing::warn!(%err, "cannot listen for SIGTERM");
            tokio::signal::ctrl_c().await?;
            return Ok("SIGINT");
        }
    };
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl-C")
}
