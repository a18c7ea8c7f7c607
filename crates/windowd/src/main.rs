//! windowd - keeps a service running only inside a daily UTC window
//!
//! This is the main entry point for the windowd service.
//! It wires together all the components:
//! - Configuration loading
//! - systemd controller (Linux)
//! - Window reconciler
//! - Signal handling for graceful shutdown

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use windowd_config::{ConfigSource, resolve_config};
use windowd_core::WindowReconciler;
use windowd_host_api::SystemClock;
use windowd_host_linux::{SystemdController, effective_uid, running_as_root};
use windowd_util::{WINDOWD_CONFIG_ENV, default_config_path, format_datetime_full, is_mock_time_active};

/// windowd - Keeps a service up inside a daily UTC window and down outside it
#[derive(Parser, Debug)]
#[command(name = "windowd")]
#[command(about = "Keeps a service up inside a daily UTC window and down outside it", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/windowd/config.toml or /etc/windowd/config.toml)
    #[arg(short, long, env = WINDOWD_CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Cancel `cancel` on SIGTERM, SIGINT, or SIGHUP
fn spawn_signal_handler(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
    let mut sighup = signal(SignalKind::hangup()).context("Failed to create SIGHUP handler")?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
            _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully"),
            _ = sighup.recv() => info!("Received SIGHUP, shutting down gracefully"),
        }
        cancel.cancel();
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "windowd starting");

    let default_path = default_config_path();
    let (config, source) = resolve_config(args.config.as_deref(), &default_path)
        .with_context(|| match &args.config {
            Some(path) => format!("Failed to load config from {:?}", path),
            None => format!("Failed to load config from {:?}", default_path),
        })?;

    match &source {
        ConfigSource::File(path) => {
            info!(config_path = %path.display(), "Configuration loaded");
        }
        ConfigSource::Defaults => {
            info!(
                default_path = %default_path.display(),
                "No configuration file found, using built-in defaults"
            );
        }
    }

    let controller = Arc::new(SystemdController::new(
        config.service.unit.clone(),
        config.service.systemctl.clone(),
    ));

    info!(
        unit = %config.service.unit,
        window = %config.window,
        check_interval_secs = config.schedule.check_interval.as_secs(),
        systemctl = %controller.systemctl().display(),
        "Managing service"
    );

    if !running_as_root() {
        warn!(
            euid = effective_uid(),
            "Not running as root; systemctl start/stop may be refused"
        );
    }

    if is_mock_time_active() {
        warn!(
            now = %format_datetime_full(&windowd_util::now()),
            "Mock time is active; decisions do not follow the real clock"
        );
    }

    let reconciler = WindowReconciler::from_config(&config, controller, Arc::new(SystemClock));

    let cancel = CancellationToken::new();
    let _signal_handle = spawn_signal_handler(cancel.clone())?;

    reconciler.run(cancel).await;

    info!("Shutdown complete");
    Ok(())
}
