//! Gesture Lights
//!
//! Starts the hand-tracking sensor and turns its events into light commands.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use gesture_lights::build_info;
use gesture_lights::config::{self, Config, LoadStatus};
use gesture_lights::device::{LightController, StaticController};
use gesture_lights::health;
use gesture_lights::logging;
use gesture_lights::registry::{BindingRegistry, SharedRegistry};
use gesture_lights::router::EventRouter;
use gesture_lights::sensor::{self, SensorProcess};
use gesture_lights::stream;

#[derive(Debug, Parser)]
#[command(name = "gesture-lights", version, long_version = build_info::LONG_VERSION)]
#[command(about = "Control smart lights with hand gestures")]
struct Args {
    /// Configuration file (created with defaults if missing)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Device roster file with [[devices]] tables
    #[arg(long, value_name = "PATH")]
    devices: Option<PathBuf>,

    /// Sensor executable
    #[arg(long, value_name = "PATH", default_value = sensor::DEFAULT_SENSOR)]
    sensor: PathBuf,

    /// Run startup checks and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);

    if args.check {
        let report = health::run_all_checks(&config_path, args.devices.as_deref(), &args.sensor);
        health::print_report(&report);
        return Ok(ExitCode::from(report.exit_code() as u8));
    }

    let (config, status) = Config::load_with_status(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    logging::init(&config.logging).context("Failed to initialize logging")?;
    info!(version = %build_info::version_string(), config = %config_path.display(), "Starting");
    match status {
        LoadStatus::Created => info!("No configuration found, wrote defaults"),
        LoadStatus::Updated => info!("Updated configuration with new fields"),
        LoadStatus::Unchanged => {}
    }

    let controller = match &args.devices {
        Some(path) => StaticController::from_file(path).context("Failed to load device roster")?,
        None => {
            warn!("No device roster given, only serial selectors will match");
            StaticController::default()
        }
    };

    let registry = BindingRegistry::build(&config, &controller.devices());
    info!(
        gestures = registry.gesture_count(),
        patterns = registry.pattern_count(),
        "Bindings loaded"
    );
    let router = EventRouter::new(controller, Arc::new(SharedRegistry::new(registry)));

    let (sensor, reader) =
        SensorProcess::spawn(&args.sensor, &config.tracking).context("Failed to start sensor")?;

    let stats = stream::consume_until(reader, &router, shutdown_signal())
        .await
        .context("Failed to read sensor output")?;
    info!(events = stats.events, skipped = stats.skipped, "Sensor stream ended");

    sensor.shutdown(sensor::SHUTDOWN_GRACE).await;
    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
