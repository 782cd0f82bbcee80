//! Hand-tracking sensor process
//!
//! The sensor is an external executable that prints one JSON event per line
//! on stdout. It receives the `tracking` settings on its command line.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};
use tracing::{info, warn};

use crate::config::Tracking;

/// Executable name looked up on `PATH` when no sensor path is given
pub const DEFAULT_SENSOR: &str = "fingertrack";

/// How long the sensor may take to exit before it is killed
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Command-line arguments for the sensor
pub fn sensor_args(tracking: &Tracking) -> Vec<String> {
    vec![
        "--frame-skip".to_string(),
        tracking.frame_skip.to_string(),
        "--buffer-size".to_string(),
        tracking.buffer_size.to_string(),
        "--gesture-threshold".to_string(),
        format!("{:.1}", tracking.gesture_threshold),
    ]
}

/// Finds `program` either as a path or on `PATH`
pub fn locate(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Running sensor child process
pub struct SensorProcess {
    child: Child,
}

impl SensorProcess {
    /// Starts the sensor and returns it with a reader over its stdout
    ///
    /// The sensor's stderr is passed through to ours.
    pub fn spawn(program: &Path, tracking: &Tracking) -> anyhow::Result<(Self, BufReader<ChildStdout>)> {
        let args = sensor_args(tracking);
        info!(program = %program.display(), ?args, "Starting sensor");

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start sensor {}", program.display()))?;

        let stdout = child
            .stdout
            .take()
            .context("Sensor stdout was not captured")?;

        Ok((Self { child }, BufReader::new(stdout)))
    }

    /// Asks the sensor to stop, waits up to `grace` for it to exit, then
    /// kills it
    ///
    /// Callers should drop the stdout reader first so the sensor also sees a
    /// closed pipe. Returns the exit status if the sensor exited in time.
    pub async fn shutdown(mut self, grace: Duration) -> Option<ExitStatus> {
        self.terminate();

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(Ok(status)) => {
                info!(%status, "Sensor exited");
                Some(status)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to wait for sensor");
                None
            }
            Err(_) => {
                info!("Force killing sensor");
                if let Err(e) = self.child.kill().await {
                    warn!(error = %e, "Failed to kill sensor");
                }
                None
            }
        }
    }

    /// Sends SIGTERM unless the sensor has already been reaped
    #[cfg(unix)]
    fn terminate(&self) {
        let Some(pid) = self.child.id() else {
            return;
        };
        let Ok(pid) = libc::pid_t::try_from(pid) else {
            return;
        };
        // SAFETY: `pid` is our own child and has not been reaped yet.
        if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
            warn!(error = %std::io::Error::last_os_error(), "Failed to signal sensor");
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self) {}
}
