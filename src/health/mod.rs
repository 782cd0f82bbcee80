//! Startup diagnostics
//!
//! Run by `gesture-lights --check` before any sensor is started: the
//! configuration must load and validate, bindings should reach at least
//! one light, and the sensor executable should be findable.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gesture_lights::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new(Path::new("config.toml")))
//!     .add_check(SensorCheck::new(Path::new("fingertrack")))
//!     .add_check(BuildInfoCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

use std::path::Path;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs every built-in check against the given startup inputs
pub fn run_all_checks(config: &Path, devices: Option<&Path>, sensor: &Path) -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new(config))
        .add_check(checks::BindingsCheck::new(config, devices))
        .add_check(checks::SensorCheck::new(sensor))
        .add_check(checks::BuildInfoCheck::new())
        .run()
}
