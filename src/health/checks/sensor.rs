//! Sensor executable health check

use std::path::{Path, PathBuf};

use crate::health::check::{CheckResult, SystemCheck};
use crate::sensor;

/// Checks that the sensor executable can be found
pub struct SensorCheck {
    program: PathBuf,
}

impl SensorCheck {
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
        }
    }
}

impl SystemCheck for SensorCheck {
    fn name(&self) -> &'static str {
        "Sensor"
    }

    fn check(&self) -> CheckResult {
        match sensor::locate(&self.program) {
            Some(path) => CheckResult::pass(format!("Found {}", path.display())),
            None => CheckResult::fail(format!("{} not found", self.program.display()))
                .with_details(["Install the sensor or pass --sensor PATH"]),
        }
    }
}
