//! Configuration health check

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the configuration file merges and validates
pub struct ConfigCheck {
    path: PathBuf,
}

impl ConfigCheck {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads the user configuration over the defaults and validates it")
    }

    fn check(&self) -> CheckResult {
        let location = format!("Path: {}", self.path.display());

        match Config::read(&self.path) {
            Ok(config) if !self.path.exists() => {
                CheckResult::warn("No configuration file, defaults will be written on start")
                    .with_details([location, summary(&config)])
            }
            Ok(config) => CheckResult::pass(format!("{} bindings validated", config.bindings.len()))
                .with_details([location, summary(&config)]),
            Err(e) => CheckResult::fail(e.to_string()).with_details([location]),
        }
    }
}

fn summary(config: &Config) -> String {
    format!(
        "transition {} ms, log level {}, frame skip {}, buffer {}, threshold {}",
        config.general.transition_ms,
        config.logging.level,
        config.tracking.frame_skip,
        config.tracking.buffer_size,
        config.tracking.gesture_threshold
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::health::CheckStatus;

    #[test]
    fn test_config_check_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(ConfigCheck::new(&path).check().status, CheckStatus::Warn);

        fs::write(&path, "[general]\ntransition_ms = 100\n").unwrap();
        assert_eq!(ConfigCheck::new(&path).check().status, CheckStatus::Pass);

        fs::write(&path, "[general]\ntransition_ms = 0\n").unwrap();
        let result = ConfigCheck::new(&path).check();
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.message, "general.transition_ms: must be > 0");
    }
}
