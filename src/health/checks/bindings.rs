//! Binding resolution health check

use std::path::{Path, PathBuf};

use crate::config::{Binding, Config};
use crate::device::{LightController, StaticController};
use crate::health::check::{CheckResult, SystemCheck};
use crate::selector;

/// Checks that every binding reaches at least one light in the roster
///
/// Without a roster file the roster is empty, so only serial selectors can
/// resolve.
pub struct BindingsCheck {
    config: PathBuf,
    devices: Option<PathBuf>,
}

impl BindingsCheck {
    pub fn new(config: &Path, devices: Option<&Path>) -> Self {
        Self {
            config: config.to_path_buf(),
            devices: devices.map(Path::to_path_buf),
        }
    }
}

impl SystemCheck for BindingsCheck {
    fn name(&self) -> &'static str {
        "Bindings"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Resolves every binding selector against the device roster")
    }

    fn check(&self) -> CheckResult {
        let config = match Config::read(&self.config) {
            Ok(config) => config,
            Err(e) => return CheckResult::fail(format!("Configuration unusable: {}", e)),
        };

        let roster = match &self.devices {
            Some(path) => match StaticController::from_file(path) {
                Ok(controller) => controller.devices(),
                Err(e) => return CheckResult::fail(format!("{:#}", e)),
            },
            None => Vec::new(),
        };

        let mut details = vec![format!("{} devices in roster", roster.len())];
        let mut unresolved = 0;

        for (index, binding) in config.bindings.iter().enumerate() {
            let targets = selector::resolve(&binding.selector, &roster);
            let marker = if targets.is_empty() {
                unresolved += 1;
                "⚠"
            } else {
                "✓"
            };
            details.push(format!(
                "{} bindings[{}] {} -> {} device(s)",
                marker,
                index,
                trigger(binding),
                targets.len()
            ));
        }

        if unresolved > 0 {
            CheckResult::warn(format!(
                "{} of {} bindings match no device",
                unresolved,
                config.bindings.len()
            ))
            .with_details(details)
        } else {
            CheckResult::pass(format!("{} bindings resolved", config.bindings.len())).with_details(details)
        }
    }
}

fn trigger(binding: &Binding) -> String {
    match (&binding.gesture, &binding.pattern) {
        (Some(gesture), _) => gesture.to_string(),
        (None, Some(pattern)) => pattern.to_string(),
        (None, None) => "?".to_string(),
    }
}
