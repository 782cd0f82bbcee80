//! Fixed roster controller that logs commands instead of transmitting them

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use super::{Command, Device, LightController, Serial};

#[derive(Debug, Default, Deserialize)]
struct RosterFile {
    #[serde(default)]
    devices: Vec<Device>,
}

/// Controller over a roster read from a file
///
/// Used for dry runs and for trying out bindings before wiring in a real
/// network controller. Every send succeeds and is logged at info level.
#[derive(Debug, Clone, Default)]
pub struct StaticController {
    devices: Vec<Device>,
}

impl StaticController {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    /// Reads a TOML roster of `[[devices]]` tables
    ///
    /// ```toml
    /// [[devices]]
    /// serial = "d073d5000001"
    /// label = "Desk light"
    /// group = "Office"
    /// location = "Home"
    /// ```
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        let roster: RosterFile = toml::from_str(&text)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;
        Ok(Self::new(roster.devices))
    }
}

impl LightController for StaticController {
    fn devices(&self) -> Vec<Device> {
        self.devices.clone()
    }

    fn send(&self, serial: Serial, command: &Command) -> anyhow::Result<()> {
        info!(%serial, command = command.name(), ?command, "Sending command");
        Ok(())
    }
}
