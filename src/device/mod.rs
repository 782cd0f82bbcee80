//! Light devices and the capability used to command them
//!
//! Discovery and the wire protocol belong to the network library; this
//! crate only needs a roster snapshot and a way to send one command to one
//! address, both expressed by [`LightController`].

mod serial;
mod static_roster;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Hsbk;

pub use serial::{Serial, SerialError};
pub use static_roster::StaticController;

/// Snapshot of a known light and its grouping attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub serial: Serial,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub location: String,
}

impl Device {
    pub fn new(
        serial: Serial,
        label: impl Into<String>,
        group: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            serial,
            label: label.into(),
            group: group.into(),
            location: location.into(),
        }
    }
}

/// Ready-to-send light command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPower { on: bool },
    /// Fades to the given color; unset fields keep the light's current value
    SetColor { hsbk: Hsbk, duration: Duration },
}

impl Command {
    pub fn power_on() -> Self {
        Self::SetPower { on: true }
    }

    pub fn power_off() -> Self {
        Self::SetPower { on: false }
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPower { on: true } => "power_on",
            Self::SetPower { on: false } => "power_off",
            Self::SetColor { .. } => "set_color",
        }
    }
}

/// Access to the lights on the network
pub trait LightController {
    /// Currently known devices
    fn devices(&self) -> Vec<Device>;

    /// Sends `command` to the device with the given address
    fn send(&self, serial: Serial, command: &Command) -> anyhow::Result<()>;
}

impl<T: LightController + ?Sized> LightController for Arc<T> {
    fn devices(&self) -> Vec<Device> {
        (**self).devices()
    }

    fn send(&self, serial: Serial, command: &Command) -> anyhow::Result<()> {
        (**self).send(serial, command)
    }
}

impl<T: LightController + ?Sized> LightController for &T {
    fn devices(&self) -> Vec<Device> {
        (**self).devices()
    }

    fn send(&self, serial: Serial, command: &Command) -> anyhow::Result<()> {
        (**self).send(serial, command)
    }
}
