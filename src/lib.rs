//! Gesture Lights
//!
//! Routes hand-tracking events (gestures and finger patterns) to commands
//! for networked smart lights.

/// Build-time information (version, timestamp, toolchain)
pub mod build_info;

/// Layered configuration: defaults, user file, validation
pub mod config;

/// Light devices, commands and the controller capability
pub mod device;

/// Startup diagnostics for `--check`
pub mod health;

/// Tracing subscriber setup
pub mod logging;

/// Trigger to dispatch tables
pub mod registry;

/// Event routing and dispatch
pub mod router;

/// Selector resolution against a device roster
pub mod selector;

/// Sensor child process
pub mod sensor;

/// Line-delimited event stream consumption
pub mod stream;
