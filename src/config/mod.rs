//! Layered configuration
//!
//! Built-in defaults are merged with the user's TOML file and validated
//! before anything else starts:
//!
//! ```text
//! Config::default() ─┐
//!                    ├─ merge ─ validate ─ Config
//! config.toml ───────┘ (ConfigOverlay)
//! ```

mod loader;
mod model;
mod overlay;
mod validate;

use std::path::PathBuf;

pub use loader::{CONFIG_FILE_NAME, LoadStatus, default_config_path, read_overlay};
pub use model::{
    Action, Binding, Config, DEFAULT_BUFFER_SIZE, DEFAULT_FRAME_SKIP, DEFAULT_GESTURE_THRESHOLD,
    DEFAULT_TRANSITION_MS, FingerPattern, General, Gesture, Hsbk, LogLevel, Logging, Selector,
    SelectorType, Tracking,
};
pub use overlay::{ConfigOverlay, GeneralOverlay, LoggingOverlay, TrackingOverlay};

/// Errors raised while loading, merging or validating the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ::config::ConfigError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field violates a constraint; `field` is a dotted path such as
    /// `bindings[2].selector`
    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
