//! Sparse user overrides and the field-by-field merge onto defaults

use std::path::PathBuf;

use serde::Deserialize;

use super::model::{Binding, Config, General, LogLevel, Logging, Tracking};

/// User configuration as written on disk; any field may be absent
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub general: Option<GeneralOverlay>,
    pub logging: Option<LoggingOverlay>,
    pub tracking: Option<TrackingOverlay>,
    pub bindings: Option<Vec<Binding>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GeneralOverlay {
    pub transition_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LoggingOverlay {
    pub level: Option<LogLevel>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TrackingOverlay {
    pub frame_skip: Option<i64>,
    pub buffer_size: Option<i64>,
    pub gesture_threshold: Option<f64>,
}

/// Replaces `slot` when the overlay carries a value
fn take<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl General {
    fn merge(&mut self, overlay: GeneralOverlay) {
        take(&mut self.transition_ms, overlay.transition_ms);
    }
}

impl Logging {
    fn merge(&mut self, overlay: LoggingOverlay) {
        take(&mut self.level, overlay.level);
        if overlay.file.is_some() {
            self.file = overlay.file;
        }
    }
}

impl Tracking {
    fn merge(&mut self, overlay: TrackingOverlay) {
        take(&mut self.frame_skip, overlay.frame_skip);
        take(&mut self.buffer_size, overlay.buffer_size);
        take(&mut self.gesture_threshold, overlay.gesture_threshold);
    }
}

impl Config {
    /// Applies user overrides on top of this configuration
    ///
    /// Nested sections merge field by field. A present `bindings` list,
    /// even an empty one, replaces the current list wholesale.
    pub fn merge(&mut self, overlay: ConfigOverlay) {
        if let Some(general) = overlay.general {
            self.general.merge(general);
        }
        if let Some(logging) = overlay.logging {
            self.logging.merge(logging);
        }
        if let Some(tracking) = overlay.tracking {
            self.tracking.merge(tracking);
        }
        take(&mut self.bindings, overlay.bindings);
    }

    /// Returns a copy of `self` with `overlay` merged in
    pub fn merged(mut self, overlay: ConfigOverlay) -> Self {
        self.merge(overlay);
        self
    }
}

impl From<&Config> for ConfigOverlay {
    /// Overlay that sets every field of `config`
    fn from(config: &Config) -> Self {
        Self {
            general: Some(GeneralOverlay {
                transition_ms: Some(config.general.transition_ms),
            }),
            logging: Some(LoggingOverlay {
                level: Some(config.logging.level.clone()),
                file: config.logging.file.clone(),
            }),
            tracking: Some(TrackingOverlay {
                frame_skip: Some(config.tracking.frame_skip),
                buffer_size: Some(config.tracking.buffer_size),
                gesture_threshold: Some(config.tracking.gesture_threshold),
            }),
            bindings: Some(config.bindings.clone()),
        }
    }
}
