//! Structural and semantic checks on a merged configuration
//!
//! Checks run in a fixed order and stop at the first violation.

use super::ConfigError;
use super::model::{Action, Binding, Config, Hsbk, LogLevel, Selector, SelectorType, Tracking};
use crate::device::Serial;

impl Config {
    /// Validates the configuration, caching parsed serials on serial selectors
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.general.transition_ms <= 0 {
            return Err(ConfigError::invalid("general.transition_ms", "must be > 0"));
        }

        if !self.logging.level.is_known() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("must be one of {}", known_list(LogLevel::KNOWN)),
            ));
        }

        self.tracking.validate()?;

        for (index, binding) in self.bindings.iter_mut().enumerate() {
            binding
                .validate()
                .map_err(|(field, reason)| match field {
                    Some(field) => ConfigError::invalid(format!("bindings[{index}].{field}"), reason),
                    None => ConfigError::invalid(format!("bindings[{index}]"), reason),
                })?;
        }

        Ok(())
    }
}

impl Tracking {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_skip <= 0 {
            return Err(ConfigError::invalid("tracking.frame_skip", "must be > 0"));
        }
        if self.buffer_size <= 0 {
            return Err(ConfigError::invalid("tracking.buffer_size", "must be > 0"));
        }
        if self.gesture_threshold.is_nan() || self.gesture_threshold <= 0.0 {
            return Err(ConfigError::invalid(
                "tracking.gesture_threshold",
                "must be > 0.0",
            ));
        }
        if self.gesture_threshold > 1.0 {
            return Err(ConfigError::invalid(
                "tracking.gesture_threshold",
                "must be <= 1.0",
            ));
        }
        Ok(())
    }
}

/// Field within a binding (if any) and what is wrong with it
type BindingViolation = (Option<&'static str>, String);

impl Binding {
    fn validate(&mut self) -> Result<(), BindingViolation> {
        match (&self.gesture, &self.pattern) {
            (Some(_), Some(_)) => {
                return Err((None, "gesture and pattern are mutually exclusive".into()));
            }
            (None, None) => {
                return Err((None, "one of gesture or pattern is required".into()));
            }
            (Some(gesture), None) if !gesture.is_known() => {
                return Err((Some("gesture"), format!("invalid gesture: {gesture}")));
            }
            (None, Some(pattern)) if !pattern.is_binary() => {
                return Err((
                    Some("pattern"),
                    "pattern should only contain 0s & 1s".into(),
                ));
            }
            _ => {}
        }

        self.selector
            .validate()
            .map_err(|reason| (Some("selector"), reason))?;

        validate_action(self.action.as_ref(), self.hsbk.as_ref())
    }
}

impl Selector {
    fn validate(&mut self) -> Result<(), String> {
        match &self.kind {
            SelectorType::All => Ok(()),
            SelectorType::Label | SelectorType::Group | SelectorType::Location => {
                if self.value.is_empty() {
                    Err(format!("missing selector value for type {:?}", self.kind.as_str()))
                } else {
                    Ok(())
                }
            }
            SelectorType::Serial => {
                let serial: Serial = self
                    .value
                    .parse()
                    .map_err(|e| format!("invalid serial value: {e}"))?;
                self.serial = Some(serial);
                Ok(())
            }
            SelectorType::Unknown(kind) => Err(format!("unknown selector type {kind:?}")),
        }
    }
}

impl Hsbk {
    fn validate(&self) -> Result<(), String> {
        if let Some(h) = self.hue
            && !(0.0..=360.0).contains(&h)
        {
            return Err(format!("invalid value for hue [{h}], must be 0-360"));
        }
        if let Some(s) = self.saturation
            && !(0.0..=100.0).contains(&s)
        {
            return Err(format!("invalid value for saturation [{s}], must be 0-100"));
        }
        if let Some(b) = self.brightness
            && !(0.0..=100.0).contains(&b)
        {
            return Err(format!("invalid value for brightness [{b}], must be 0-100"));
        }
        if let Some(k) = self.kelvin
            && !(1500..=9000).contains(&k)
        {
            return Err(format!("invalid value for kelvin [{k}], must be 1500-9000"));
        }
        Ok(())
    }
}

fn validate_action(action: Option<&Action>, hsbk: Option<&Hsbk>) -> Result<(), BindingViolation> {
    let action = match action {
        None => return Err((Some("action"), "action is required".into())),
        Some(Action::Unknown(other)) => {
            return Err((Some("action"), format!("invalid action: {other}")));
        }
        Some(action) => action,
    };

    if let Some(hsbk) = hsbk {
        hsbk.validate().map_err(|reason| (Some("hsbk"), reason))?;
    }

    if *action == Action::SetColor && hsbk.is_none_or(Hsbk::is_empty) {
        return Err((Some("hsbk"), format!("hsbk must be set for action {action}")));
    }

    Ok(())
}

fn known_list<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
