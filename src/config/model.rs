//! Typed configuration model
//!
//! Vocabulary enums keep unrecognised strings around (`Unknown`) so that a
//! typo in the user file surfaces as a validation error pointing at the
//! binding, instead of an opaque parse failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::Serial;

/// Default color transition duration in milliseconds
pub const DEFAULT_TRANSITION_MS: i64 = 1;
/// Default sensor frame skip
pub const DEFAULT_FRAME_SKIP: i64 = 1;
/// Default sensor smoothing buffer size
pub const DEFAULT_BUFFER_SIZE: i64 = 5;
/// Default sensor gesture threshold
pub const DEFAULT_GESTURE_THRESHOLD: f64 = 0.1;

/// Declares a string-backed enum with an `Unknown` catch-all variant.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the recognised vocabulary
            Unknown(String),
        }

        impl $name {
            /// Every recognised value, in declaration order
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// Configuration spelling of this value
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $text, )+
                    $name::Unknown(other) => other,
                }
            }

            /// Returns true unless this is an `Unknown` value
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $text => $name::$variant, )+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Hand gestures reported by the sensor or derived from both hands
    pub enum Gesture {
        SwipeLeft => "swipe_left",
        SwipeRight => "swipe_right",
        SwipeUp => "swipe_up",
        SwipeDown => "swipe_down",
        /// Hands moving apart horizontally
        Expand => "expand",
        /// Hands moving together horizontally
        Contract => "contract",
        /// Both hands swiping up
        PullUp => "pull_up",
        /// Both hands swiping down
        PushDown => "push_down",
    }
}

impl Gesture {
    /// Returns true for gestures derived from both hands
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Gesture::Expand | Gesture::Contract | Gesture::PullUp | Gesture::PushDown
        )
    }
}

vocabulary! {
    /// What a binding does to its target lights
    pub enum Action {
        PowerOn => "power_on",
        PowerOff => "power_off",
        SetColor => "set_color",
    }
}

vocabulary! {
    /// How a selector picks devices out of the roster
    pub enum SelectorType {
        All => "all",
        Label => "label",
        Group => "group",
        Location => "location",
        Serial => "serial",
    }
}

vocabulary! {
    /// Minimum severity written by the logger
    pub enum LogLevel {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

/// Open (1) or closed (0) state of each finger, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerPattern(pub [u8; 5]);

impl FingerPattern {
    pub const OPEN: FingerPattern = FingerPattern([1, 1, 1, 1, 1]);
    pub const CLOSED: FingerPattern = FingerPattern([0, 0, 0, 0, 0]);

    /// Returns true if every entry is 0 or 1
    pub fn is_binary(&self) -> bool {
        self.0.iter().all(|&f| f <= 1)
    }
}

impl fmt::Display for FingerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a},{b},{c},{d},{e}]")
    }
}

/// Hue, saturation, brightness and kelvin; unset fields leave the light's
/// current value untouched
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsbk {
    /// 0-360 degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    /// 0-100 percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// 0-100 percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    /// 1500-9000 kelvin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kelvin: Option<i64>,
}

impl Hsbk {
    /// Returns true when no field is set
    pub fn is_empty(&self) -> bool {
        self.hue.is_none()
            && self.saturation.is_none()
            && self.brightness.is_none()
            && self.kelvin.is_none()
    }
}

/// Abstract device-targeting expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selector {
    #[serde(rename = "type")]
    pub kind: SelectorType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Parsed address for `serial` selectors, filled in by validation
    #[serde(skip)]
    pub serial: Option<Serial>,
}

impl Selector {
    /// Selects every device in the roster
    pub fn all() -> Self {
        Self::new(SelectorType::All, "")
    }

    /// Creates a selector of the given type and value
    pub fn new(kind: SelectorType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            serial: None,
        }
    }

    /// Creates a selector already pointing at a parsed serial
    pub fn serial(serial: Serial) -> Self {
        Self {
            kind: SelectorType::Serial,
            value: serial.to_string(),
            serial: Some(serial),
        }
    }
}

// The cached serial is derived from `value` and does not take part in equality.
impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

/// Rule mapping either a gesture or a finger pattern to an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture: Option<Gesture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FingerPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub selector: Selector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsbk: Option<Hsbk>,
}

impl Binding {
    /// Binding triggered by a gesture
    pub fn gesture(gesture: Gesture, action: Action, selector: Selector) -> Self {
        Self {
            gesture: Some(gesture),
            pattern: None,
            action: Some(action),
            selector,
            hsbk: None,
        }
    }

    /// Binding triggered by a held finger pattern
    pub fn pattern(pattern: FingerPattern, action: Action, selector: Selector) -> Self {
        Self {
            gesture: None,
            pattern: Some(pattern),
            action: Some(action),
            selector,
            hsbk: None,
        }
    }

    /// Attaches color parameters
    pub fn with_hsbk(mut self, hsbk: Hsbk) -> Self {
        self.hsbk = Some(hsbk);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct General {
    /// Color transition duration for `set_color`
    pub transition_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logging {
    pub level: LogLevel,
    /// Log destination; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<std::path::PathBuf>,
}

/// Sensor process tunables, passed through on its command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracking {
    pub frame_skip: i64,
    pub buffer_size: i64,
    pub gesture_threshold: f64,
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: General,
    pub logging: Logging,
    pub tracking: Tracking,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: General {
                transition_ms: DEFAULT_TRANSITION_MS,
            },
            logging: Logging {
                level: LogLevel::Info,
                file: None,
            },
            tracking: Tracking {
                frame_skip: DEFAULT_FRAME_SKIP,
                buffer_size: DEFAULT_BUFFER_SIZE,
                gesture_threshold: DEFAULT_GESTURE_THRESHOLD,
            },
            bindings: Vec::new(),
        }
    }
}

impl Config {
    /// Default configuration carrying the given bindings
    pub fn with_bindings(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_round_trip() {
        for gesture in Gesture::KNOWN {
            assert_eq!(&Gesture::from(gesture.as_str()), gesture);
        }
        assert_eq!(Action::from("set_color"), Action::SetColor);
        assert_eq!(
            SelectorType::from("room"),
            SelectorType::Unknown("room".to_string())
        );
    }

    #[test]
    fn test_compound_gestures() {
        let compound: Vec<_> = Gesture::KNOWN.iter().filter(|g| g.is_compound()).collect();
        assert_eq!(compound.len(), 4);
        assert!(!Gesture::SwipeLeft.is_compound());
    }

    #[test]
    fn test_finger_pattern_binary() {
        assert!(FingerPattern::OPEN.is_binary());
        assert!(!FingerPattern([1, 2, 0, 0, 0]).is_binary());
        assert_eq!(FingerPattern([1, 0, 1, 0, 1]).to_string(), "[1,0,1,0,1]");
    }

    #[test]
    fn test_hsbk_empty() {
        assert!(Hsbk::default().is_empty());
        let hsbk = Hsbk {
            kelvin: Some(3500),
            ..Hsbk::default()
        };
        assert!(!hsbk.is_empty());
    }
}
