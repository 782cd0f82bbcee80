//! Hand-tracking events as emitted by the sensor, one JSON object per line
//!
//! ```json
//! {"hands":[{"label":"left","fingers":[1,1,1,1,1],"gesture":"swipe_left"}]}
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{FingerPattern, Gesture};

/// Which hand a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandLabel {
    #[serde(alias = "Left")]
    Left,
    #[serde(alias = "Right")]
    Right,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Unknown => "unknown",
        })
    }
}

/// One tracked hand within an event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub label: HandLabel,
    #[serde(default)]
    pub fingers: Option<FingerPattern>,
    #[serde(default, deserialize_with = "non_empty_gesture")]
    pub gesture: Option<Gesture>,
}

impl Hand {
    pub fn new(label: HandLabel) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn with_fingers(mut self, fingers: FingerPattern) -> Self {
        self.fingers = Some(fingers);
        self
    }

    pub fn with_gesture(mut self, gesture: Gesture) -> Self {
        self.gesture = Some(gesture);
        self
    }
}

/// One sample from the sensor stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl Event {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    /// Decodes a single line of sensor output
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Decodes a single raw line, which need not be valid UTF-8
    pub fn parse_bytes(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }

    /// Hands indexed by label; a later hand with the same label wins
    pub fn by_label(&self) -> HandIndex<'_> {
        let mut index = HandIndex::default();
        for hand in &self.hands {
            match hand.label {
                HandLabel::Left => index.left = Some(hand),
                HandLabel::Right => index.right = Some(hand),
                HandLabel::Unknown => {}
            }
        }
        index
    }
}

/// Left and right hands of an event, when present
#[derive(Debug, Clone, Copy, Default)]
pub struct HandIndex<'a> {
    pub left: Option<&'a Hand>,
    pub right: Option<&'a Hand>,
}

impl HandIndex<'_> {
    pub fn left_gesture(&self) -> Option<&Gesture> {
        self.left.and_then(|h| h.gesture.as_ref())
    }

    pub fn right_gesture(&self) -> Option<&Gesture> {
        self.right.and_then(|h| h.gesture.as_ref())
    }
}

/// Treats `null`, a missing field and `""` alike
fn non_empty_gesture<'de, D>(deserializer: D) -> Result<Option<Gesture>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|g| !g.is_empty()).map(Gesture::from))
}
