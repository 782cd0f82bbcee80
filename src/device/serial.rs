//! Device addresses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing a textual device address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerialError {
    #[error("expected 12 hex chars (6 bytes), got {0}")]
    Length(usize),
    #[error("invalid hex digit in {0:?}")]
    Digit(String),
}

/// 6-byte hardware address of a light, written as 12 hex characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Serial([u8; 6]);

impl Serial {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for Serial {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 12 {
            return Err(SerialError::Length(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SerialError::Digit(s.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| SerialError::Digit(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Serial {
    type Error = SerialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Serial> for String {
    fn from(value: Serial) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let serial: Serial = "D073D5000001".parse().unwrap();
        assert_eq!(serial.bytes(), [0xd0, 0x73, 0xd5, 0x00, 0x00, 0x01]);
        assert_eq!(serial.to_string(), "d073d5000001");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Serial>(), Err(SerialError::Length(0)));
        assert_eq!("d073d50000".parse::<Serial>(), Err(SerialError::Length(10)));
        assert!(matches!(
            "d073d50000zz".parse::<Serial>(),
            Err(SerialError::Digit(_))
        ));
        assert!("+1+2+3+4+5+6".parse::<Serial>().is_err());
    }
}
