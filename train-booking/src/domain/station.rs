//! Station code and station reference data.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// Longest station code we accept.
const MAX_CODE_LEN: usize = 5;

/// A valid station code, such as `NDLS`, `BCT` or `JP`.
///
/// Station codes are 2 to 5 uppercase ASCII letters. This type guarantees
/// that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use train_booking::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("ndls").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("N").is_err());
/// assert!(StationCode::parse("NDLSXX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    bytes: [u8; MAX_CODE_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 2 to 5 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() < 2 || bytes.len() > MAX_CODE_LEN {
            return Err(InvalidStationCode {
                reason: "must be 2 to 5 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        let mut code = [0u8; MAX_CODE_LEN];
        code[..bytes.len()].copy_from_slice(bytes);

        Ok(StationCode {
            bytes: code,
            len: bytes.len() as u8,
        })
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A station in the directory.
///
/// Stations are immutable reference data loaded with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique uppercase code
    pub code: StationCode,

    /// Full station name, e.g. "Mumbai Central"
    pub name: String,

    /// City the station serves
    pub city: String,
}

impl Station {
    /// Create a station.
    pub fn new(code: StationCode, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            city: city.into(),
        }
    }

    /// Whether `needle` (already lowercased) appears in the name, city or code.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.city.to_lowercase().contains(needle)
            || self.code.as_str().to_lowercase().contains(needle)
    }
}
