//! Confirmed bookings, PNR codes and the traveller profile.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Passenger, SeatClass, Train};

/// Error returned when parsing an invalid PNR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid PNR: {reason}")]
pub struct InvalidPnr {
    reason: &'static str,
}

/// A 10-digit Passenger Name Record code.
///
/// # Examples
///
/// ```
/// use train_booking::domain::Pnr;
///
/// let pnr = Pnr::parse("2641278193").unwrap();
/// assert_eq!(pnr.as_str(), "2641278193");
///
/// assert!(Pnr::parse("264127819").is_err());
/// assert!(Pnr::parse("26412781930").is_err());
/// assert!(Pnr::parse("26412x8193").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pnr([u8; 10]);

impl Pnr {
    /// Parse a PNR from exactly 10 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidPnr> {
        let bytes: [u8; 10] = s.as_bytes().try_into().map_err(|_| InvalidPnr {
            reason: "must be exactly 10 digits",
        })?;

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidPnr {
                reason: "must contain only digits 0-9",
            });
        }

        Ok(Pnr(bytes))
    }

    /// Smallest 10-digit PNR value.
    pub const MIN: u64 = 1_000_000_000;

    /// Largest 10-digit PNR value.
    pub const MAX: u64 = 9_999_999_999;

    /// Build a PNR from a number in `Pnr::MIN..=Pnr::MAX`.
    pub fn from_number(n: u64) -> Result<Self, InvalidPnr> {
        if !(Self::MIN..=Self::MAX).contains(&n) {
            return Err(InvalidPnr {
                reason: "number must have exactly 10 digits",
            });
        }
        Ok(Self::clamped(n))
    }

    /// Build a PNR from `n`, clamped into `Pnr::MIN..=Pnr::MAX`.
    pub(crate) fn clamped(n: u64) -> Self {
        let mut rest = n.clamp(Self::MIN, Self::MAX);
        let mut digits = [b'0'; 10];
        for digit in digits.iter_mut().rev() {
            *digit = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        Pnr(digits)
    }

    /// Returns the PNR as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pnr({})", self.as_str())
    }
}

impl fmt::Display for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Pnr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pnr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pnr::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Booking status as shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Waiting,
    Cancelled,
}

/// A completed booking.
///
/// Holds its own copy of the train as it was when booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub train: Train,
    pub date: NaiveDate,
    pub passengers: Vec<Passenger>,
    pub class: SeatClass,
    pub status: BookingStatus,
    pub pnr: Pnr,
    pub total_fare: u32,
}

impl Booking {
    /// Whether this booking matches a profile search query.
    ///
    /// The train name is matched case-insensitively; the train number and
    /// PNR are matched as typed.
    pub fn matches(&self, query: &str) -> bool {
        self.train
            .name
            .to_lowercase()
            .contains(&query.to_lowercase())
            || self.train.number.contains(query)
            || self.pnr.as_str().contains(query)
    }
}

/// Filter bookings by a profile search query, keeping their order.
///
/// An empty query keeps every booking.
pub fn search_bookings<'a>(bookings: &'a [Booking], query: &str) -> Vec<&'a Booking> {
    bookings.iter().filter(|b| b.matches(query)).collect()
}

/// The signed-in traveller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bookings: Vec<Booking>,
}

impl User {
    /// Initials for the avatar, e.g. "RS" for "Rahul Sharma".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 10-digit string parses and roundtrips
        #[test]
        fn roundtrip(s in "[0-9]{10}") {
            let pnr = Pnr::parse(&s).unwrap();
            prop_assert_eq!(pnr.as_str(), s.as_str());
        }

        /// Every number in the PNR range is a valid PNR
        #[test]
        fn range_is_valid(n in 1_000_000_000u64..=9_999_999_999) {
            prop_assert!(Pnr::from_number(n).is_ok());
        }
    }
}
