//! Seat classes and per-class tables.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown seat class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown seat class: {0}")]
pub struct UnknownSeatClass(pub String);

/// A class of accommodation on a train.
///
/// This is a closed set. The declaration order is the order in which
/// classes are listed to the traveller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeatClass {
    Sleeper,
    Ac3Tier,
    Ac2Tier,
    AcFirstClass,
}

impl SeatClass {
    /// Every seat class, in listing order.
    pub const ALL: [SeatClass; 4] = [
        SeatClass::Sleeper,
        SeatClass::Ac3Tier,
        SeatClass::Ac2Tier,
        SeatClass::AcFirstClass,
    ];

    /// Wire name, e.g. `ac3Tier`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Sleeper => "sleeper",
            SeatClass::Ac3Tier => "ac3Tier",
            SeatClass::Ac2Tier => "ac2Tier",
            SeatClass::AcFirstClass => "acFirstClass",
        }
    }

    /// Label shown to travellers, e.g. "AC 3 Tier (3A)".
    pub fn label(&self) -> &'static str {
        match self {
            SeatClass::Sleeper => "Sleeper (SL)",
            SeatClass::Ac3Tier => "AC 3 Tier (3A)",
            SeatClass::Ac2Tier => "AC 2 Tier (2A)",
            SeatClass::AcFirstClass => "AC First Class (1A)",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Result<Self, UnknownSeatClass> {
        SeatClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| UnknownSeatClass(s.to_string()))
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per seat class.
///
/// Used for fares and for seats left. Serializes as an object keyed by the
/// class wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTable<T> {
    pub sleeper: T,
    pub ac3_tier: T,
    pub ac2_tier: T,
    pub ac_first_class: T,
}

impl<T> ClassTable<T> {
    /// Build a table from values in listing order.
    pub fn new(sleeper: T, ac3_tier: T, ac2_tier: T, ac_first_class: T) -> Self {
        Self {
            sleeper,
            ac3_tier,
            ac2_tier,
            ac_first_class,
        }
    }

    /// Iterate `(class, value)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatClass, &T)> {
        SeatClass::ALL.into_iter().map(move |class| (class, &self[class]))
    }
}

impl<T> Index<SeatClass> for ClassTable<T> {
    type Output = T;

    fn index(&self, class: SeatClass) -> &T {
        match class {
            SeatClass::Sleeper => &self.sleeper,
            SeatClass::Ac3Tier => &self.ac3_tier,
            SeatClass::Ac2Tier => &self.ac2_tier,
            SeatClass::AcFirstClass => &self.ac_first_class,
        }
    }
}

impl<T> IndexMut<SeatClass> for ClassTable<T> {
    fn index_mut(&mut self, class: SeatClass) -> &mut T {
        match class {
            SeatClass::Sleeper => &mut self.sleeper,
            SeatClass::Ac3Tier => &mut self.ac3_tier,
            SeatClass::Ac2Tier => &mut self.ac2_tier,
            SeatClass::AcFirstClass => &mut self.ac_first_class,
        }
    }
}
