//! Train records.
//!
//! A `Train` is a single scheduled service between two stations, with
//! fares and seats left for each class. Trains are catalog data and are
//! never mutated after loading.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ClassTable, ClockTime, DaysOfOperation, SeatClass, Station, TravelDuration};

/// Opaque catalog identifier for a train.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(String);

impl TrainId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled train between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    /// Catalog identifier
    pub id: TrainId,

    /// Display name, e.g. "Rajdhani Express"
    pub name: String,

    /// Public train number, e.g. "12301"
    pub number: String,

    /// Origin station
    pub from: Station,

    /// Destination station
    pub to: Station,

    /// Departure time from the origin
    pub departure_time: ClockTime,

    /// Arrival time at the destination (possibly on a later day)
    pub arrival_time: ClockTime,

    /// Scheduled running time
    pub duration: TravelDuration,

    /// Route length as printed, e.g. "1384 km"
    pub distance: String,

    /// Fare per passenger for each class; 0 where the class is not sold
    pub price: ClassTable<u32>,

    /// Seats left in each class; 0 means the class cannot be booked
    pub availability: ClassTable<u32>,

    /// Weekdays on which the train runs
    pub days_of_operation: DaysOfOperation,
}

/// A class that can currently be booked on a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfferedClass {
    /// The seat class
    pub class: SeatClass,

    /// Label shown to travellers
    pub label: &'static str,

    /// Fare per passenger
    pub price: u32,

    /// Seats left
    pub available: u32,
}

impl Train {
    /// Whether seats in `class` can be booked.
    ///
    /// Availability is authoritative; the price alone says nothing about
    /// whether a class is sold.
    pub fn is_offered(&self, class: SeatClass) -> bool {
        self.availability[class] > 0
    }

    /// Classes with seats left, in listing order.
    pub fn offered_classes(&self) -> Vec<OfferedClass> {
        self.availability
            .iter()
            .filter(|(_, seats)| **seats > 0)
            .map(|(class, seats)| OfferedClass {
                class,
                label: class.label(),
                price: self.price[class],
                available: *seats,
            })
            .collect()
    }

    /// Whether the train runs on `date`.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.days_of_operation.runs_on(date)
    }

    /// Departure as a date and time, for a journey starting on `date`.
    pub fn departure_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.departure_time.on(date)
    }

    /// Arrival as a date and time, for a journey starting on `date`.
    ///
    /// Overnight and multi-day services arrive on a later date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use train_booking::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// let rajdhani = catalog.train_by_id("1").unwrap();
    /// let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
    ///
    /// let arrival = rajdhani.arrival_on(monday);
    /// assert_eq!(arrival.date(), NaiveDate::from_ymd_opt(2024, 3, 19).unwrap());
    /// assert_eq!(arrival.time().to_string(), "08:15:00");
    /// ```
    pub fn arrival_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.departure_on(date) + self.duration.as_duration()
    }
}
