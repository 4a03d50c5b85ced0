//! Catalog file format.
//!
//! Catalogs are JSON documents listing stations, trains and the traveller
//! profile. Trains refer to their origin and destination by station code,
//! and profile bookings refer to their train by id; both references are
//! resolved and checked when the file is loaded.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    Booking, BookingStatus, ClassTable, ClockTime, DaysOfOperation, Passenger, Pnr, SeatClass,
    Station, StationCode, Train, TrainId, TravelDuration, User,
};

use super::{Catalog, CatalogError};

/// Top-level catalog document.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    stations: Vec<Station>,
    trains: Vec<TrainRecord>,
    profile: ProfileRecord,
}

/// A train as written in the file, with stations given by code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainRecord {
    id: String,
    name: String,
    number: String,
    from: StationCode,
    to: StationCode,
    departure_time: ClockTime,
    arrival_time: ClockTime,
    duration: TravelDuration,
    distance: String,
    price: ClassTable<u32>,
    availability: ClassTable<u32>,
    days_of_operation: DaysOfOperation,
}

#[derive(Debug, Deserialize)]
struct ProfileRecord {
    id: String,
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    bookings: Vec<BookingRecord>,
}

/// A profile booking, with its train given by id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: String,
    train_id: String,
    date: NaiveDate,
    passengers: Vec<Passenger>,
    class: SeatClass,
    status: BookingStatus,
    pnr: Pnr,
    total_fare: u32,
}

impl CatalogFile {
    /// Parse a catalog document.
    pub(crate) fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve references and check uniqueness, producing a catalog.
    pub(crate) fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut stations_by_code = HashMap::with_capacity(self.stations.len());
        for station in &self.stations {
            if stations_by_code.insert(station.code, station).is_some() {
                return Err(CatalogError::DuplicateStation(station.code));
            }
        }

        let lookup = |train: &str, code: StationCode| {
            stations_by_code
                .get(&code)
                .map(|s| (*s).clone())
                .ok_or_else(|| CatalogError::UnknownStation {
                    train: train.to_string(),
                    code,
                })
        };

        let mut seen_ids = HashSet::with_capacity(self.trains.len());
        let mut trains = Vec::with_capacity(self.trains.len());
        for record in self.trains {
            if !seen_ids.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateTrain(record.id));
            }
            if record.days_of_operation.is_empty() {
                return Err(CatalogError::NoOperatingDays(record.id));
            }

            let from = lookup(&record.id, record.from)?;
            let to = lookup(&record.id, record.to)?;

            trains.push(Arc::new(Train {
                id: TrainId::new(record.id),
                name: record.name,
                number: record.number,
                from,
                to,
                departure_time: record.departure_time,
                arrival_time: record.arrival_time,
                duration: record.duration,
                distance: record.distance,
                price: record.price,
                availability: record.availability,
                days_of_operation: record.days_of_operation,
            }));
        }

        let mut bookings = Vec::with_capacity(self.profile.bookings.len());
        for record in self.profile.bookings {
            let train = trains
                .iter()
                .find(|t| t.id.as_str() == record.train_id)
                .ok_or_else(|| CatalogError::UnknownBookingTrain {
                    booking: record.id.clone(),
                    train: record.train_id.clone(),
                })?;

            bookings.push(Booking {
                id: record.id,
                train: Train::clone(train),
                date: record.date,
                passengers: record.passengers,
                class: record.class,
                status: record.status,
                pnr: record.pnr,
                total_fare: record.total_fare,
            });
        }

        let profile = User {
            id: self.profile.id,
            name: self.profile.name,
            email: self.profile.email,
            phone: self.profile.phone,
            bookings,
        };

        debug!(
            stations = self.stations.len(),
            trains = trains.len(),
            bookings = profile.bookings.len(),
            "Catalog loaded"
        );

        Ok(Catalog::new(self.stations, trains, profile))
    }
}

impl Catalog {
    /// Load a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        CatalogFile::from_json(json)?.into_catalog()
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STATIONS: &str = r#"[
        { "code": "NDLS", "name": "New Delhi Railway Station", "city": "New Delhi" },
        { "code": "JP", "name": "Jaipur Junction", "city": "Jaipur" }
    ]"#;

    const PROFILE: &str = r#"{ "id": "1", "name": "Test User", "email": "t@example.com", "phone": "1" }"#;

    fn train_json(id: &str, from: &str, to: &str, days: &str) -> String {
        format!(
            r#"{{
                "id": "{id}", "name": "Shatabdi Express", "number": "12002",
                "from": "{from}", "to": "{to}",
                "departureTime": "06:05", "arrivalTime": "10:40",
                "duration": "4h 35m", "distance": "303 km",
                "price": {{ "sleeper": 0, "ac3Tier": 0, "ac2Tier": 1045, "acFirstClass": 1825 }},
                "availability": {{ "sleeper": 0, "ac3Tier": 0, "ac2Tier": 28, "acFirstClass": 10 }},
                "daysOfOperation": {days}
            }}"#
        )
    }

    fn document(stations: &str, trains: &[String], profile: &str) -> String {
        format!(
            r#"{{ "stations": {stations}, "trains": [{}], "profile": {profile} }}"#,
            trains.join(",")
        )
    }

    #[test]
    fn loads_minimal_catalog() {
        let json = document(
            STATIONS,
            &[train_json("3", "NDLS", "JP", r#"["Mon"]"#)],
            PROFILE,
        );
        let catalog = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.stations().len(), 2);
        assert_eq!(catalog.trains().len(), 1);

        let train = catalog.train_by_id("3").unwrap();
        assert_eq!(train.to.city, "Jaipur");
        assert!(catalog.profile().bookings.is_empty());
    }

    #[test]
    fn rejects_unknown_station() {
        let json = document(
            STATIONS,
            &[train_json("3", "NDLS", "BCT", r#"["Mon"]"#)],
            PROFILE,
        );
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownStation { ref train, .. } if train == "3"));
    }

    #[test]
    fn rejects_duplicate_train_ids() {
        let json = document(
            STATIONS,
            &[
                train_json("3", "NDLS", "JP", r#"["Mon"]"#),
                train_json("3", "JP", "NDLS", r#"["Tue"]"#),
            ],
            PROFILE,
        );
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTrain(ref id) if id == "3"));
    }

    #[test]
    fn rejects_duplicate_station_codes() {
        let stations = r#"[
            { "code": "JP", "name": "Jaipur Junction", "city": "Jaipur" },
            { "code": "JP", "name": "Jaipur Again", "city": "Jaipur" }
        ]"#;
        let json = document(stations, &[], PROFILE);
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateStation(_)));
    }

    #[test]
    fn rejects_train_that_never_runs() {
        let json = document(STATIONS, &[train_json("3", "NDLS", "JP", "[]")], PROFILE);
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::NoOperatingDays(_)));
    }

    #[test]
    fn rejects_bad_field_values() {
        let bad_day = document(STATIONS, &[train_json("3", "NDLS", "JP", r#"["Funday"]"#)], PROFILE);
        assert!(matches!(
            Catalog::from_json_str(&bad_day),
            Err(CatalogError::Json(_))
        ));

        let bad_code = document(STATIONS, &[train_json("3", "ndls", "JP", r#"["Mon"]"#)], PROFILE);
        assert!(matches!(
            Catalog::from_json_str(&bad_code),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn rejects_overlong_duration() {
        let train = train_json("3", "NDLS", "JP", r#"["Mon"]"#).replace("4h 35m", "99999999h 0m");
        let json = document(STATIONS, &[train], PROFILE);
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
        assert!(err.to_string().contains("hour count too large"));
    }

    #[test]
    fn rejects_booking_for_unknown_train() {
        let profile = r#"{
            "id": "1", "name": "Test User", "email": "t@example.com", "phone": "1",
            "bookings": [{
                "id": "b1", "trainId": "99", "date": "2023-09-15", "passengers": [],
                "class": "ac2Tier", "status": "confirmed", "pnr": "2641278193", "totalFare": 1
            }]
        }"#;
        let json = document(STATIONS, &[train_json("3", "NDLS", "JP", r#"["Mon"]"#)], profile);
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert_eq!(err.to_string(), "booking b1 refers to unknown train 99");
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            document(
                STATIONS,
                &[train_json("3", "NDLS", "JP", r#"["Mon","Sat"]"#)],
                PROFILE,
            )
            .as_bytes(),
        )
        .unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.trains().len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
