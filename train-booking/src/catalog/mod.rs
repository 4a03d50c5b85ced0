//! Station directory and train catalog.
//!
//! The catalog is reference data loaded once at startup and shared
//! read-only for the life of the process. It is never mutated: bookings
//! do not decrement seats left.

mod error;
mod file;

use std::sync::Arc;

use tracing::error;

use crate::domain::{Station, Train, User};

pub use error::CatalogError;

/// The sample data set served when no catalog file is configured.
const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Stations, trains and the traveller profile.
#[derive(Debug, Clone)]
pub struct Catalog {
    stations: Vec<Station>,
    trains: Vec<Arc<Train>>,
    profile: User,
}

impl Catalog {
    pub(crate) fn new(stations: Vec<Station>, trains: Vec<Arc<Train>>, profile: User) -> Self {
        Self {
            stations,
            trains,
            profile,
        }
    }

    /// The built-in sample catalog: 10 stations, 8 trains and a profile
    /// with two past bookings.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).unwrap_or_else(|e| {
            error!(error = %e, "Built-in catalog failed to load");
            Self::new(Vec::new(), Vec::new(), User::default())
        })
    }

    /// All stations, in directory order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// All trains, in catalog order.
    pub fn trains(&self) -> &[Arc<Train>] {
        &self.trains
    }

    /// The signed-in traveller and their bookings.
    pub fn profile(&self) -> &User {
        &self.profile
    }

    /// Find stations whose name, city or code contains `query`.
    ///
    /// Matching is case-insensitive and keeps directory order. An empty
    /// query returns every station.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_booking::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// let names: Vec<_> = catalog
    ///     .find_stations("MUMBAI")
    ///     .iter()
    ///     .map(|s| s.name.as_str())
    ///     .collect();
    /// assert_eq!(names, ["Mumbai Central", "Chhatrapati Shivaji Terminus"]);
    /// ```
    pub fn find_stations(&self, query: &str) -> Vec<&Station> {
        if query.is_empty() {
            return self.stations.iter().collect();
        }

        let needle = query.to_lowercase();
        self.stations
            .iter()
            .filter(|s| s.matches_lowercase(&needle))
            .collect()
    }

    /// Look up a train by id.
    pub fn train_by_id(&self, id: &str) -> Result<Arc<Train>, CatalogError> {
        self.trains
            .iter()
            .find(|t| t.id.as_str() == id)
            .cloned()
            .ok_or_else(|| CatalogError::TrainNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingStatus, SeatClass, search_bookings};

    fn names(stations: &[&Station]) -> Vec<String> {
        stations.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::from_json_str(BUILTIN_CATALOG).unwrap();
        assert_eq!(catalog.stations().len(), 10);
        assert_eq!(catalog.trains().len(), 8);
        assert_eq!(catalog.profile().bookings.len(), 2);
    }

    #[test]
    fn empty_query_returns_all_stations_in_order() {
        let catalog = Catalog::builtin();
        let all = catalog.find_stations("");
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].code.as_str(), "NDLS");
        assert_eq!(all[9].code.as_str(), "JP");
    }

    #[test]
    fn mumbai_matches_both_mumbai_stations() {
        let catalog = Catalog::builtin();
        assert_eq!(
            names(&catalog.find_stations("mumbai")),
            vec!["Mumbai Central", "Chhatrapati Shivaji Terminus"]
        );
        assert_eq!(catalog.find_stations("Mumbai").len(), 2);
    }

    #[test]
    fn query_matches_codes_case_insensitively() {
        let catalog = Catalog::builtin();
        assert_eq!(names(&catalog.find_stations("hwh")), vec!["Howrah Junction"]);
        // "jp" is Jaipur's code; no other field contains it
        assert_eq!(names(&catalog.find_stations("jp")), vec!["Jaipur Junction"]);
    }

    #[test]
    fn query_matches_names_and_cities() {
        let catalog = Catalog::builtin();
        // Allahabad Junction serves Prayagraj
        assert_eq!(
            names(&catalog.find_stations("prayag")),
            vec!["Allahabad Junction"]
        );
        assert_eq!(catalog.find_stations("junction").len(), 6);
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.find_stations("london").is_empty());
    }

    #[test]
    fn train_lookup() {
        let catalog = Catalog::builtin();
        let train = catalog.train_by_id("2").unwrap();
        assert_eq!(train.name, "Duronto Express");
        assert_eq!(train.price[SeatClass::Sleeper], 1320);

        let err = catalog.train_by_id("99").unwrap_err();
        assert!(matches!(err, CatalogError::TrainNotFound(ref id) if id == "99"));
    }

    #[test]
    fn profile_bookings_snapshot_their_train() {
        let catalog = Catalog::builtin();
        let profile = catalog.profile();
        assert_eq!(profile.name, "Rahul Sharma");
        assert_eq!(profile.initials(), "RS");

        let first = &profile.bookings[0];
        assert_eq!(first.train.name, "Rajdhani Express");
        assert_eq!(first.pnr.as_str(), "2641278193");
        assert_eq!(first.status, BookingStatus::Confirmed);
        assert_eq!(first.passengers.len(), 2);
        assert_eq!(
            first.date,
            chrono::NaiveDate::from_ymd_opt(2023, 9, 15).unwrap()
        );
    }

    #[test]
    fn profile_booking_search() {
        let catalog = Catalog::builtin();
        let bookings = &catalog.profile().bookings;

        let ids = |query: &str| -> Vec<String> {
            search_bookings(bookings, query)
                .iter()
                .map(|b| b.id.clone())
                .collect()
        };

        assert_eq!(ids(""), vec!["b1", "b2"]);
        assert_eq!(ids("rajdhani"), vec!["b1"]);
        assert_eq!(ids("SHATABDI"), vec!["b2"]);
        assert_eq!(ids("12002"), vec!["b2"]);
        assert_eq!(ids("1452"), vec!["b2"]);
        assert_eq!(ids("express"), vec!["b1", "b2"]);
        assert!(ids("duronto").is_empty());
    }
}
