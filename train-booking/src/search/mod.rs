//! Train search.
//!
//! Answers: "which trains run from here to there on this date?" by a
//! linear scan of the catalog, keeping catalog order.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Station, Train, weekday_abbrev};

/// A request to search the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    /// Origin station code or part of the origin city name
    pub from: String,

    /// Destination station code or part of the destination city name
    pub to: String,

    /// Date of travel
    pub date: NaiveDate,
}

impl SearchQuery {
    /// Create a new search query.
    pub fn new(from: impl Into<String>, to: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            date,
        }
    }
}

/// Whether `station` satisfies one end of a query.
///
/// The code must match exactly; the city matches on a case-insensitive
/// substring. An empty term therefore matches every station.
fn station_matches(station: &Station, term: &str) -> bool {
    station.code.as_str() == term || station.city.to_lowercase().contains(&term.to_lowercase())
}

/// Whether `train` satisfies every part of `query`.
pub fn matches(train: &Train, query: &SearchQuery) -> bool {
    station_matches(&train.from, &query.from)
        && station_matches(&train.to, &query.to)
        && train.runs_on(query.date)
}

/// Find trains matching `query`, in catalog order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use train_booking::catalog::Catalog;
/// use train_booking::search::{SearchQuery, search};
///
/// let catalog = Catalog::builtin();
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
/// let trains = search(&catalog, &SearchQuery::new("NDLS", "BCT", monday));
///
/// let names: Vec<_> = trains.iter().map(|t| t.name.as_str()).collect();
/// assert_eq!(names, ["Rajdhani Express", "Duronto Express"]);
/// ```
pub fn search(catalog: &Catalog, query: &SearchQuery) -> Vec<Arc<Train>> {
    let results: Vec<Arc<Train>> = catalog
        .trains()
        .iter()
        .filter(|t| matches(t, query))
        .cloned()
        .collect();

    debug!(
        from = %query.from,
        to = %query.to,
        date = %query.date,
        weekday = weekday_abbrev(query.date),
        results = results.len(),
        "Train search complete"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2024-03-17 is a Sunday.
    fn day(offset_from_sunday: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 17 + offset_from_sunday).unwrap()
    }

    fn names(trains: &[Arc<Train>]) -> Vec<&str> {
        trains.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn ndls_to_bct_on_monday() {
        let catalog = Catalog::builtin();
        let results = search(&catalog, &SearchQuery::new("NDLS", "BCT", day(1)));
        assert_eq!(names(&results), vec!["Rajdhani Express", "Duronto Express"]);
    }

    #[test]
    fn operating_days_are_respected() {
        let catalog = Catalog::builtin();
        // Duronto runs Mon, Wed, Fri only
        let results = search(&catalog, &SearchQuery::new("NDLS", "BCT", day(2)));
        assert_eq!(names(&results), vec!["Rajdhani Express"]);
    }

    #[test]
    fn city_substring_matches_case_insensitively() {
        let catalog = Catalog::builtin();
        let results = search(&catalog, &SearchQuery::new("delhi", "MUMBAI", day(1)));
        assert_eq!(names(&results), vec!["Rajdhani Express", "Duronto Express"]);
    }

    #[test]
    fn station_code_match_is_case_sensitive() {
        let catalog = Catalog::builtin();
        // "ndls" is neither the exact code nor part of "New Delhi"
        let results = search(&catalog, &SearchQuery::new("ndls", "BCT", day(1)));
        assert!(results.is_empty());
    }

    #[test]
    fn destination_city_matches_any_station_in_that_city() {
        let catalog = Catalog::builtin();
        // Two trains from New Delhi serve Prayagraj; Gatimaan does not run on Monday
        let results = search(&catalog, &SearchQuery::new("NDLS", "Prayagraj", day(1)));
        assert_eq!(names(&results), vec!["Vande Bharat Express"]);

        let results = search(&catalog, &SearchQuery::new("NDLS", "ALD", day(3)));
        assert_eq!(
            names(&results),
            vec!["Vande Bharat Express", "Gatimaan Express"]
        );
    }

    #[test]
    fn empty_terms_match_every_station() {
        let catalog = Catalog::builtin();
        let results = search(&catalog, &SearchQuery::new("", "", day(0)));
        // Trains running on Sunday
        assert_eq!(
            names(&results),
            vec!["Rajdhani Express", "Humsafar Express", "Gatimaan Express"]
        );
    }

    #[test]
    fn unknown_route_is_empty() {
        let catalog = Catalog::builtin();
        let results = search(&catalog, &SearchQuery::new("HWH", "PNBE", day(1)));
        assert!(results.is_empty());
    }

    #[test]
    fn query_deserializes_iso_date() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"from":"BCT","to":"MAS","date":"2024-03-19"}"#).unwrap();
        assert_eq!(query.date, day(2));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every result runs on the requested weekday and results keep catalog order
        #[test]
        fn results_are_ordered_subset(offset in 0u32..7, from in "[A-Za-z]{0,4}", to in "[A-Za-z]{0,4}") {
            let catalog = Catalog::builtin();
            let date = NaiveDate::from_ymd_opt(2024, 3, 17 + offset).unwrap();
            let results = search(&catalog, &SearchQuery::new(from, to, date));

            let positions: Vec<usize> = results
                .iter()
                .map(|r| catalog.trains().iter().position(|t| t.id == r.id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(results.iter().all(|t| t.runs_on(date)));
        }
    }
}
