//! Result filtering.
//!
//! Narrows a list of search results by train family, departure window and
//! seat availability. The three groups are independent: keys within a
//! group are OR-ed, groups are AND-ed, and a group with nothing selected
//! lets every train through.

mod group;
mod view;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{SeatClass, Train};

pub use group::{DepartureWindow, FilterGroup, FilterKey, TrainType};
pub use view::{EmptyState, ResultsView};

/// Filter selections for one results view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Train families to show
    pub train_types: FilterGroup<TrainType>,

    /// Departure windows to show
    pub departure_time: FilterGroup<DepartureWindow>,

    /// Classes that must have seats left
    pub availability: FilterGroup<SeatClass>,
}

impl FilterState {
    /// A state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any group constrains the results.
    pub fn is_active(&self) -> bool {
        self.train_types.is_active()
            || self.departure_time.is_active()
            || self.availability.is_active()
    }

    /// Clear every selection.
    pub fn reset(&mut self) {
        self.train_types.clear();
        self.departure_time.clear();
        self.availability.clear();
    }

    /// Whether `train` passes every group.
    pub fn admits(&self, train: &Train) -> bool {
        self.train_types.admits(train)
            && self.departure_time.admits(train)
            && self.availability.admits(train)
    }

    /// Keep the trains that pass every group, in their original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_booking::catalog::Catalog;
    /// use train_booking::domain::SeatClass;
    /// use train_booking::filter::FilterState;
    ///
    /// let catalog = Catalog::builtin();
    /// let mut filters = FilterState::new();
    /// filters.availability.set(SeatClass::Sleeper, true);
    ///
    /// let names: Vec<_> = filters
    ///     .apply(catalog.trains())
    ///     .iter()
    ///     .map(|t| t.name.clone())
    ///     .collect();
    /// assert_eq!(names, ["Duronto Express", "Jan Shatabdi Express"]);
    /// ```
    pub fn apply(&self, trains: &[Arc<Train>]) -> Vec<Arc<Train>> {
        let filtered: Vec<Arc<Train>> = trains
            .iter()
            .filter(|t| self.admits(t))
            .cloned()
            .collect();

        debug!(
            before = trains.len(),
            after = filtered.len(),
            filters = ?self,
            "Filters applied"
        );

        filtered
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;

    fn group<K: FilterKey>(mask: u8) -> FilterGroup<K> {
        FilterGroup::with(
            K::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, k)| *k),
        )
    }

    fn filter_state() -> impl Strategy<Value = FilterState> {
        (0u8..32, 0u8..16, 0u8..16).prop_map(|(types, times, classes)| FilterState {
            train_types: group(types),
            departure_time: group(times),
            availability: group(classes),
        })
    }

    proptest! {
        /// Filtering twice gives the same result as filtering once
        #[test]
        fn idempotent(filters in filter_state()) {
            let catalog = Catalog::builtin();
            let once = filters.apply(catalog.trains());
            let twice = filters.apply(&once);
            prop_assert_eq!(once, twice);
        }

        /// Results are an order-preserving subset of the input
        #[test]
        fn ordered_subset(filters in filter_state()) {
            let catalog = Catalog::builtin();
            let filtered = filters.apply(catalog.trains());
            let mut remaining = catalog.trains().iter();
            for train in &filtered {
                prop_assert!(remaining.any(|t| t.id == train.id));
            }
        }

        /// Each result passes every active group
        #[test]
        fn results_pass_every_group(filters in filter_state()) {
            let catalog = Catalog::builtin();
            for train in filters.apply(catalog.trains()) {
                prop_assert!(filters.train_types.admits(&train));
                prop_assert!(filters.departure_time.admits(&train));
                prop_assert!(filters.availability.admits(&train));
            }
        }

        /// Resetting always restores the unfiltered list
        #[test]
        fn reset_restores_everything(mut filters in filter_state()) {
            let catalog = Catalog::builtin();
            filters.reset();
            prop_assert_eq!(filters.apply(catalog.trains()), catalog.trains().to_vec());
        }
    }
}
