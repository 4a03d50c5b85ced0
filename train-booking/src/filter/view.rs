//! Per-view search results with adjustable filters.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::Train;

use super::FilterState;

/// Why a results view is showing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The search itself found no trains
    NoTrains,
    /// Trains were found but the filters hide all of them
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoTrains => "No Trains Found",
            EmptyState::NoMatches => "No Matching Trains",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoTrains => {
                "We couldn't find any trains for the selected route and date. \
                 Please try different search parameters."
            }
            EmptyState::NoMatches => {
                "No trains match your current filters. \
                 Please try adjusting your filter criteria."
            }
        }
    }
}

/// Search results plus the filters the traveller is adjusting.
///
/// Filter edits are held until [`ResultsView::apply`] is called, matching
/// an "Apply Filters" button. Dropping the view discards its filters.
#[derive(Debug, Clone)]
pub struct ResultsView {
    results: Vec<Arc<Train>>,
    filters: FilterState,
    visible: Vec<Arc<Train>>,
}

impl ResultsView {
    /// A view showing every result, with no filters selected.
    pub fn new(results: Vec<Arc<Train>>) -> Self {
        Self {
            visible: results.clone(),
            results,
            filters: FilterState::new(),
        }
    }

    /// The unfiltered search results.
    pub fn results(&self) -> &[Arc<Train>] {
        &self.results
    }

    /// The trains currently shown.
    pub fn visible(&self) -> &[Arc<Train>] {
        &self.visible
    }

    /// The current filter selections.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Edit the filter selections. Takes effect on the next `apply`.
    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Recompute the shown trains from the current selections.
    pub fn apply(&mut self) -> &[Arc<Train>] {
        self.visible = self.filters.apply(&self.results);
        &self.visible
    }

    /// Clear every selection and show all results again.
    pub fn reset(&mut self) -> &[Arc<Train>] {
        self.filters.reset();
        self.visible = self.results.clone();
        &self.visible
    }

    /// Why nothing is shown, if nothing is shown.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.results.is_empty() {
            Some(EmptyState::NoTrains)
        } else if self.visible.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::SeatClass;
    use crate::filter::TrainType;

    #[test]
    fn starts_unfiltered() {
        let catalog = Catalog::builtin();
        let view = ResultsView::new(catalog.trains().to_vec());
        assert_eq!(view.visible().len(), 8);
        assert_eq!(view.empty_state(), None);
    }

    #[test]
    fn edits_wait_for_apply() {
        let catalog = Catalog::builtin();
        let mut view = ResultsView::new(catalog.trains().to_vec());
        view.filters_mut().train_types.set(TrainType::Duronto, true);
        assert_eq!(view.visible().len(), 8);

        assert_eq!(view.apply().len(), 1);
        assert_eq!(view.visible()[0].name, "Duronto Express");
    }

    #[test]
    fn reset_restores_full_count() {
        let catalog = Catalog::builtin();
        let mut view = ResultsView::new(catalog.trains().to_vec());
        view.filters_mut().availability.set(SeatClass::Sleeper, true);
        assert_eq!(view.apply().len(), 2);

        assert_eq!(view.reset().len(), 8);
        assert!(!view.filters().is_active());
    }

    #[test]
    fn apply_twice_is_stable() {
        let catalog = Catalog::builtin();
        let mut view = ResultsView::new(catalog.trains().to_vec());
        view.filters_mut().availability.set(SeatClass::AcFirstClass, true);
        let first = view.apply().to_vec();
        let second = view.apply().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn distinguishes_empty_states() {
        let empty = ResultsView::new(Vec::new());
        assert_eq!(empty.empty_state(), Some(EmptyState::NoTrains));
        assert_eq!(EmptyState::NoTrains.title(), "No Trains Found");

        let catalog = Catalog::builtin();
        let mut view = ResultsView::new(catalog.trains().to_vec());
        view.filters_mut().train_types.set(TrainType::Tejas, true);
        view.filters_mut().availability.set(SeatClass::Sleeper, true);
        view.apply();
        assert_eq!(view.empty_state(), Some(EmptyState::NoMatches));

        view.reset();
        assert_eq!(view.empty_state(), None);
    }
}
