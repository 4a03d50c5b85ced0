//! Data transfer objects for web requests and responses.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Booking, FieldError, OfferedClass, PassengerDraft, Station, Train, User};
use crate::fare::FareQuote;
use crate::filter::{EmptyState, FilterState, ResultsView};

/// Request to search the station directory.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchRequest {
    /// Part of a station name, city or code; empty lists every station
    #[serde(default)]
    pub q: String,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<Station>,
}

/// Request to search for trains.
#[derive(Debug, Deserialize)]
pub struct TrainSearchRequest {
    /// Origin station code or city
    pub from: String,

    /// Destination station code or city
    pub to: String,

    /// Travel date in YYYY-MM-DD format
    pub date: String,
}

/// Why a list of trains is empty, with the text to show.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct EmptyStateResult {
    pub kind: EmptyState,
    pub title: &'static str,
    pub message: &'static str,
}

impl From<EmptyState> for EmptyStateResult {
    fn from(state: EmptyState) -> Self {
        Self {
            kind: state,
            title: state.title(),
            message: state.message(),
        }
    }
}

/// A train in a results list.
#[derive(Debug, Serialize)]
pub struct TrainResult {
    #[serde(flatten)]
    pub train: Train,

    /// Departure date and time, when the travel date is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departs_at: Option<NaiveDateTime>,

    /// Arrival date and time, possibly days after departure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrives_at: Option<NaiveDateTime>,
}

impl TrainResult {
    /// A result for travel on `date`, if known.
    pub fn new(train: &Train, date: Option<NaiveDate>) -> Self {
        Self {
            departs_at: date.map(|d| train.departure_on(d)),
            arrives_at: date.map(|d| train.arrival_on(d)),
            train: train.clone(),
        }
    }
}

/// A list of trains as shown on the results page.
#[derive(Debug, Serialize)]
pub struct TrainListResponse {
    /// Trains to show
    pub trains: Vec<TrainResult>,

    /// Number of trains before filtering
    pub total: usize,

    /// Whether any filter is selected
    pub filtered: bool,

    /// Present when `trains` is empty
    pub empty_state: Option<EmptyStateResult>,
}

impl TrainListResponse {
    /// The visible trains of `view`, for travel on `date` if known.
    pub fn from_view(view: &ResultsView, date: Option<NaiveDate>) -> Self {
        Self {
            trains: view
                .visible()
                .iter()
                .map(|t| TrainResult::new(t, date))
                .collect(),
            total: view.results().len(),
            filtered: view.filters().is_active(),
            empty_state: view.empty_state().map(EmptyStateResult::from),
        }
    }
}

/// Request to filter a list of search results.
#[derive(Debug, Deserialize)]
pub struct FilterTrainsRequest {
    /// The unfiltered results, by train id
    pub train_ids: Vec<String>,

    /// Filter selections; missing groups select nothing
    #[serde(default)]
    pub filters: FilterState,

    /// Travel date in YYYY-MM-DD format, for departure and arrival times
    #[serde(default)]
    pub date: Option<String>,
}

/// A train with the classes that can be booked on it.
#[derive(Debug, Serialize)]
pub struct TrainDetailResponse {
    pub train: Train,
    pub offered_classes: Vec<OfferedClass>,
}

/// Request for a fare quote.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// Seat class wire name, e.g. "ac3Tier"
    pub class: String,

    /// Number of passengers (defaults to 1)
    pub passengers: Option<u32>,
}

/// Response for a fare quote.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub train_id: String,
    pub class: String,
    pub class_label: &'static str,
    pub passengers: u32,
    pub fare: FareQuote,
}

/// Request to book seats.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub train_id: String,

    /// Travel date in YYYY-MM-DD format
    pub date: String,

    /// Seat class wire name
    pub class: String,

    /// One form entry per passenger
    pub passengers: Vec<PassengerDraft>,
}

/// A confirmed booking.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
}

/// The signed-in traveller.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub initials: String,
    pub user: User,
}

/// Request to search the traveller's bookings.
#[derive(Debug, Default, Deserialize)]
pub struct BookingSearchRequest {
    /// Part of a train name, train number or PNR
    #[serde(default)]
    pub q: String,
}

/// Response for booking search.
#[derive(Debug, Serialize)]
pub struct BookingSearchResponse {
    pub bookings: Vec<Booking>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Per-field passenger errors, for validation failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}
