//! Booking error types.

use chrono::NaiveDate;

use crate::domain::FieldError;
use crate::fare::FareError;

/// Errors from building or finalizing a booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// The train has no service on the chosen date
    #[error("train {train} does not run on {date}")]
    NotRunning { train: String, date: NaiveDate },

    /// No seat class has been chosen yet
    #[error("no seat class selected")]
    NoClassSelected,

    /// The chosen class or passenger count cannot be quoted
    #[error(transparent)]
    Fare(#[from] FareError),

    /// The passenger list does not match the chosen passenger count
    #[error("expected {expected} passengers, got {actual}")]
    PassengerCountMismatch { expected: u32, actual: usize },

    /// One or more passenger fields failed validation
    #[error("{} passenger field(s) invalid", .0.len())]
    Validation(Vec<FieldError>),
}
