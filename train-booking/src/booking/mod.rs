//! Booking drafts.
//!
//! A [`BookingDraft`] collects the choices made on the booking screen: the
//! train, travel date, seat class, passenger count and one form entry per
//! passenger. Finalizing a draft validates every passenger, prices the
//! booking and issues a PNR. Train availability is never decremented.

mod error;
mod pnr;

use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::{
    Booking, BookingStatus, Passenger, PassengerDraft, SeatClass, Train, validate_passengers,
};
use crate::fare::{self, FareError, FareQuote, MAX_PASSENGERS};

pub use error::BookingError;
pub use pnr::generate_pnr;

/// An in-progress booking, owned by a single booking view.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    train: Arc<Train>,
    date: NaiveDate,
    class: Option<SeatClass>,
    passengers: Vec<PassengerDraft>,
}

impl BookingDraft {
    /// Start a booking for one passenger with no class selected.
    ///
    /// The train must run on `date`.
    pub fn new(train: Arc<Train>, date: NaiveDate) -> Result<Self, BookingError> {
        if !train.runs_on(date) {
            return Err(BookingError::NotRunning {
                train: train.id.to_string(),
                date,
            });
        }
        Ok(Self {
            train,
            date,
            class: None,
            passengers: vec![PassengerDraft::default()],
        })
    }

    pub fn train(&self) -> &Train {
        &self.train
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn class(&self) -> Option<SeatClass> {
        self.class
    }

    /// Number of passengers on the booking.
    pub fn passenger_count(&self) -> u32 {
        self.passengers.len() as u32
    }

    /// The passenger form entries, in order.
    pub fn passengers(&self) -> &[PassengerDraft] {
        &self.passengers
    }

    /// Edit the passenger form entries.
    pub fn passengers_mut(&mut self) -> &mut [PassengerDraft] {
        &mut self.passengers
    }

    /// Choose a seat class. Only classes with seats left can be chosen.
    pub fn select_class(&mut self, class: SeatClass) -> Result<(), BookingError> {
        if !self.train.is_offered(class) {
            return Err(FareError::ClassUnavailable {
                train: self.train.id.to_string(),
                class,
            }
            .into());
        }
        self.class = Some(class);
        Ok(())
    }

    /// Change the passenger count, keeping entries already filled in.
    ///
    /// New entries start blank with gender preselected.
    pub fn set_passenger_count(&mut self, count: u32) -> Result<(), BookingError> {
        if !(1..=MAX_PASSENGERS).contains(&count) {
            return Err(FareError::InvalidPassengerCount(count).into());
        }
        self.passengers
            .resize_with(count as usize, PassengerDraft::default);
        Ok(())
    }

    /// Replace every passenger entry at once, as on form submission.
    ///
    /// The number of entries must match the chosen passenger count.
    pub fn submit_passengers(&mut self, passengers: Vec<PassengerDraft>) -> Result<(), BookingError> {
        let expected = self.passenger_count();
        if passengers.len() != expected as usize {
            return Err(BookingError::PassengerCountMismatch {
                expected,
                actual: passengers.len(),
            });
        }
        self.passengers = passengers;
        Ok(())
    }

    /// Price the booking as it stands.
    pub fn quote(&self) -> Result<FareQuote, BookingError> {
        let class = self.class.ok_or(BookingError::NoClassSelected)?;
        Ok(fare::quote(&self.train, class, self.passenger_count())?)
    }

    /// Validate every passenger entry.
    pub fn validate(&self) -> Result<Vec<Passenger>, BookingError> {
        validate_passengers(&self.passengers).map_err(BookingError::Validation)
    }

    /// Confirm the booking.
    ///
    /// The booking keeps its own copy of the train. Nothing in the catalog
    /// changes.
    pub fn finalize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Booking, BookingError> {
        let class = self.class.ok_or(BookingError::NoClassSelected)?;
        let fare = self.quote()?;
        let passengers = match self.validate() {
            Ok(passengers) => passengers,
            Err(e) => {
                debug!(train = %self.train.id, error = %e, "Booking rejected");
                return Err(e);
            }
        };

        let pnr = generate_pnr(rng);
        let booking = Booking {
            id: format!("b{}", pnr),
            train: Train::clone(&self.train),
            date: self.date,
            passengers,
            class,
            status: BookingStatus::Confirmed,
            pnr,
            total_fare: fare.total,
        };

        info!(
            train = %booking.train.id,
            %class,
            passengers = booking.passengers.len(),
            total = booking.total_fare,
            pnr = %booking.pnr,
            "Booking confirmed"
        );

        Ok(booking)
    }
}
