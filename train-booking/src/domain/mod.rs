//! Domain types for the train booking engine.
//!
//! This module contains the core domain model types that represent
//! validated catalog and booking data. All types enforce their invariants
//! at construction time, so code that receives these types can trust their
//! validity.

mod booking;
mod passenger;
mod seat;
mod station;
mod time;
mod train;

pub use booking::{Booking, BookingStatus, InvalidPnr, Pnr, User, search_bookings};
pub use passenger::{
    AGE_LIMIT, Berth, Field, FieldError, Gender, MIN_AGE, Passenger, PassengerDraft,
    validate_passengers,
};
pub use seat::{ClassTable, SeatClass, UnknownSeatClass};
pub use station::{InvalidStationCode, Station, StationCode};
pub use time::{ClockTime, DaysOfOperation, TimeError, TravelDuration, weekday_abbrev};
pub use train::{OfferedClass, Train, TrainId};
