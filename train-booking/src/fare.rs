//! Fare quotes.
//!
//! A quote is the base fare for every passenger plus a per-booking
//! reservation fee, 5% GST on the base fare, and a flat convenience fee.

use serde::Serialize;
use tracing::trace;

use crate::domain::{SeatClass, Train};

/// Most passengers on a single booking.
pub const MAX_PASSENGERS: u32 = 6;

/// Per-booking reservation fee for sleeper class.
pub const SLEEPER_RESERVATION_FEE: u32 = 20;

/// Per-booking reservation fee for every AC class.
pub const AC_RESERVATION_FEE: u32 = 40;

/// Flat per-booking convenience fee.
pub const CONVENIENCE_FEE: u32 = 30;

/// GST rate on the base fare, in percent.
pub const GST_PERCENT: u32 = 5;

/// Errors from quoting a fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// The class has no seats left on this train
    #[error("{class} is not available on train {train}")]
    ClassUnavailable { train: String, class: SeatClass },

    /// Passenger count outside `1..=MAX_PASSENGERS`
    #[error("passenger count must be between 1 and {max}, got {0}", max = MAX_PASSENGERS)]
    InvalidPassengerCount(u32),

    /// The fare does not fit in a `u32` amount
    #[error("fare for {class} on train {train} is too large")]
    FareTooLarge { train: String, class: SeatClass },
}

/// An itemised fare. All amounts are whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub base: u32,
    pub reservation_fee: u32,
    pub gst: u32,
    pub convenience_fee: u32,
    pub total: u32,
}

/// Reservation fee for a booking in `class`.
pub fn reservation_fee(class: SeatClass) -> u32 {
    match class {
        SeatClass::Sleeper => SLEEPER_RESERVATION_FEE,
        SeatClass::Ac3Tier | SeatClass::Ac2Tier | SeatClass::AcFirstClass => AC_RESERVATION_FEE,
    }
}

/// GST on `base`, rounded half-up to the nearest rupee.
pub fn gst(base: u32) -> u32 {
    // u64 so that base * 5 cannot overflow
    ((u64::from(base) * u64::from(GST_PERCENT) + 50) / 100) as u32
}

/// Quote `passengers` seats in `class` on `train`.
///
/// # Examples
///
/// ```
/// use train_booking::catalog::Catalog;
/// use train_booking::domain::SeatClass;
/// use train_booking::fare::quote;
///
/// let catalog = Catalog::builtin();
/// let rajdhani = catalog.train_by_id("1").unwrap();
///
/// let fare = quote(&rajdhani, SeatClass::Ac3Tier, 2).unwrap();
/// assert_eq!(fare.base, 4510);
/// assert_eq!(fare.gst, 226);
/// assert_eq!(fare.total, 4806);
/// ```
pub fn quote(train: &Train, class: SeatClass, passengers: u32) -> Result<FareQuote, FareError> {
    if !(1..=MAX_PASSENGERS).contains(&passengers) {
        return Err(FareError::InvalidPassengerCount(passengers));
    }
    if !train.is_offered(class) {
        return Err(FareError::ClassUnavailable {
            train: train.id.to_string(),
            class,
        });
    }

    let too_large = || FareError::FareTooLarge {
        train: train.id.to_string(),
        class,
    };

    let base = u32::try_from(u64::from(train.price[class]) * u64::from(passengers))
        .map_err(|_| too_large())?;
    let reservation_fee = reservation_fee(class);
    let gst = gst(base);
    let total = u32::try_from(
        u64::from(base) + u64::from(reservation_fee) + u64::from(gst) + u64::from(CONVENIENCE_FEE),
    )
    .map_err(|_| too_large())?;

    trace!(train = %train.id, %class, passengers, total, "Quoted fare");

    Ok(FareQuote {
        base,
        reservation_fee,
        gst,
        convenience_fee: CONVENIENCE_FEE,
        total,
    })
}
