//! Scheduled service leg type.
//!
//! A `Leg` is one scheduled, non-stop service between two stations.
//! Legs are immutable once constructed; the derived duration is
//! computed exactly once, at construction.

use chrono::Duration;

use super::{DayTime, StationId};

/// Error returned when constructing an invalid leg.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LegError {
    /// Price must be a non-negative finite number
    #[error("invalid price {0}: must be non-negative and finite")]
    InvalidPrice(f64),
}

/// One scheduled service between two stations.
///
/// Departure and arrival are clock times within a single day. A leg whose
/// arrival clock time is not after its departure is assumed to cross
/// midnight: its arrival is normalised onto the following day, so that
/// `arrival() > departure()` and `duration()` is positive always hold.
///
/// # Examples
///
/// ```
/// use rail_router::domain::{DayTime, Leg, StationId};
///
/// let leg = Leg::new(
///     "L1".to_owned(),
///     StationId::parse("1929").unwrap(),
///     StationId::parse("1921").unwrap(),
///     DayTime::parse_hms("23:00:00").unwrap(),
///     DayTime::parse_hms("01:30:00").unwrap(),
///     250.0,
/// )
/// .unwrap();
///
/// // Overnight leg: duration is 2h30m, not negative
/// assert_eq!(leg.duration(), chrono::Duration::minutes(150));
/// assert_eq!(leg.arrival().day_offset(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    id: String,
    origin: StationId,
    destination: StationId,
    departure: DayTime,
    arrival: DayTime,
    price: f64,
    duration: Duration,
}

impl Leg {
    /// Construct a leg, normalising overnight arrivals.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the price is negative or not finite.
    pub fn new(
        id: String,
        origin: StationId,
        destination: StationId,
        departure: DayTime,
        arrival: DayTime,
        price: f64,
    ) -> Result<Self, LegError> {
        if !price.is_finite() || price < 0.0 {
            return Err(LegError::InvalidPrice(price));
        }

        // A leg arriving at or before its departure crosses midnight.
        let arrival = if arrival <= departure {
            arrival.next_day()
        } else {
            arrival
        };

        let duration = arrival.signed_duration_since(departure);

        Ok(Leg {
            id,
            origin,
            destination,
            departure,
            arrival,
            price,
            duration,
        })
    }

    /// Returns the schedule's identifier for this leg.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the origin station.
    pub fn origin(&self) -> &StationId {
        &self.origin
    }

    /// Returns the destination station.
    pub fn destination(&self) -> &StationId {
        &self.destination
    }

    /// Returns the departure time.
    pub fn departure(&self) -> DayTime {
        self.departure
    }

    /// Returns the arrival time (normalised past midnight if overnight).
    pub fn arrival(&self) -> DayTime {
        self.arrival
    }

    /// Returns the ticket price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the travel duration, always positive.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns a copy of this leg running 24 hours later.
    ///
    /// Used when a connection forces the leg onto the following day.
    /// The original leg is never mutated.
    pub fn shifted_by_day(&self) -> Self {
        Leg {
            id: self.id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure: self.departure.next_day(),
            arrival: self.arrival.next_day(),
            price: self.price,
            duration: self.duration,
        }
    }
}
