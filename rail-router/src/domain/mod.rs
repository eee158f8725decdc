//! Domain types for the timetable router.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod clock;
mod leg;
mod station;

pub use clock::{DayTime, TimeError};
pub use leg::{Leg, LegError};
pub use station::{InvalidStationId, StationId};
