//! Clock-of-day time handling.
//!
//! Schedules provide times as "HH:MM:SS" strings with no date attached.
//! This module provides a time type that stays meaningful across the
//! day boundary: a time can be pushed onto the following day when a
//! connection wraps past midnight, and durations between such times
//! come out positive.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use chrono::Duration;
use serde::{Serialize, Serializer};

const SECS_PER_DAY: i64 = 86_400;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day, possibly shifted onto a following day.
///
/// Internally this is a count of seconds since midnight of day zero.
/// Freshly parsed times always lie within day zero; [`DayTime::next_day`]
/// produces the same clock time 24 hours later, which is how overnight
/// connections are modelled.
///
/// # Examples
///
/// ```
/// use rail_router::domain::DayTime;
///
/// let arrival = DayTime::parse_hms("23:50:00").unwrap();
/// let departure = DayTime::parse_hms("00:10:00").unwrap().next_day();
///
/// let layover = departure.signed_duration_since(arrival);
/// assert_eq!(layover, chrono::Duration::minutes(20));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayTime {
    seconds: i64,
}

impl DayTime {
    /// Parse a time from "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_router::domain::DayTime;
    ///
    /// assert!(DayTime::parse_hms("00:00:00").is_ok());
    /// assert!(DayTime::parse_hms("23:59:59").is_ok());
    ///
    /// // Invalid formats
    /// assert!(DayTime::parse_hms("18:09").is_err());
    /// assert!(DayTime::parse_hms("24:00:00").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 8 characters: HH:MM:SS
        if s.len() != 8 {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new("expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self::from_parts(hour, minute, second))
    }

    /// Create a time from hour/minute/second components.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        Ok(Self::from_parts(hour, minute, second))
    }

    fn from_parts(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            seconds: i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second),
        }
    }

    /// Returns the hour (0-23), ignoring any day shift.
    pub fn hour(&self) -> u32 {
        (self.seconds.rem_euclid(SECS_PER_DAY) / 3600) as u32
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        (self.seconds.rem_euclid(3600) / 60) as u32
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.seconds.rem_euclid(60) as u32
    }

    /// Returns how many whole days this time has been shifted past day zero.
    pub fn day_offset(&self) -> i64 {
        self.seconds.div_euclid(SECS_PER_DAY)
    }

    /// Returns the same clock time 24 hours later.
    pub fn next_day(self) -> Self {
        Self {
            seconds: self.seconds + SECS_PER_DAY,
        }
    }

    /// Returns the duration between two times.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::seconds(self.seconds - other.seconds)
    }
}

impl Add<Duration> for DayTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            seconds: self.seconds + rhs.num_seconds(),
        }
    }
}

impl Ord for DayTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds.cmp(&other.seconds)
    }
}

impl PartialOrd for DayTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.day_offset();
        if offset == 0 {
            write!(f, "DayTime({self})")
        } else {
            write!(f, "DayTime({self}+{offset}d)")
        }
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl Serialize for DayTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
