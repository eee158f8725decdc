//! Schedule loading.
//!
//! The schedule file is an XML document listing single-leg services:
//!
//! ```xml
//! <TrainLegs>
//!   <TrainLeg TrainLegID="1" DepartureStationID="1929" ArrivalStationID="1921"
//!             DepartureTimeString="18:09:00" ArrivalTimeString="18:37:00"
//!             Price="1000.0"/>
//! </TrainLegs>
//! ```
//!
//! Rows are validated into domain [`Leg`]s as they are read; a bad row
//! fails the whole load with the offending leg id in the error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{DayTime, InvalidStationId, Leg, LegError, StationId, TimeError};

/// Error from schedule loading.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Failed to read the schedule file
    #[error("failed to read schedule: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid schedule XML
    #[error("failed to parse schedule XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// A row carries an invalid station identifier
    #[error("invalid station id in leg {id}")]
    InvalidStation {
        id: String,
        #[source]
        source: InvalidStationId,
    },

    /// A row carries an invalid time string
    #[error("invalid time in leg {id}")]
    InvalidTime {
        id: String,
        #[source]
        source: TimeError,
    },

    /// A row fails leg validation
    #[error("invalid leg {id}")]
    InvalidLeg {
        id: String,
        #[source]
        source: LegError,
    },
}

/// Producer of an ordered sequence of validated legs.
pub trait ScheduleSource {
    /// Load every leg of the schedule.
    fn load(&mut self) -> Result<Vec<Leg>, ScheduleError>;
}

#[derive(Debug, Deserialize)]
struct TrainLegsDoc {
    #[serde(rename = "TrainLeg", default)]
    legs: Vec<TrainLegRow>,
}

#[derive(Debug, Deserialize)]
struct TrainLegRow {
    #[serde(rename = "@TrainLegID")]
    id: String,
    #[serde(rename = "@DepartureStationID")]
    departure_station: String,
    #[serde(rename = "@ArrivalStationID")]
    arrival_station: String,
    #[serde(rename = "@DepartureTimeString")]
    departure_time: String,
    #[serde(rename = "@ArrivalTimeString")]
    arrival_time: String,
    #[serde(rename = "@Price")]
    price: f64,
}

impl TrainLegRow {
    fn into_leg(self) -> Result<Leg, ScheduleError> {
        let origin = StationId::parse(&self.departure_station).map_err(|source| {
            ScheduleError::InvalidStation {
                id: self.id.clone(),
                source,
            }
        })?;
        let destination =
            StationId::parse(&self.arrival_station).map_err(|source| {
                ScheduleError::InvalidStation {
                    id: self.id.clone(),
                    source,
                }
            })?;
        let departure =
            DayTime::parse_hms(&self.departure_time).map_err(|source| {
                ScheduleError::InvalidTime {
                    id: self.id.clone(),
                    source,
                }
            })?;
        let arrival =
            DayTime::parse_hms(&self.arrival_time).map_err(|source| ScheduleError::InvalidTime {
                id: self.id.clone(),
                source,
            })?;

        Leg::new(
            self.id.clone(),
            origin,
            destination,
            departure,
            arrival,
            self.price,
        )
        .map_err(|source| ScheduleError::InvalidLeg {
            id: self.id,
            source,
        })
    }
}

/// Parse schedule XML from a string.
pub fn legs_from_str(xml: &str) -> Result<Vec<Leg>, ScheduleError> {
    let doc: TrainLegsDoc = quick_xml::de::from_str(xml)?;
    doc.legs.into_iter().map(TrainLegRow::into_leg).collect()
}

/// Parse schedule XML from any buffered reader.
pub fn legs_from_reader<R: BufRead>(reader: R) -> Result<Vec<Leg>, ScheduleError> {
    let doc: TrainLegsDoc = quick_xml::de::from_reader(reader)?;
    doc.legs.into_iter().map(TrainLegRow::into_leg).collect()
}

/// An XML schedule file on disk.
#[derive(Debug, Clone)]
pub struct XmlSchedule {
    path: PathBuf,
}

impl XmlSchedule {
    /// Create a source reading from the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ScheduleSource for XmlSchedule {
    fn load(&mut self) -> Result<Vec<Leg>, ScheduleError> {
        let file = File::open(&self.path)?;
        legs_from_reader(BufReader::new(file))
    }
}
