//! Route reporters.
//!
//! Reporters consume one (source, target, route) triple per ordered
//! station pair. The text reporter writes the per-pair listing the
//! program prints; the JSON reporter accumulates records and writes a
//! single array on `finish`.

use std::io::{self, Write};

use chrono::Duration;
use serde::Serialize;

use crate::domain::{DayTime, Leg, StationId};
use crate::planner::{Reporter, Route};

fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{}h{:02}m", minutes / 60, minutes % 60)
}

/// Writes human-readable route listings.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(
        &mut self,
        source: &StationId,
        target: &StationId,
        route: &Route,
    ) -> io::Result<()> {
        writeln!(self.out, "{source} ---> {target}")?;

        if route.is_empty() {
            writeln!(self.out, "  no route")?;
            return Ok(());
        }

        for leg in route.legs() {
            writeln!(
                self.out,
                "  [{}] {} {} -> {} {}  {:.2}",
                leg.id(),
                leg.origin(),
                leg.departure(),
                leg.destination(),
                leg.arrival(),
                leg.price(),
            )?;
        }
        writeln!(
            self.out,
            "  total price {:.2}, total duration {}",
            route.total_price(),
            format_duration(route.total_duration()),
        )?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct LegRecord {
    id: String,
    origin: StationId,
    destination: StationId,
    departure: DayTime,
    arrival: DayTime,
    price: f64,
}

impl LegRecord {
    fn from_leg(leg: &Leg) -> Self {
        Self {
            id: leg.id().to_owned(),
            origin: leg.origin().clone(),
            destination: leg.destination().clone(),
            departure: leg.departure(),
            arrival: leg.arrival(),
            price: leg.price(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PairRecord {
    source: StationId,
    target: StationId,
    reachable: bool,
    legs: Vec<LegRecord>,
    total_price: f64,
    total_duration_seconds: i64,
}

/// Collects route records and writes them as one JSON array.
pub struct JsonReporter<W: Write> {
    out: W,
    records: Vec<PairRecord>,
}

impl<W: Write> JsonReporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            records: Vec::new(),
        }
    }

    /// Write the accumulated records.
    pub fn finish(mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.records)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(
        &mut self,
        source: &StationId,
        target: &StationId,
        route: &Route,
    ) -> io::Result<()> {
        self.records.push(PairRecord {
            source: source.clone(),
            target: target.clone(),
            reachable: !route.is_empty(),
            legs: route.legs().iter().map(LegRecord::from_leg).collect(),
            total_price: route.total_price(),
            total_duration_seconds: route.total_duration().num_seconds(),
        });
        Ok(())
    }
}
