//! Least-cost itinerary search over a single-day train timetable.
//!
//! Answers: "for every pair of stations, which sequence of scheduled
//! services is cheapest, where cheap means low ticket price *and* low
//! elapsed time, layovers included?"
//!
//! The schedule is a flat list of single-leg services. They form a
//! directed multigraph over stations ([`graph::StationGraph`]), and a
//! connection-aware shortest-path search ([`planner`]) finds the best
//! concrete leg sequence per ordered station pair.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod report;
pub mod schedule;
