//! Least-cost route planner.
//!
//! The planner runs a single-source shortest-path search over the
//! station graph, where the weight of an edge is the composite
//! price-times-duration cost of riding it. Because the cost of a
//! connecting leg depends on the arrival time of the leg ridden before
//! it (layover included, wrapping to the next day when the connection
//! cannot be made), edge weights are not static: the search tracks, per
//! station, the concrete service edge used to reach it, and weighs
//! outgoing arcs against that edge.

mod all_pairs;
mod config;
mod cost;
mod dijkstra;
mod route;

pub use all_pairs::{Reporter, plan_all_pairs};
pub use config::PlannerConfig;
pub use cost::CostModel;
pub use dijkstra::{SearchError, ShortestPaths, shortest_paths};
pub use route::Route;
