//! All-pairs driver.
//!
//! Runs one single-source search per station and reconstructs a route
//! to every other station from it, so the search cost is amortised over
//! all targets of that source. Each source's searches are independent
//! of every other's; only the read-only graph is shared.

use std::io;

use tracing::{info, warn};

use crate::domain::StationId;
use crate::graph::StationGraph;

use super::config::PlannerConfig;
use super::cost::CostModel;
use super::dijkstra::shortest_paths;
use super::route::Route;

/// Consumer of computed routes.
pub trait Reporter {
    /// Called once per ordered (source, target) pair with the best
    /// route found. The route is empty when the target is unreachable.
    fn report(&mut self, source: &StationId, target: &StationId, route: &Route)
    -> io::Result<()>;
}

/// Compute and report the best route for every ordered station pair.
///
/// A failing search aborts only that source's pairs; the remaining
/// sources are still processed. Reporter failures abort the run.
pub fn plan_all_pairs<R: Reporter>(
    graph: &StationGraph,
    config: &PlannerConfig,
    reporter: &mut R,
) -> io::Result<()> {
    let cost = CostModel::new(config);

    info!(
        stations = graph.station_count(),
        services = graph.service_count(),
        "planning all pairs"
    );

    for source in graph.stations() {
        let paths = match shortest_paths(graph, &cost, source) {
            Ok(paths) => paths,
            Err(error) => {
                warn!(source = %source, %error, "skipping source");
                continue;
            }
        };

        for target in graph.stations() {
            if target == source {
                continue;
            }
            let route = paths.route(target);
            reporter.report(source, target, &route)?;
        }
    }

    Ok(())
}
