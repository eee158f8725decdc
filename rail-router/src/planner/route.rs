//! Route reconstruction.
//!
//! Walks the predecessor chain of a finished search back from a target
//! and replays the connection adjustments on the chosen legs, so the
//! returned legs carry the times they would actually run at (day
//! wraparound applied) and the replayed composite cost agrees exactly
//! with the distance the search computed.

use chrono::Duration;

use crate::domain::{Leg, StationId};
use crate::graph::EdgeIx;

use super::dijkstra::ShortestPaths;

/// A concrete itinerary between two stations.
///
/// An empty route means the target is the source itself or is
/// unreachable; both are normal outcomes.
#[derive(Debug, Clone)]
pub struct Route {
    legs: Vec<Leg>,
    total_price: f64,
    total_duration: Duration,
    total_cost: f64,
}

impl Route {
    /// An empty route: no legs, zero price, zero duration.
    pub fn empty() -> Self {
        Self {
            legs: Vec::new(),
            total_price: 0.0,
            total_duration: Duration::zero(),
            total_cost: 0.0,
        }
    }

    /// The legs in travel order, with wraparound-adjusted times.
    ///
    /// Each leg's day offset is decided against the stored times of the
    /// leg before it in the chain, not accumulated along the route, so
    /// after a mid-route wrap a later leg may carry a smaller day
    /// offset than its predecessor's arrival. The composite cost uses
    /// the same pairing, which is what keeps [`Route::total_cost`]
    /// equal to the search's distance.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns true if the route has no legs.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Sum of the leg prices.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Elapsed time from first departure to last arrival, layovers included.
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// The composite price-times-duration cost the search minimised.
    ///
    /// Equals the search's distance for the route's target.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

/// Rebuild the leg sequence from `paths.source()` to `target`.
pub(super) fn reconstruct(paths: &ShortestPaths<'_>, target: &StationId) -> Route {
    if target == paths.source() {
        return Route::empty();
    }

    // Walk backwards to the source, collecting the chosen edges.
    let mut chain: Vec<EdgeIx> = Vec::new();
    let mut current = target;
    loop {
        match paths.predecessor(current) {
            Some((previous, edge)) => {
                chain.push(edge);
                current = previous;
            }
            None => {
                if current == paths.source() {
                    break;
                }
                // No predecessor chain: target is unreachable.
                return Route::empty();
            }
        }
    }
    chain.reverse();

    // Forward replay. Costs and adjustments are computed against the
    // stored predecessor leg, exactly as the search weighed them.
    let graph = paths.graph();
    let cost = paths.cost_model();

    let mut legs: Vec<Leg> = Vec::with_capacity(chain.len());
    let mut total_price = 0.0;
    let mut total_duration = Duration::zero();
    let mut total_cost = 0.0;
    let mut previous: Option<&Leg> = None;

    for edge_ix in chain {
        let stored = graph.edge(edge_ix).leg();
        match previous {
            None => {
                total_cost += cost.single_leg_cost(stored);
                total_price += stored.price();
                total_duration = total_duration + stored.duration();
                legs.push(stored.clone());
            }
            Some(prev) => {
                total_cost += cost.connecting_cost(prev, stored);
                let adjusted = cost.connection_adjusted(prev, stored);
                let layover = adjusted.departure().signed_duration_since(prev.arrival());
                total_price += stored.price();
                total_duration = total_duration + adjusted.duration() + layover;
                legs.push(adjusted);
            }
        }
        previous = Some(stored);
    }

    Route {
        legs,
        total_price,
        total_duration,
        total_cost,
    }
}
