//! Single-source least-cost search.
//!
//! A modified Dijkstra over the station multigraph. The deviation from
//! the textbook algorithm is that the weight of an arc out of a settled
//! station depends on the concrete service edge used to reach that
//! station: the first hop of a route is weighed in isolation, every
//! later hop is weighed as a connection after the predecessor edge
//! (layover and day wraparound included). A generic shortest-path
//! routine assuming static edge weights would silently get this wrong,
//! so the search carries a predecessor edge per station alongside the
//! usual distance and predecessor station.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::domain::{Leg, StationId};
use crate::graph::{EdgeIx, StationGraph};

use super::cost::CostModel;
use super::route::{self, Route};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Search requested from a station absent from the graph
    #[error("unknown station: {0}")]
    UnknownStation(StationId),
}

/// Heap entry: a station with its tentative distance.
///
/// Ordered as a min-heap on distance; ties fall back to the station
/// identifier so the pop order is deterministic for a fixed input.
#[derive(Debug, Clone)]
struct Frontier {
    distance: f64,
    station: StationId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest distance
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The result of one single-source search, reusable for every target.
#[derive(Debug)]
pub struct ShortestPaths<'g> {
    graph: &'g StationGraph,
    cost: CostModel,
    source: StationId,
    distance: HashMap<StationId, f64>,
    predecessor: HashMap<StationId, (StationId, EdgeIx)>,
}

impl<'g> ShortestPaths<'g> {
    /// Returns the source station of this search.
    pub fn source(&self) -> &StationId {
        &self.source
    }

    /// Returns the least cost of reaching `station` from the source,
    /// or `None` if it is unreachable.
    ///
    /// The source itself is at distance zero.
    pub fn distance(&self, station: &StationId) -> Option<f64> {
        self.distance.get(station).copied()
    }

    /// Returns the predecessor station and the service edge that
    /// realises the optimal cost into `station`.
    pub fn predecessor(&self, station: &StationId) -> Option<(&StationId, EdgeIx)> {
        self.predecessor.get(station).map(|(s, e)| (s, *e))
    }

    /// Reconstructs the concrete leg sequence from the source to `target`.
    ///
    /// Unreachable targets and `target == source` yield an empty route.
    pub fn route(&self, target: &StationId) -> Route {
        route::reconstruct(self, target)
    }

    pub(super) fn graph(&self) -> &'g StationGraph {
        self.graph
    }

    pub(super) fn cost_model(&self) -> &CostModel {
        &self.cost
    }
}

/// Run the search from `source`, settling every reachable station.
///
/// # Errors
///
/// Returns [`SearchError::UnknownStation`] if `source` is not in the
/// graph. An unreachable target is not an error; it simply never
/// appears in the result.
pub fn shortest_paths<'g>(
    graph: &'g StationGraph,
    cost: &CostModel,
    source: &StationId,
) -> Result<ShortestPaths<'g>, SearchError> {
    if !graph.contains_station(source) {
        return Err(SearchError::UnknownStation(source.clone()));
    }

    let mut distance: HashMap<StationId, f64> = HashMap::new();
    let mut predecessor: HashMap<StationId, (StationId, EdgeIx)> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distance.insert(source.clone(), 0.0);
    heap.push(Frontier {
        distance: 0.0,
        station: source.clone(),
    });

    while let Some(Frontier {
        distance: settled,
        station: current,
    }) = heap.pop()
    {
        // Stale entry: the station was already settled at a lower cost.
        if settled > distance.get(&current).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        // The edge this station was reached by; None only at the source.
        // Settled means final, so connecting costs out of here are fixed.
        let arrived_by: Option<Leg> = predecessor
            .get(&current)
            .map(|(_, edge)| graph.edge(*edge).leg().clone());

        for (neighbour, arc) in graph.outgoing(&current) {
            let mut best: Option<(f64, EdgeIx)> = None;
            for &edge_ix in arc {
                let leg = graph.edge(edge_ix).leg();
                let weight = match &arrived_by {
                    None => cost.single_leg_cost(leg),
                    Some(prev) => cost.connecting_cost(prev, leg),
                };
                // Strict comparison keeps the earliest-inserted edge on ties
                let better = match best {
                    None => true,
                    Some((best_weight, _)) => weight < best_weight,
                };
                if better {
                    best = Some((weight, edge_ix));
                }
            }
            let Some((weight, edge_ix)) = best else {
                continue;
            };

            let alt = settled + weight;
            if alt < distance.get(neighbour).copied().unwrap_or(f64::INFINITY) {
                distance.insert(neighbour.clone(), alt);
                predecessor.insert(neighbour.clone(), (current.clone(), edge_ix));
                heap.push(Frontier {
                    distance: alt,
                    station: neighbour.clone(),
                });
            }
        }
    }

    debug!(source = %source, reached = distance.len(), "search settled");

    Ok(ShortestPaths {
        graph,
        cost: cost.clone(),
        source: source.clone(),
        distance,
        predecessor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayTime, Leg};

    fn station(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn leg(id: &str, from: &str, to: &str, dep: &str, arr: &str, price: f64) -> Leg {
        Leg::new(
            id.to_owned(),
            station(from),
            station(to),
            DayTime::parse_hms(dep).unwrap(),
            DayTime::parse_hms(arr).unwrap(),
            price,
        )
        .unwrap()
    }

    fn graph_of(legs: Vec<Leg>) -> StationGraph {
        let mut graph = StationGraph::new();
        for l in legs {
            graph.add_service(l).unwrap();
        }
        graph
    }

    fn search<'g>(graph: &'g StationGraph, source: &str) -> ShortestPaths<'g> {
        shortest_paths(graph, &CostModel::default(), &station(source)).unwrap()
    }

    #[test]
    fn source_distance_is_zero() {
        let graph = graph_of(vec![leg("L1", "A", "B", "08:00:00", "10:00:00", 40.0)]);
        let paths = search(&graph, "A");
        assert_eq!(paths.distance(&station("A")), Some(0.0));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let graph = graph_of(vec![leg("L1", "A", "B", "08:00:00", "10:00:00", 40.0)]);
        let result = shortest_paths(&graph, &CostModel::default(), &station("Z"));
        assert!(matches!(result, Err(SearchError::UnknownStation(_))));
    }

    #[test]
    fn unreachable_station_has_no_distance() {
        // B -> A exists, A -> B does not
        let graph = graph_of(vec![leg("L1", "B", "A", "08:00:00", "10:00:00", 40.0)]);
        let paths = search(&graph, "A");
        assert_eq!(paths.distance(&station("B")), None);
        assert!(paths.predecessor(&station("B")).is_none());
    }

    #[test]
    fn first_hop_picks_cheapest_parallel_edge() {
        let graph = graph_of(vec![
            leg("L1", "A", "B", "08:00:00", "09:00:00", 10.0),
            leg("L2", "A", "B", "09:00:00", "10:00:00", 5.0),
        ]);
        let paths = search(&graph, "A");

        // 5 * 3600 beats 10 * 3600
        assert_eq!(paths.distance(&station("B")), Some(18_000.0));
        let (_, edge) = paths.predecessor(&station("B")).unwrap();
        assert_eq!(graph.edge(edge).id(), "L2");
    }

    #[test]
    fn equal_weight_parallel_edges_keep_insertion_order() {
        let graph = graph_of(vec![
            leg("L1", "A", "B", "08:00:00", "09:00:00", 10.0),
            leg("L2", "A", "B", "12:00:00", "13:00:00", 10.0),
        ]);
        let paths = search(&graph, "A");

        let (_, edge) = paths.predecessor(&station("B")).unwrap();
        assert_eq!(graph.edge(edge).id(), "L1");
    }

    #[test]
    fn two_hop_beats_expensive_direct() {
        // Direct A->C: 100 * 5h = 1_800_000
        // A->B then B->C: 40 * 2h = 288_000, then (40+40) * 4.5h = 1_296_000
        let graph = graph_of(vec![
            leg("D1", "A", "C", "08:00:00", "13:00:00", 100.0),
            leg("H1", "A", "B", "08:00:00", "10:00:00", 40.0),
            leg("H2", "B", "C", "10:30:00", "12:30:00", 40.0),
        ]);
        let paths = search(&graph, "A");

        assert_eq!(paths.distance(&station("C")), Some(1_584_000.0));
        let (via, edge) = paths.predecessor(&station("C")).unwrap();
        assert_eq!(via, &station("B"));
        assert_eq!(graph.edge(edge).id(), "H2");
    }

    #[test]
    fn direct_beats_slow_two_hop() {
        // Direct A->C: 10 * 1h = 36_000
        // A->B then B->C: 10 * 1h = 36_000, then (10+10) * (1h + 1h + 10h) huge
        let graph = graph_of(vec![
            leg("D1", "A", "C", "08:00:00", "09:00:00", 10.0),
            leg("H1", "A", "B", "08:00:00", "09:00:00", 10.0),
            leg("H2", "B", "C", "20:00:00", "21:00:00", 10.0),
        ]);
        let paths = search(&graph, "A");

        assert_eq!(paths.distance(&station("C")), Some(36_000.0));
        let (via, edge) = paths.predecessor(&station("C")).unwrap();
        assert_eq!(via, &station("A"));
        assert_eq!(graph.edge(edge).id(), "D1");
    }

    #[test]
    fn connection_weight_depends_on_predecessor_edge() {
        // The weight of B -> C is a connecting cost after the edge that
        // reached B, not a single-leg cost: it covers both legs and the
        // layover, priced at the combined fare.
        let graph = graph_of(vec![
            leg("IN1", "A", "B", "08:00:00", "09:00:00", 1.0),
            leg("OUT", "B", "C", "09:30:00", "10:30:00", 1.0),
        ]);
        let paths = search(&graph, "A");

        // Into B: 1 * 3600 = 3600
        // B to C after IN1: (1+1) * (1h + 1h + 30m) = 2 * 9000 = 18000
        assert_eq!(paths.distance(&station("C")), Some(3_600.0 + 18_000.0));
    }

    #[test]
    fn missed_connection_wraps_to_next_day() {
        // OUT departs before IN1 arrives, so it runs the following day.
        let graph = graph_of(vec![
            leg("IN1", "A", "B", "08:00:00", "12:00:00", 1.0),
            leg("OUT", "B", "C", "09:00:00", "10:00:00", 1.0),
        ]);
        let paths = search(&graph, "A");

        // Into B: 1 * 4h = 14_400
        // B to C: layover 12:00 -> 09:00 next day = 21h;
        // (1+1) * (4h + 1h + 21h) = 2 * 93_600 = 187_200
        assert_eq!(paths.distance(&station("C")), Some(14_400.0 + 187_200.0));
    }

    #[test]
    fn search_is_deterministic() {
        let legs = vec![
            leg("L1", "A", "B", "08:00:00", "10:00:00", 40.0),
            leg("L2", "A", "B", "09:00:00", "11:00:00", 40.0),
            leg("L3", "B", "C", "11:30:00", "13:00:00", 20.0),
            leg("L4", "A", "C", "08:00:00", "14:00:00", 55.0),
            leg("L5", "C", "A", "15:00:00", "18:00:00", 30.0),
        ];
        let graph1 = graph_of(legs.clone());
        let graph2 = graph_of(legs);

        for source in ["A", "B", "C"] {
            let p1 = search(&graph1, source);
            let p2 = search(&graph2, source);
            for target in ["A", "B", "C"] {
                let t = station(target);
                assert_eq!(p1.distance(&t), p2.distance(&t));
                assert_eq!(
                    p1.predecessor(&t).map(|(s, e)| (s.clone(), graph1.edge(e).id().to_owned())),
                    p2.predecessor(&t).map(|(s, e)| (s.clone(), graph2.edge(e).id().to_owned())),
                );
            }
        }
    }
}
