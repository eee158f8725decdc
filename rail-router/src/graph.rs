//! Directed multigraph of stations and scheduled services.
//!
//! Several services a day may run between the same pair of stations;
//! each is kept as its own edge rather than being merged or collapsed
//! to the cheapest. The set of parallel edges sharing one ordered
//! station pair is called an arc.
//!
//! Edges live in a single arena; arcs hold indices into it, and the
//! outgoing arc of the origin and the incoming arc of the destination
//! always reference the same edge entries. The graph is append-only:
//! once built it is read-only for the lifetime of the program.

use std::collections::BTreeMap;

use crate::domain::{Leg, StationId};

/// Graph construction errors.
///
/// These indicate misuse of the build sequence and should be surfaced
/// immediately, not swallowed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Station with this identifier already exists
    #[error("station {0} already exists in the graph")]
    DuplicateStation(StationId),

    /// A service with this identifier already exists on the arc
    #[error("service {id} already exists between {from} and {to}")]
    DuplicateEdge {
        id: String,
        from: StationId,
        to: StationId,
    },
}

/// Index of an edge within a [`StationGraph`]'s arena.
///
/// Only meaningful for the graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIx(usize);

/// One parallel edge of an arc, wrapping a single scheduled leg.
#[derive(Debug, Clone)]
pub struct ServiceEdge {
    leg: Leg,
}

impl ServiceEdge {
    /// Returns the edge identifier (the schedule's leg id).
    pub fn id(&self) -> &str {
        self.leg.id()
    }

    /// Returns the wrapped leg.
    pub fn leg(&self) -> &Leg {
        &self.leg
    }
}

#[derive(Debug, Default)]
struct Node {
    out: BTreeMap<StationId, Vec<EdgeIx>>,
    inbound: BTreeMap<StationId, Vec<EdgeIx>>,
}

/// A directed multigraph keyed by station identifiers.
///
/// # Examples
///
/// ```
/// use rail_router::domain::{DayTime, Leg, StationId};
/// use rail_router::graph::StationGraph;
///
/// let a = StationId::parse("A").unwrap();
/// let b = StationId::parse("B").unwrap();
///
/// let leg = Leg::new(
///     "L1".to_owned(),
///     a.clone(),
///     b.clone(),
///     DayTime::parse_hms("08:00:00").unwrap(),
///     DayTime::parse_hms("10:00:00").unwrap(),
///     40.0,
/// )
/// .unwrap();
///
/// let mut graph = StationGraph::new();
/// graph.add_service(leg).unwrap();
///
/// assert_eq!(graph.station_count(), 2);
/// assert!(graph.outgoing_arc(&a, &b).is_some());
/// assert!(graph.outgoing_arc(&b, &a).is_none());
/// ```
#[derive(Debug, Default)]
pub struct StationGraph {
    nodes: BTreeMap<StationId, Node>,
    edges: Vec<ServiceEdge>,
}

impl StationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station with no services.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateStation`] if the identifier is
    /// already present; callers that cannot rule this out should check
    /// with [`StationGraph::contains_station`] first.
    pub fn add_station(&mut self, id: StationId) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateStation(id));
        }
        self.nodes.insert(id, Node::default());
        Ok(())
    }

    /// Returns true if the station is present.
    pub fn contains_station(&self, id: &StationId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Add a scheduled service, creating its endpoint stations if absent.
    ///
    /// The new edge joins the arc for the leg's (origin, destination)
    /// pair on both the outgoing side of the origin and the incoming
    /// side of the destination.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEdge`] if a service with the same
    /// identifier already exists on that arc.
    pub fn add_service(&mut self, leg: Leg) -> Result<EdgeIx, GraphError> {
        let from = leg.origin().clone();
        let to = leg.destination().clone();

        if !self.contains_station(&from) {
            self.add_station(from.clone())?;
        }
        if !self.contains_station(&to) {
            self.add_station(to.clone())?;
        }

        let duplicate = self
            .nodes
            .get(&from)
            .and_then(|node| node.out.get(&to))
            .is_some_and(|arc| arc.iter().any(|&ix| self.edges[ix.0].id() == leg.id()));
        if duplicate {
            return Err(GraphError::DuplicateEdge {
                id: leg.id().to_owned(),
                from,
                to,
            });
        }

        let ix = EdgeIx(self.edges.len());
        self.edges.push(ServiceEdge { leg });

        if let Some(node) = self.nodes.get_mut(&from) {
            node.out.entry(to.clone()).or_default().push(ix);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.inbound.entry(from).or_default().push(ix);
        }

        Ok(ix)
    }

    /// Returns the parallel edges from `from` to `to`, in insertion order.
    ///
    /// Absence is a normal query outcome, not an error.
    pub fn outgoing_arc(&self, from: &StationId, to: &StationId) -> Option<&[EdgeIx]> {
        self.nodes
            .get(from)
            .and_then(|node| node.out.get(to))
            .map(Vec::as_slice)
    }

    /// Returns the parallel edges into `to` from `from`, in insertion order.
    ///
    /// Mirrors [`StationGraph::outgoing_arc`]: both sides reference the
    /// same edge entries.
    pub fn incoming_arc(&self, to: &StationId, from: &StationId) -> Option<&[EdgeIx]> {
        self.nodes
            .get(to)
            .and_then(|node| node.inbound.get(from))
            .map(Vec::as_slice)
    }

    /// Iterates the outgoing arcs of a station in destination order.
    ///
    /// Yields nothing for an unknown station.
    pub fn outgoing(&self, from: &StationId) -> impl Iterator<Item = (&StationId, &[EdgeIx])> {
        self.nodes
            .get(from)
            .into_iter()
            .flat_map(|node| node.out.iter().map(|(to, arc)| (to, arc.as_slice())))
    }

    /// Resolves an edge index produced by this graph.
    ///
    /// Panics on an index from a different graph.
    pub fn edge(&self, ix: EdgeIx) -> &ServiceEdge {
        &self.edges[ix.0]
    }

    /// Iterates all station identifiers in sorted order.
    pub fn stations(&self) -> impl Iterator<Item = &StationId> {
        self.nodes.keys()
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of scheduled services.
    pub fn service_count(&self) -> usize {
        self.edges.len()
    }
}
