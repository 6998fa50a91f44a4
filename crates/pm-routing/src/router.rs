//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The planner calls routing via the [`Router`] trait, so applications can
//! swap in other shortest-path engines (A*, contraction hierarchies) without
//! touching the planner.
//!
//! # Outcomes
//!
//! | Situation                               | Result                       |
//! |-----------------------------------------|------------------------------|
//! | path found                              | `Ok(route)`, ≥ 2 nodes       |
//! | `from == to`                            | `Ok(Route::empty())`         |
//! | `from`/`to` not in the network          | `Ok(Route::empty())`         |
//! | target unreachable                      | `Ok(Route::empty())`         |
//! | predecessor chain broken                | `Err(BrokenPredecessorChain)`|

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::warn;

use pm_core::{EdgeId, GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::{RoutingError, RoutingResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the nodes visited from source to target,
/// their coordinates, and the total length.
///
/// A route is either empty ("no route") or has at least two nodes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub points: Vec<GeoPoint>,
    /// Sum of edge lengths along the route, in metres.
    pub length_m: f64,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve concurrent
/// queries against a shared, immutable [`RoadNetwork`].
pub trait Router: Send + Sync {
    /// Compute the minimum-length route from `from` to `to`.
    ///
    /// "No route" is reported as an empty [`Route`], not as an error.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> RoutingResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph, using
/// `edge_length_m` as cost.
///
/// Equal-cost heap entries are settled in ascending `NodeId` order and a
/// predecessor is only replaced by a strictly shorter path, so the returned
/// route is the same on every run for the same network.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> RoutingResult<Route> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

// Min-heap by cost, then by NodeId (reversed from standard Rust BinaryHeap).
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> RoutingResult<Route> {
    if from == to || !network.contains(from) || !network.contains(to) {
        return Ok(Route::empty());
    }

    let n = network.node_count();
    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: from });

    while let Some(State { cost, node }) = heap.pop() {
        // The target's distance and predecessor are final once it is popped.
        if node == to {
            return reconstruct(network, &prev_edge, from, to, cost);
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length_m[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(State { cost: new_cost, node: neighbor });
            }
        }
    }

    Ok(Route::empty())
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    length_m: f64,
) -> RoutingResult<Route> {
    let mut nodes = vec![to];
    let mut cur = to;

    // A valid chain has at most node_count - 1 links; anything longer loops.
    while cur != from && nodes.len() <= network.node_count() {
        let e = prev_edge[cur.index()];
        if !e.is_valid() {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }

    if cur != from || nodes.len() > network.node_count() {
        warn!(%from, %to, stalled_at = %cur, "predecessor chain did not reach the source");
        return Err(RoutingError::BrokenPredecessorChain { from, to, stalled_at: cur });
    }

    nodes.reverse();
    let points = nodes.iter().map(|id| network.node_pos[id.index()]).collect();

    Ok(Route { nodes, points, length_m })
}
