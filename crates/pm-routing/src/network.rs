//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`) are sorted by
//! source node and indexed by `EdgeId`.  Every road segment is stored as two
//! directed entries with the same length, so the graph is undirected in
//! effect.
//!
//! # Node identity
//!
//! Nodes are keyed by the exact coordinate ([`CoordKey`]).  Two geometry
//! vertices with bit-identical coordinates become one node; vertices that
//! differ by any floating-point offset stay separate and are only connected
//! if a segment joins them.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use pm_core::{CoordKey, EdgeId, GeoPoint, NodeId};

use crate::geometry::Geometry;
use crate::{RoutingError, RoutingResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format, weighted by haversine length.
///
/// All vector fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`RoadNetworkBuilder`] or
/// [`RoadNetwork::from_geometries`].
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but required for
    /// route reconstruction (trace the predecessor edge back to its source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Used as the Dijkstra cost.
    pub edge_length_m: Vec<f64>,

    node_index: FxHashMap<CoordKey, NodeId>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Any routing request against an empty network yields an empty route.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    /// Build a network from a geometry collection in one pass.
    ///
    /// Non-line geometries are skipped.  The input is not modified.
    pub fn from_geometries<'a, I>(geometries: I) -> RoutingResult<Self>
    where
        I: IntoIterator<Item = &'a Geometry>,
    {
        let geometries: Vec<&Geometry> = geometries.into_iter().collect();

        // Upper bounds: every vertex a new node, every segment a new road.
        let (vertices, segments) = geometries
            .iter()
            .filter_map(|g| match g {
                Geometry::LineString(points) => Some(points.len()),
                _ => None,
            })
            .fold((0, 0), |(v, s), n| (v + n, s + n.saturating_sub(1)));

        let mut b = RoadNetworkBuilder::with_capacity(vertices, segments);
        let mut lines = 0usize;
        let mut skipped = 0usize;

        for geometry in geometries {
            if geometry.is_line() {
                lines += 1;
            } else {
                skipped += 1;
                trace!(kind = geometry.kind(), "skipping non-line geometry");
            }
            b.add_geometry(geometry)?;
        }

        let net = b.build();
        debug!(
            lines,
            skipped,
            nodes = net.node_count(),
            edges = net.undirected_edge_count(),
            "built road network"
        );
        Ok(net)
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed edge entries (two per road segment).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// Number of undirected road segments.
    pub fn undirected_edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// The node sitting exactly at `pos`, if any.
    pub fn node_at(&self, pos: GeoPoint) -> Option<NodeId> {
        self.node_index.get(&pos.key()).copied()
    }

    /// All nodes in `NodeId` order, which is also first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (NodeId(i as u32), pos))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The directed edge `from → to`, if the two nodes are adjacent.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if !self.contains(from) {
            return None;
        }
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes are deduplicated by exact coordinate.  Roads are undirected; adding
/// the same pair twice overwrites the stored length instead of creating a
/// parallel edge.
///
/// # Example
///
/// ```
/// use pm_core::GeoPoint;
/// use pm_routing::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(44.885, 38.842));
/// let c = b.add_node(GeoPoint::new(44.886, 38.842));
/// b.add_road(a, c, 111.2).unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // both directions
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes:      Vec<GeoPoint>,
    node_index: FxHashMap<CoordKey, NodeId>,
    raw_edges:  Vec<RawEdge>,
    edge_slots: FxHashMap<(NodeId, NodeId), usize>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of nodes and road segments.
    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            node_index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:  Vec::with_capacity(roads * 2),
            edge_slots: FxHashMap::with_capacity_and_hasher(roads * 2, Default::default()),
        }
    }

    /// Return the node at `pos`, inserting it first if absent.
    ///
    /// `NodeId`s are sequential from 0 in first-insertion order.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let next = NodeId(self.nodes.len() as u32);
        let id = *self.node_index.entry(pos.key()).or_insert(next);
        if id == next {
            self.nodes.push(pos);
        }
        id
    }

    /// Add an undirected road between two existing nodes with an explicit
    /// length in metres.
    ///
    /// Self-loops are accepted and dropped: a zero-length cycle never
    /// shortens a path.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) -> RoutingResult<()> {
        for id in [a, b] {
            if id.index() >= self.nodes.len() {
                return Err(RoutingError::NodeNotFound(id));
            }
        }
        if !length_m.is_finite() || length_m < 0.0 {
            return Err(RoutingError::InvalidWeight { from: a, to: b, length_m });
        }
        if a == b {
            return Ok(());
        }
        self.set_directed_edge(a, b, length_m);
        self.set_directed_edge(b, a, length_m);
        Ok(())
    }

    /// Add a road segment between two coordinates, weighted by haversine
    /// distance.  Both endpoints are inserted as nodes if absent.
    pub fn add_segment(&mut self, a: GeoPoint, b: GeoPoint) -> RoutingResult<(NodeId, NodeId)> {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        self.add_road(ia, ib, a.distance_m(b))?;
        Ok((ia, ib))
    }

    /// Feed one input geometry into the builder.
    ///
    /// A line string adds one segment per consecutive vertex pair; a
    /// single-vertex line adds just its node.  Other geometry kinds are
    /// ignored.
    pub fn add_geometry(&mut self, geometry: &Geometry) -> RoutingResult<()> {
        let Geometry::LineString(points) = geometry else {
            return Ok(());
        };
        match points.as_slice() {
            [] => {}
            [only] => {
                self.add_node(*only);
            }
            _ => {
                for pair in points.windows(2) {
                    self.add_segment(pair[0], pair[1])?;
                }
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort, where E = directed edges.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort keeps insertion order among a node's outgoing edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            node_index: self.node_index,
        }
    }

    fn set_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        match self.edge_slots.get(&(from, to)) {
            Some(&slot) => self.raw_edges[slot].length_m = length_m,
            None => {
                self.edge_slots.insert((from, to), self.raw_edges.len());
                self.raw_edges.push(RawEdge { from, to, length_m });
            }
        }
    }
}
