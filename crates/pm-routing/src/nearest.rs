//! Nearest-node queries.
//!
//! Both lookups are exact linear scans using haversine distance.  Ties are
//! resolved in favour of the lower `NodeId`, i.e. the node that was inserted
//! first, so results are stable for a fixed construction order.

use std::cmp::Ordering;

use pm_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;

impl RoadNetwork {
    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        let mut best: Option<(f64, NodeId)> = None;
        for (id, node_pos) in self.nodes() {
            let d = node_pos.distance_m(pos);
            // Strict `<` keeps the first-encountered node on ties.
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    ///
    /// Equal distances keep `NodeId` order, matching a stable sort over the
    /// node list.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, NodeId)> = self
            .nodes()
            .map(|(id, node_pos)| (node_pos.distance_m(pos), id))
            .collect();

        let by_distance = |a: &(f64, NodeId), b: &(f64, NodeId)| -> Ordering {
            a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
        };

        // Partition the k best to the front, then order just those.
        if k < ranked.len() {
            ranked.select_nth_unstable_by(k - 1, by_distance);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(by_distance);

        ranked.into_iter().map(|(_, id)| id).collect()
    }
}
