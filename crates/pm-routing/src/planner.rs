//! Route planning between arbitrary coordinates.
//!
//! Query points rarely sit exactly on the network, and the single nearest
//! node can be a dead-end stub or belong to a disconnected fragment.  The
//! planner therefore takes the `candidate_count` nearest nodes for each
//! endpoint and tries node pairs in order of proximity:
//!
//! ```text
//! for s in nearest(from)      // ascending distance from `from`
//!     for t in nearest(to)    // ascending distance from `to`
//!         if route(s, t) is non-empty → return it
//! ```
//!
//! Worst case (no route anywhere among the candidates) is
//! `candidate_count²` router calls.

use tracing::{debug, trace};

use pm_core::{GeoPoint, PlannerConfig};

use crate::network::RoadNetwork;
use crate::router::{Route, Router};
use crate::RoutingResult;

/// Multi-candidate route planner over a [`Router`].
///
/// Holds no per-query state, so one planner can serve any number of
/// networks and concurrent queries.
#[derive(Clone, Debug)]
pub struct RoutePlanner<R: Router> {
    router: R,
    config: PlannerConfig,
}

impl<R: Router> RoutePlanner<R> {
    /// Create a planner, rejecting invalid configuration.
    pub fn new(router: R, config: PlannerConfig) -> RoutingResult<Self> {
        config.validate()?;
        Ok(Self { router, config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a route from `from` to `to` on `network`.
    ///
    /// Returns an empty route if the network is empty or no candidate pair is
    /// connected.  Only internal invariant violations surface as errors.
    pub fn plan(&self, network: &RoadNetwork, from: GeoPoint, to: GeoPoint) -> RoutingResult<Route> {
        let k = self.config.candidate_count;
        let sources = network.k_nearest_nodes(from, k);
        let targets = network.k_nearest_nodes(to, k);

        let mut attempts = 0usize;
        for (si, &source) in sources.iter().enumerate() {
            for (ti, &target) in targets.iter().enumerate() {
                attempts += 1;
                let route = self.router.route(network, source, target)?;
                if route.is_empty() {
                    trace!(%source, %target, "candidate pair has no route");
                    continue;
                }
                if si > 0 || ti > 0 {
                    debug!(
                        source_rank = si,
                        target_rank = ti,
                        attempts,
                        "route found via fallback candidates"
                    );
                } else {
                    debug!(nodes = route.len(), length_m = route.length_m, "route found");
                }
                return Ok(route);
            }
        }

        debug!(
            attempts,
            sources = sources.len(),
            targets = targets.len(),
            "no route between any candidate pair"
        );
        Ok(Route::empty())
    }

    /// Plan from a list of user-placed points.
    ///
    /// Anything other than exactly two distinct points is not a valid query
    /// and yields an empty route.
    pub fn plan_points(&self, network: &RoadNetwork, points: &[GeoPoint]) -> RoutingResult<Route> {
        match points {
            [from, to] if from != to => self.plan(network, *from, *to),
            _ => Ok(Route::empty()),
        }
    }

    /// Plan several independent queries against one shared network.
    ///
    /// Each pair is checked like [`plan_points`](Self::plan_points), so a
    /// pair with identical endpoints yields an empty route.  Results are
    /// returned in query order.  With the `parallel` feature the queries run
    /// on the Rayon thread pool.
    pub fn plan_batch(
        &self,
        network: &RoadNetwork,
        queries: &[(GeoPoint, GeoPoint)],
    ) -> Vec<RoutingResult<Route>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            queries
                .par_iter()
                .map(|&(from, to)| self.plan_points(network, &[from, to]))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            queries
                .iter()
                .map(|&(from, to)| self.plan_points(network, &[from, to]))
                .collect()
        }
    }
}

impl<R: Router + Default> Default for RoutePlanner<R> {
    fn default() -> Self {
        Self { router: R::default(), config: PlannerConfig::default() }
    }
}
