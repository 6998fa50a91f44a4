//! Build-once-per-version network cache.
//!
//! A map layer typically re-submits the same geometry collection on every
//! routing request.  [`NetworkCache`] hashes the collection's content and
//! only rebuilds the [`RoadNetwork`] when that content changes.  The hash is
//! a fast pre-check; a hit also compares the stored collection, so a hash
//! collision rebuilds.  A cached network is identical to one built from
//! scratch.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;
use tracing::debug;

use pm_core::GeoPoint;

use crate::geometry::Geometry;
use crate::network::RoadNetwork;
use crate::RoutingResult;

/// Holds the network built from the most recently seen geometry version.
#[derive(Default)]
pub struct NetworkCache {
    pub(crate) current: Option<CachedNetwork>,
    builds: u64,
}

pub(crate) struct CachedNetwork {
    pub(crate) version:    u64,
    pub(crate) geometries: Vec<Geometry>,
    pub(crate) network:    Arc<RoadNetwork>,
}

impl NetworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the network for `geometries`, building it only if the content
    /// differs from the cached version.
    pub fn get_or_build(&mut self, geometries: &[Geometry]) -> RoutingResult<Arc<RoadNetwork>> {
        let version = content_hash(geometries);

        if let Some(cached) = &self.current {
            if cached.version == version && cached.geometries == geometries {
                return Ok(Arc::clone(&cached.network));
            }
        }

        let network = Arc::new(RoadNetwork::from_geometries(geometries)?);
        self.builds += 1;
        debug!(version, builds = self.builds, "rebuilt cached road network");
        self.current = Some(CachedNetwork {
            version,
            geometries: geometries.to_vec(),
            network: Arc::clone(&network),
        });
        Ok(network)
    }

    /// Drop the cached network; the next call rebuilds.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Content hash of the cached geometry version, if any.
    pub fn version(&self) -> Option<u64> {
        self.current.as_ref().map(|c| c.version)
    }

    /// Number of builds performed so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

/// Hash of geometry kinds and exact coordinate bits, in order.
pub fn content_hash(geometries: &[Geometry]) -> u64 {
    let mut h = FxHasher::default();
    geometries.len().hash(&mut h);
    for g in geometries {
        g.kind().hash(&mut h);
        match g {
            Geometry::LineString(points) => hash_points(points, &mut h),
            Geometry::Point(p) => p.key().hash(&mut h),
            Geometry::Polygon(rings) => {
                rings.len().hash(&mut h);
                for ring in rings {
                    hash_points(ring, &mut h);
                }
            }
            Geometry::Other => {}
        }
    }
    h.finish()
}

fn hash_points(points: &[GeoPoint], h: &mut FxHasher) {
    points.len().hash(h);
    for p in points {
        p.key().hash(h);
    }
}
