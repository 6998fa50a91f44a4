//! `pm-routing` — road network, nearest-node lookup, and route planning.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`geometry`] | `Geometry` input type (only line strings are routable)    |
//! | [`network`]  | `RoadNetwork` (CSR), `RoadNetworkBuilder`                 |
//! | [`nearest`]  | `snap_to_node`, `k_nearest_nodes` on `RoadNetwork`        |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                 |
//! | [`planner`]  | `RoutePlanner` multi-candidate search                     |
//! | [`cache`]    | `NetworkCache` keyed by geometry content hash             |
//! | [`geojson`]  | GeoJSON import/export (feature = `"geojson"`)             |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `geojson`  | GeoJSON adapter via the `geojson` crate (default).       |
//! | `parallel` | `RoutePlanner::plan_batch` runs on the Rayon pool.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod cache;
pub mod error;
pub mod geometry;
pub mod nearest;
pub mod network;
pub mod planner;
pub mod router;

#[cfg(feature = "geojson")]
pub mod geojson;


pub use cache::NetworkCache;
pub use error::{RoutingError, RoutingResult};
pub use geometry::Geometry;
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use planner::RoutePlanner;
pub use router::{DijkstraRouter, Route, Router};
