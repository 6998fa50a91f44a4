//! `pm-core` — foundational types for the `pathmap` routing workspace.
//!
//! This crate is a dependency of every other `pm-*` crate.  It has no `pm-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`geo`]    | `GeoPoint`, haversine distance, `CoordKey`                 |
//! | [`ids`]    | `NodeId`, `EdgeId`                                         |
//! | [`config`] | `PlannerConfig`                                            |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlannerConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{CoordKey, GeoPoint};
pub use ids::{EdgeId, NodeId};
