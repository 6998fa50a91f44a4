//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Node identity in the routing
//! graph is derived from the exact bit pattern of these values (see
//! [`CoordKey`]), so the full input precision is preserved end to end.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Mean Earth radius used by the haversine formula, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in decimal degrees.
///
/// Equality is exact: no tolerance, no snapping.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Symmetric, non-negative, and exactly `0.0` for identical points.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let h = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Rounding can push h a hair past 1.0 for antipodal points.
        let h = h.clamp(0.0, 1.0);

        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Canonical identity of this coordinate as a graph node.
    #[inline]
    pub fn key(self) -> CoordKey {
        CoordKey::from(self)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` (whitespace around either number is allowed).
impl FromStr for GeoPoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("expected \"lat,lon\", got {s:?}")))?;

        let parse = |v: &str, what: &str| -> Result<f64, CoreError> {
            let n: f64 = v
                .trim()
                .parse()
                .map_err(|_| CoreError::Parse(format!("invalid {what} {:?}", v.trim())))?;
            if !n.is_finite() {
                return Err(CoreError::Parse(format!("{what} must be finite, got {n}")));
            }
            Ok(n)
        };

        Ok(GeoPoint::new(parse(lat, "latitude")?, parse(lon, "longitude")?))
    }
}

// ── CoordKey ──────────────────────────────────────────────────────────────────

/// Hashable node identity derived from a [`GeoPoint`].
///
/// Two points map to the same key iff they compare equal: the raw IEEE-754
/// bits are used, with `-0.0` folded into `0.0`.  Points that differ in the
/// last bit are distinct keys; no snapping is performed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CoordKey {
    lat_bits: u64,
    lon_bits: u64,
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    // -0.0 == 0.0 but their bit patterns differ.
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

impl From<GeoPoint> for CoordKey {
    #[inline]
    fn from(p: GeoPoint) -> Self {
        Self {
            lat_bits: canonical_bits(p.lat),
            lon_bits: canonical_bits(p.lon),
        }
    }
}

impl From<CoordKey> for GeoPoint {
    #[inline]
    fn from(k: CoordKey) -> Self {
        GeoPoint::new(f64::from_bits(k.lat_bits), f64::from_bits(k.lon_bits))
    }
}
