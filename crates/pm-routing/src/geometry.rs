//! Network input geometry.
//!
//! The network is supplied as a collection of geometries, as a map layer
//! would hold them.  Only [`Geometry::LineString`] contributes nodes and
//! edges; everything else is carried through and ignored by the builder.

use pm_core::GeoPoint;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// An ordered vertex sequence; consecutive vertices form road segments.
    LineString(Vec<GeoPoint>),
    Point(GeoPoint),
    /// Exterior ring followed by any interior rings.
    Polygon(Vec<Vec<GeoPoint>>),
    /// Any other geometry kind.
    Other,
}

impl Geometry {
    pub fn line(points: impl IntoIterator<Item = GeoPoint>) -> Self {
        Geometry::LineString(points.into_iter().collect())
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Geometry::LineString(_))
    }

    /// Short name of the geometry kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::LineString(_) => "LineString",
            Geometry::Point(_) => "Point",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Other => "Other",
        }
    }
}
