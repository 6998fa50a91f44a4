//! Unit tests for pm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert!(!NodeId::INVALID.is_valid());
        assert!(EdgeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(44.885, 38.842);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(44.885, 38.842);
        let b = GeoPoint::new(-12.5, 130.8);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 1_111.95, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.0, 180.0));
        let half = std::f64::consts::PI * crate::geo::EARTH_RADIUS_M;
        assert!((d - half).abs() < 1.0, "got {d}");
        assert!(d.is_finite());
    }

    #[test]
    fn parse_lat_lon() {
        let p: GeoPoint = "44.885, 38.842".parse().unwrap();
        assert_eq!(p, GeoPoint::new(44.885, 38.842));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("44.885".parse::<GeoPoint>().is_err());
        assert!("north,38.8".parse::<GeoPoint>().is_err());
        assert!("1,2,3".parse::<GeoPoint>().is_err());
        assert!("NaN,1".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn display_six_decimals() {
        assert_eq!(GeoPoint::new(1.5, -2.25).to_string(), "(1.500000, -2.250000)");
    }
}

#[cfg(test)]
mod coord_key {
    use crate::{CoordKey, GeoPoint};

    #[test]
    fn equal_points_equal_keys() {
        let a = GeoPoint::new(44.88531140047879, 38.8400712);
        let b = GeoPoint::new(44.88531140047879, 38.8400712);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn last_bit_difference_is_distinct() {
        let a = GeoPoint::new(1.0, 2.0);
        let b = GeoPoint::new(f64::from_bits(1.0f64.to_bits() + 1), 2.0);
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn negative_zero_folds_into_zero() {
        assert_eq!(GeoPoint::new(-0.0, 5.0).key(), GeoPoint::new(0.0, 5.0).key());
        assert_eq!(GeoPoint::new(5.0, -0.0).key(), GeoPoint::new(5.0, 0.0).key());
    }

    #[test]
    fn key_back_to_point() {
        let p = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(GeoPoint::from(CoordKey::from(p)), p);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, PlannerConfig};

    #[test]
    fn default_candidate_count() {
        assert_eq!(PlannerConfig::default().candidate_count, 10);
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_candidates_rejected() {
        let err = PlannerConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
