//! Planar offset projection
//!
//! Shifts a pose by a short distance along a bearing using a flat-earth
//! approximation around the base latitude. Accurate for sub-kilometre
//! offsets; undefined at the poles where `cos(latitude) == 0`.

use crate::types::GeoPose;

/// WGS-84 equatorial radius
pub const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Project `distance_m` metres from `pose` along `bearing_rad`
/// (clockwise from north, same convention as `GeoPose::heading`)
///
/// The result keeps the base timestamp; velocity, altitude and heading are zero.
pub fn offset(pose: &GeoPose, distance_m: f64, bearing_rad: f64) -> GeoPose {
    let dn = distance_m * bearing_rad.cos();
    let de = distance_m * bearing_rad.sin();

    // Coordinate offsets in radians
    let d_lat = dn / EARTH_EQUATORIAL_RADIUS_M;
    let d_lon = de / (EARTH_EQUATORIAL_RADIUS_M * pose.latitude.to_radians().cos());

    GeoPose::new(
        pose.timestamp,
        pose.latitude + d_lat.to_degrees(),
        pose.longitude + d_lon.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn base() -> GeoPose {
        GeoPose {
            timestamp: 42.0,
            latitude: 48.137,
            longitude: 11.575,
            velocity: 8.0,
            altitude: 520.0,
            heading: 90.0,
        }
    }

    #[test]
    fn test_zero_distance_keeps_position() {
        for bearing in [0.0, 1.0, PI, -2.5] {
            let p = offset(&base(), 0.0, bearing);
            assert!((p.latitude - base().latitude).abs() < 1e-12);
            assert!((p.longitude - base().longitude).abs() < 1e-12);
            assert_eq!(p.timestamp, 42.0);
        }
    }

    #[test]
    fn test_projection_drops_kinematics() {
        let p = offset(&base(), 10.0, 0.3);
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.altitude, 0.0);
        assert_eq!(p.heading, 0.0);
        assert_eq!(p.timestamp, base().timestamp);
    }

    #[test]
    fn test_north_moves_latitude_only() {
        let p = offset(&base(), 100.0, 0.0);
        let expected = (100.0 / EARTH_EQUATORIAL_RADIUS_M).to_degrees();
        assert!((p.latitude - base().latitude - expected).abs() < 1e-12);
        assert!((p.longitude - base().longitude).abs() < 1e-12);
    }

    #[test]
    fn test_east_scales_with_latitude() {
        let p = offset(&base(), 100.0, FRAC_PI_2);
        let expected = (100.0 / (EARTH_EQUATORIAL_RADIUS_M * base().latitude.to_radians().cos()))
            .to_degrees();
        assert!((p.longitude - base().longitude - expected).abs() < 1e-12);
        assert!((p.latitude - base().latitude).abs() < 1e-12);
    }

    #[test]
    fn test_displacement_scales_linearly() {
        let bearing = 0.7;
        let one = offset(&base(), 15.0, bearing);
        let two = offset(&base(), 30.0, bearing);
        let d_lat1 = one.latitude - base().latitude;
        let d_lon1 = one.longitude - base().longitude;
        let d_lat2 = two.latitude - base().latitude;
        let d_lon2 = two.longitude - base().longitude;
        assert!((d_lat2 - 2.0 * d_lat1).abs() < 1e-12);
        assert!((d_lon2 - 2.0 * d_lon1).abs() < 1e-12);
    }

    #[test]
    fn test_method_matches_free_function() {
        assert_eq!(base().offset(12.0, 1.2), offset(&base(), 12.0, 1.2));
    }
}
