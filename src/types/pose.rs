#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timestamped geographic pose of the vehicle or of a projected object
///
/// Fields are per-instance; a pose built by projection only carries
/// `timestamp`, `latitude` and `longitude`, the rest stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPose {
    /// Seconds, monotonic within one track
    pub timestamp: f64,
    /// Decimal degrees
    pub latitude: f64,
    /// Decimal degrees
    pub longitude: f64,
    /// m/s
    pub velocity: f64,
    /// m
    pub altitude: f64,
    /// Degrees clockwise from north, 0-360
    pub heading: f64,
}

impl GeoPose {
    pub fn new(timestamp: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// Elementwise linear blend `self * (1 - fraction) + other * fraction`
    ///
    /// Heading is blended like every other field. This is wrong when the two
    /// headings straddle north (350° and 10° blend to 180°, not 0°); callers
    /// relying on heading near the wraparound must unwrap it themselves.
    pub fn interpolate(&self, fraction: f64, other: &GeoPose) -> GeoPose {
        let a = 1.0 - fraction;
        GeoPose {
            timestamp: a * self.timestamp + fraction * other.timestamp,
            latitude: a * self.latitude + fraction * other.latitude,
            longitude: a * self.longitude + fraction * other.longitude,
            velocity: a * self.velocity + fraction * other.velocity,
            altitude: a * self.altitude + fraction * other.altitude,
            heading: a * self.heading + fraction * other.heading,
        }
    }

    /// Elementwise arithmetic midpoint (not a geodesic midpoint)
    pub fn midpoint(&self, other: &GeoPose) -> GeoPose {
        self.interpolate(0.5, other)
    }

    /// Pose shifted by `distance_m` along `bearing_rad`, see [`crate::projector::offset`]
    pub fn offset(&self, distance_m: f64, bearing_rad: f64) -> GeoPose {
        crate::projector::offset(self, distance_m, bearing_rad)
    }

    /// (latitude, longitude) pair in degrees
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample(timestamp: f64, heading: f64) -> GeoPose {
        GeoPose {
            timestamp,
            latitude: 10.0 + timestamp * 1e-4,
            longitude: 20.0 + timestamp * 1e-4,
            velocity: timestamp,
            altitude: 100.0 + timestamp,
            heading,
        }
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = sample(0.0, 0.0);
        let b = sample(10.0, 90.0);
        assert_eq!(a.interpolate(0.0, &b), a);

        let end = a.interpolate(1.0, &b);
        assert!((end.latitude - b.latitude).abs() < EPS);
        assert!((end.heading - b.heading).abs() < EPS);
    }

    #[test]
    fn test_interpolate_blends_every_field() {
        let a = sample(0.0, 0.0);
        let b = sample(10.0, 90.0);
        let p = a.interpolate(0.25, &b);
        assert!((p.timestamp - 2.5).abs() < EPS);
        assert!((p.latitude - 10.00025).abs() < EPS);
        assert!((p.longitude - 20.00025).abs() < EPS);
        assert!((p.velocity - 2.5).abs() < EPS);
        assert!((p.altitude - 102.5).abs() < EPS);
        assert!((p.heading - 22.5).abs() < EPS);
    }

    #[test]
    fn test_heading_blend_is_linear_across_north() {
        let a = sample(0.0, 350.0);
        let b = sample(1.0, 10.0);
        // linear, not circular: 180 rather than 0
        assert!((a.midpoint(&b).heading - 180.0).abs() < EPS);
    }

    #[test]
    fn test_new_leaves_kinematics_zero() {
        let p = GeoPose::new(3.0, 1.0, 2.0);
        assert_eq!(p.coordinates(), (1.0, 2.0));
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.altitude, 0.0);
        assert_eq!(p.heading, 0.0);
    }
}
