//! Parking gap detection
//!
//! Accumulates projected object positions for one session and flags every
//! pair of consecutive positions farther apart than a threshold as a free
//! parking spot candidate.

use crate::types::GeoPose;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Gap between consecutive candidates above which a spot is emitted
pub const DEFAULT_GAP_THRESHOLD_M: f64 = 12.0;

/// Great-circle distance in metres between two `(latitude, longitude)`
/// pairs in decimal degrees, using the haversine formula
pub fn haversine_distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let (lat1, lon1) = (p1.0.to_radians(), p1.1.to_radians());
    let (lat2, lon2) = (p2.0.to_radians(), p2.1.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // guard against a drifting marginally above 1.0
    2.0 * EARTH_MEAN_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Which coordinate goes into the latitude slot of the haversine formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisOrder {
    /// `(latitude, longitude)`: the true great-circle distance
    #[default]
    Corrected,
    /// `(longitude, latitude)`: reproduces gap decisions of the first
    /// field recordings, where the cosine term was applied to longitudes
    Legacy,
}

impl AxisOrder {
    /// Distance between two poses in this axis order
    pub fn distance(self, a: &GeoPose, b: &GeoPose) -> f64 {
        match self {
            AxisOrder::Corrected => haversine_distance(a.coordinates(), b.coordinates()),
            AxisOrder::Legacy => {
                haversine_distance((a.longitude, a.latitude), (b.longitude, b.latitude))
            }
        }
    }
}

/// Gap detection settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GapOptions {
    pub threshold_m: f64,
    pub axis_order: AxisOrder,
}

impl Default for GapOptions {
    fn default() -> Self {
        Self {
            threshold_m: DEFAULT_GAP_THRESHOLD_M,
            axis_order: AxisOrder::default(),
        }
    }
}

/// Append-only session list of projected object positions
#[derive(Debug, Clone, Default)]
pub struct GapDetector {
    options: GapOptions,
    candidates: Vec<GeoPose>,
}

impl GapDetector {
    pub fn new(options: GapOptions) -> Self {
        Self {
            options,
            candidates: Vec::new(),
        }
    }

    /// Append a projected position; no validation or deduplication
    pub fn record(&mut self, pose: GeoPose) {
        self.candidates.push(pose);
    }

    /// Midpoints of every consecutive pair separated by more than the threshold
    ///
    /// Pairs are taken in recording order. The session list is not consumed,
    /// so repeated calls recompute over the whole history.
    pub fn compute_spots(&self) -> Vec<GeoPose> {
        self.candidates
            .windows(2)
            .filter_map(|pair| {
                let (a, b) = (&pair[0], &pair[1]);
                let distance = self.options.axis_order.distance(a, b);
                if distance > self.options.threshold_m {
                    debug!(
                        distance_m = distance,
                        at = a.timestamp,
                        "Gap above threshold"
                    );
                    Some(a.midpoint(b))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn candidates(&self) -> &[GeoPose] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::offset;

    fn at(latitude: f64, longitude: f64) -> GeoPose {
        GeoPose::new(0.0, latitude, longitude)
    }

    #[test]
    fn test_haversine_identity_and_symmetry() {
        let p = (52.52, 13.405);
        let q = (52.5205, 13.4061);
        assert_eq!(haversine_distance(p, p), 0.0);
        assert!((haversine_distance(p, q) - haversine_distance(q, p)).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance((0.0, 0.0), (1.0, 0.0));
        let expected = EARTH_MEAN_RADIUS_M * 1f64.to_radians();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_legacy_axis_order_differs_off_equator() {
        let a = at(60.0, 10.0);
        let b = at(60.0, 10.001);
        let corrected = AxisOrder::Corrected.distance(&a, &b);
        let legacy = AxisOrder::Legacy.distance(&a, &b);
        // at 60°N a degree of longitude is half as long
        assert!((corrected - 55.6).abs() < 0.5);
        assert!(legacy > 100.0);
    }

    #[test]
    fn test_spot_between_wide_gap() {
        let base = GeoPose::new(1.0, 45.0, 7.0);
        let second = offset(&base, 5.0, 0.0);
        let third = offset(&second, 20.0, 0.0);

        let mut detector = GapDetector::new(GapOptions::default());
        detector.record(base);
        detector.record(second);
        detector.record(third);

        let spots = detector.compute_spots();
        assert_eq!(spots.len(), 1);
        let expected = second.midpoint(&third);
        assert!((spots[0].latitude - expected.latitude).abs() < 1e-12);
        assert!((spots[0].longitude - expected.longitude).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_single_session() {
        let mut detector = GapDetector::default();
        assert!(detector.compute_spots().is_empty());
        detector.record(at(10.0, 10.0));
        assert!(detector.compute_spots().is_empty());
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn test_no_gap_over_threshold() {
        let mut detector = GapDetector::new(GapOptions::default());
        let mut pose = at(45.0, 7.0);
        for _ in 0..5 {
            detector.record(pose);
            pose = offset(&pose, 11.0, 0.0);
        }
        assert!(detector.compute_spots().is_empty());
    }

    #[test]
    fn test_repeated_calls_cover_whole_history() {
        let mut detector = GapDetector::new(GapOptions::default());
        let a = at(45.0, 7.0);
        let b = offset(&a, 30.0, 0.0);
        detector.record(a);
        detector.record(b);
        assert_eq!(detector.compute_spots().len(), 1);

        let c = offset(&b, 30.0, 0.0);
        detector.record(c);
        assert_eq!(detector.compute_spots().len(), 2);
        assert_eq!(detector.compute_spots().len(), 2);
    }

    #[test]
    fn test_custom_threshold() {
        let mut detector = GapDetector::new(GapOptions {
            threshold_m: 3.0,
            ..GapOptions::default()
        });
        let a = at(45.0, 7.0);
        detector.record(a);
        detector.record(offset(&a, 4.0, 0.0));
        assert_eq!(detector.compute_spots().len(), 1);
    }
}
