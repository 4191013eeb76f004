//! Unit conversion utilities
//!
//! Contains the raw-record unit conversions shared by the parsers and the
//! heading/bearing and box-to-distance conversions used when projecting
//! detections.

use crate::types::BoundingBox;

/// Raw GPS and frame timestamps are recorded in microseconds
pub const MICROS_PER_SECOND: f64 = 1e6;

/// Convert a raw microsecond timestamp to seconds
pub fn micros_to_seconds(raw_value: f64) -> f64 {
    raw_value / MICROS_PER_SECOND
}

/// Convert a vehicle heading (degrees, clockwise from north) to the bearing
/// of a detection, in radians, rotated by `offset_rad`
pub fn heading_to_bearing(heading_deg: f64, offset_rad: f64) -> f64 {
    heading_deg.to_radians() + offset_rad
}

/// Estimate the distance to a detected car from its box width
///
/// Empirical fit: a car filling the whole frame width is at 0 m, a
/// zero-width box is 5 m away, cubic in between.
pub fn estimate_distance_from_box(bbox: &BoundingBox) -> f64 {
    (1.0 - bbox.width()).powi(3) * 5.0
}
