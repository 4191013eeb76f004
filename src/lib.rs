//! Park Scan Library
//!
//! A Rust library for locating free parking spots from a dash-camera
//! recording: an interpolated GPS track gives the vehicle pose at every
//! video frame, detected cars are projected sideways from that pose, and
//! wide gaps between consecutive projected cars become spot candidates.
//!
//! # Features
//!
//! - **`csv`** (default): Detection table parsing and CSV reports
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: JSON reports and JSON options files
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! ```rust
//! use park_scan::{GapDetector, GapOptions, GeoPose, TrackIndex};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let track = TrackIndex::new(vec![
//!     GeoPose { timestamp: 0.0, latitude: 10.0, longitude: 20.0, ..GeoPose::default() },
//!     GeoPose { timestamp: 10.0, latitude: 10.001, longitude: 20.001, heading: 90.0, ..GeoPose::default() },
//! ])?;
//!
//! let vehicle = track.lookup(5.0)?;
//! let mut detector = GapDetector::new(GapOptions::default());
//! detector.record(vehicle.offset(4.0, vehicle.heading.to_radians() + FRAC_PI_2));
//! assert!(detector.compute_spots().is_empty());
//! # Ok::<(), park_scan::ParkScanError>(())
//! ```
//!
//! # Public API
//!
//! ## Core
//! - [`GeoPose`] - Timestamped pose with interpolation and offset projection
//! - [`TrackIndex`] - Time-indexed GPS track with interpolated lookup
//! - [`projector::offset`] - Planar offset projection
//! - [`GapDetector`] - Parking spot candidates from projected positions
//! - [`haversine_distance`] - Great-circle distance
//!
//! ## Ingestion
//! - [`parse_gps_log`] / [`read_gps_log`] - GPS log records
//! - [`parse_frame_timestamps`] / [`read_frame_timestamps`] - Video frame timestamps
//! - `parse_detections` / `read_detections` - Detection tables (feature `csv`)
//!
//! ## Sessions and reports
//! - [`Session`] / [`run_session`] - Per-frame driver
//! - `write_poses_csv` (feature `csv`), `write_report_json` (feature `json`)

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod gap;
pub mod parser;
pub mod projector;
pub mod session;
pub mod track;
pub mod types;

pub use conversion::*;
pub use error::*;
pub use export::*;
pub use gap::*;
pub use parser::*;
pub use session::*;
pub use track::*;
pub use types::*;
