//! Detection table parsing
//!
//! The detector writes a headered CSV table with one row per detected car.
//! Rows carry a `frame` index and either a `distance` column in metres or the
//! normalised box corners `y1,x1,y2,x2`, in which case the distance is
//! estimated from the box width.

use crate::conversion::estimate_distance_from_box;
use crate::error::{ParkScanError, Result};
use crate::types::{BoundingBox, DetectionTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

enum DistanceSource {
    Column(usize),
    Box {
        y1: usize,
        x1: usize,
        y2: usize,
        x2: usize,
    },
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn required_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    column(headers, name)
        .ok_or_else(|| ParkScanError::InvalidDetection(format!("missing '{}' column", name)))
}

fn numeric_field(record: &csv::StringRecord, index: usize, row: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| {
        ParkScanError::InvalidDetection(format!("row {}: '{}' is not numeric", row, raw))
    })
}

/// Parse a detection table from any reader
pub fn parse_detections<R: Read>(reader: R) -> Result<DetectionTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let frame_col = required_column(&headers, "frame")?;
    let source = match column(&headers, "distance") {
        Some(index) => DistanceSource::Column(index),
        None => DistanceSource::Box {
            y1: required_column(&headers, "y1")?,
            x1: required_column(&headers, "x1")?,
            y2: required_column(&headers, "y2")?,
            x2: required_column(&headers, "x2")?,
        },
    };

    let mut table = DetectionTable::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // header is row 1
        let row = i + 2;

        let frame_raw = record.get(frame_col).unwrap_or("").trim();
        let frame = frame_raw.parse::<usize>().map_err(|_| {
            ParkScanError::InvalidDetection(format!(
                "row {}: frame '{}' is not a frame index",
                row, frame_raw
            ))
        })?;

        let distance = match source {
            DistanceSource::Column(index) => numeric_field(&record, index, row)?,
            DistanceSource::Box { y1, x1, y2, x2 } => {
                let bbox = BoundingBox {
                    y1: numeric_field(&record, y1, row)?,
                    x1: numeric_field(&record, x1, row)?,
                    y2: numeric_field(&record, y2, row)?,
                    x2: numeric_field(&record, x2, row)?,
                };
                estimate_distance_from_box(&bbox)
            }
        };

        if !distance.is_finite() || distance < 0.0 {
            return Err(ParkScanError::InvalidDetection(format!(
                "row {}: distance {} is not a usable range",
                row, distance
            )));
        }

        debug!(frame, distance_m = distance, "Detection");
        table.push(frame, distance);
    }

    Ok(table)
}

/// Read and parse a detection table file
pub fn read_detections(path: &Path) -> Result<DetectionTable> {
    let table = parse_detections(File::open(path)?)?;
    info!(
        "Read {} detections over {} frames from {}",
        table.detection_count(),
        table.frames.len(),
        path.display()
    );
    Ok(table)
}
