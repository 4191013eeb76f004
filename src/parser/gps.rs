//! GPS log parsing module
//!
//! Reads the space-delimited GPS log recorded next to the camera stream into
//! [`GeoPose`] samples ready for a [`crate::track::TrackIndex`].
//!
//! Field layout (0-based): timestamp in µs at 0, latitude at 1, longitude at
//! 2, velocity at 6, altitude at 7, heading at 8. Fields 3-5 are ignored but
//! must still be numeric.

use crate::conversion::micros_to_seconds;
use crate::error::{ParkScanError, Result};
use crate::types::GeoPose;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Minimum number of fields in a GPS record
pub const GPS_RECORD_FIELDS: usize = 9;

const FIELD_TIMESTAMP: usize = 0;
const FIELD_LATITUDE: usize = 1;
const FIELD_LONGITUDE: usize = 2;
const FIELD_VELOCITY: usize = 6;
const FIELD_ALTITUDE: usize = 7;
const FIELD_HEADING: usize = 8;

/// Parse a single GPS record
///
/// `line_no` is only used for error reporting.
pub fn parse_gps_line(line: &str, line_no: usize) -> Result<GeoPose> {
    let items = line
        .split_whitespace()
        .enumerate()
        .map(|(i, field)| {
            field.parse::<f64>().map_err(|e| ParkScanError::Parse {
                line: line_no,
                message: format!("field {} '{}' is not numeric: {}", i, field, e),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if items.len() < GPS_RECORD_FIELDS {
        return Err(ParkScanError::Parse {
            line: line_no,
            message: format!(
                "expected at least {} fields, found {}",
                GPS_RECORD_FIELDS,
                items.len()
            ),
        });
    }

    Ok(GeoPose {
        timestamp: micros_to_seconds(items[FIELD_TIMESTAMP]),
        latitude: items[FIELD_LATITUDE],
        longitude: items[FIELD_LONGITUDE],
        velocity: items[FIELD_VELOCITY],
        altitude: items[FIELD_ALTITUDE],
        heading: items[FIELD_HEADING],
    })
}

/// Parse a whole GPS log
///
/// The first line is a column header and is dropped; blank lines are skipped.
pub fn parse_gps_log(text: &str) -> Result<Vec<GeoPose>> {
    let mut lines = text.lines().enumerate();

    if let Some((_, header)) = lines.next() {
        debug!("dropping {}", header);
    }

    let mut poses = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        poses.push(parse_gps_line(line, i + 1)?);
    }

    Ok(poses)
}

/// Read and parse a GPS log file
pub fn read_gps_log(path: &Path) -> Result<Vec<GeoPose>> {
    let text = fs::read_to_string(path)?;
    let poses = parse_gps_log(&text)?;
    info!("Read {} GPS records from {}", poses.len(), path.display());
    Ok(poses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "1500000 48.1371234 11.5754321 0 0 0 8.5 520.25 271.5";

    #[test]
    fn test_parse_gps_line_field_layout() {
        let pose = parse_gps_line(RECORD, 1).unwrap();
        assert_eq!(pose.timestamp, 1.5);
        assert_eq!(pose.latitude, 48.1371234);
        assert_eq!(pose.longitude, 11.5754321);
        assert_eq!(pose.velocity, 8.5);
        assert_eq!(pose.altitude, 520.25);
        assert_eq!(pose.heading, 271.5);
    }

    #[test]
    fn test_parse_gps_line_extra_fields_and_spacing() {
        let pose = parse_gps_line("  2000000  1 2 3 4 5 6 7 8 9 10 ", 1).unwrap();
        assert_eq!(pose.timestamp, 2.0);
        assert_eq!(pose.heading, 8.0);
    }

    #[test]
    fn test_parse_gps_line_too_few_fields() {
        match parse_gps_line("1 2 3 4 5 6 7 8", 7) {
            Err(ParkScanError::Parse { line, message }) => {
                assert_eq!(line, 7);
                assert!(message.contains("found 8"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_gps_line_non_numeric() {
        match parse_gps_line("1 2 3 abc 5 6 7 8 9", 3) {
            Err(ParkScanError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("field 3 'abc'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_gps_log_drops_header_and_blank_lines() {
        let text = format!(
            "timestamp lat lon a b c vel alt heading\n{}\n\n3000000 48.2 11.6 0 0 0 9 521 272\n",
            RECORD
        );
        let poses = parse_gps_log(&text).unwrap();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0].timestamp, 1.5);
        assert_eq!(poses[1].timestamp, 3.0);
    }

    #[test]
    fn test_parse_gps_log_reports_line_number() {
        let text = "header\n1 2 3 4 5 6 7 8 9\nbroken line\n";
        match parse_gps_log(text) {
            Err(ParkScanError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_gps_log_empty() {
        assert!(parse_gps_log("").unwrap().is_empty());
        assert!(parse_gps_log("header only\n").unwrap().is_empty());
    }
}
