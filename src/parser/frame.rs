//! Frame timestamp parsing
//!
//! The camera writes one microsecond timestamp per video frame, one per line.

use crate::conversion::micros_to_seconds;
use crate::error::{ParkScanError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse frame timestamps, returning seconds in file order
pub fn parse_frame_timestamps(text: &str) -> Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .map(micros_to_seconds)
                .map_err(|e| ParkScanError::Parse {
                    line: i + 1,
                    message: format!("frame timestamp '{}' is not numeric: {}", line.trim(), e),
                })
        })
        .collect()
}

/// Read and parse a frame timestamp file
pub fn read_frame_timestamps(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    let timestamps = parse_frame_timestamps(&text)?;
    info!("Read {} frame timestamps from {}", timestamps.len(), path.display());
    Ok(timestamps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_timestamps() {
        let ts = parse_frame_timestamps("1000000\n1033333\n\n1066666\n").unwrap();
        assert_eq!(ts, vec![1.0, 1.033333, 1.066666]);
    }

    #[test]
    fn test_parse_frame_timestamps_rejects_garbage() {
        match parse_frame_timestamps("1000000\nframe\n") {
            Err(ParkScanError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
