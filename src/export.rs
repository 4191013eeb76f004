//! Report output
//!
//! Writes session results to any `std::io::Write` sink as CSV or JSON.
//! Nothing here persists state between runs; the caller picks the sink.

#[cfg(feature = "csv")]
use crate::types::GeoPose;

#[cfg(feature = "json")]
use crate::session::SessionReport;
#[cfg(any(feature = "csv", feature = "json"))]
use crate::Result;
#[cfg(any(feature = "csv", feature = "json"))]
use std::io::Write;

/// Column order of pose CSV output
pub const POSE_CSV_HEADER: [&str; 6] = [
    "timestamp",
    "latitude",
    "longitude",
    "velocity",
    "altitude",
    "heading",
];

#[cfg(feature = "csv")]
fn pose_fields(pose: &GeoPose) -> [String; 6] {
    [
        format!("{:.6}", pose.timestamp),
        format!("{:.7}", pose.latitude),
        format!("{:.7}", pose.longitude),
        format!("{:.2}", pose.velocity),
        format!("{:.2}", pose.altitude),
        format!("{:.2}", pose.heading),
    ]
}

/// Write poses as CSV, one row per pose
#[cfg(feature = "csv")]
pub fn write_poses_csv<W: Write>(writer: W, poses: &[GeoPose]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(POSE_CSV_HEADER)?;
    for pose in poses {
        wtr.write_record(pose_fields(pose))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the full session report as pretty-printed JSON
#[cfg(feature = "json")]
pub fn write_report_json<W: Write>(mut writer: W, report: &SessionReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
