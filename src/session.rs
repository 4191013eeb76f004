//! Per-frame session driver
//!
//! For every video frame: look up the vehicle pose at the frame timestamp,
//! project each detection distance sideways from the vehicle and record the
//! projected position for gap detection.

use crate::conversion::heading_to_bearing;
use crate::error::Result;
use crate::gap::{GapDetector, GapOptions};
use crate::track::TrackIndex;
use crate::types::{DetectionTable, GeoPose};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionOptions {
    pub gap: GapOptions,
    /// Bearing of detections relative to the vehicle heading, radians
    /// clockwise. Default is π/2: parked cars to the right of the lane.
    pub bearing_offset_rad: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            gap: GapOptions::default(),
            bearing_offset_rad: FRAC_PI_2,
        }
    }
}

#[cfg(feature = "json")]
impl SessionOptions {
    /// Parse options from JSON; missing keys keep their defaults
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

/// One video frame worth of detector output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameInput {
    /// Seconds, same clock as the GPS track
    pub timestamp_s: f64,
    pub distances_m: Vec<f64>,
}

/// Pair frame timestamps with the detections recorded for each frame index
///
/// Detections for frame indices past the last timestamp are dropped with a warning.
pub fn assemble_frames(timestamps: &[f64], detections: &DetectionTable) -> Vec<FrameInput> {
    let dropped = detections
        .frames
        .keys()
        .filter(|&&frame| frame >= timestamps.len())
        .count();
    if dropped > 0 {
        warn!(
            "Dropping detections for {} frames without a timestamp ({} timestamps)",
            dropped,
            timestamps.len()
        );
    }

    timestamps
        .iter()
        .enumerate()
        .map(|(frame, &timestamp_s)| FrameInput {
            timestamp_s,
            distances_m: detections.distances_for(frame).to_vec(),
        })
        .collect()
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub vehicle: GeoPose,
    pub objects: Vec<GeoPose>,
}

/// Everything a finished session produced
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionReport {
    pub vehicle_track: Vec<GeoPose>,
    pub object_markers: Vec<GeoPose>,
    pub spots: Vec<GeoPose>,
    pub frames_processed: usize,
    pub skipped_frames: usize,
}

/// Processing state for one recording session
pub struct Session<'a> {
    track: &'a TrackIndex,
    options: SessionOptions,
    detector: GapDetector,
    vehicle_track: Vec<GeoPose>,
    frames_processed: usize,
    skipped_frames: usize,
}

impl<'a> Session<'a> {
    pub fn new(track: &'a TrackIndex, options: SessionOptions) -> Self {
        Self {
            track,
            options,
            detector: GapDetector::new(options.gap),
            vehicle_track: Vec::new(),
            frames_processed: 0,
            skipped_frames: 0,
        }
    }

    /// Locate the vehicle for `frame` and record every projected detection
    ///
    /// Fails with [`crate::ParkScanError::OutOfRange`] when the frame lies
    /// outside the GPS track; nothing is recorded in that case.
    pub fn process_frame(&mut self, frame: &FrameInput) -> Result<FrameOutcome> {
        let vehicle = self.track.lookup(frame.timestamp_s)?;
        let bearing = heading_to_bearing(vehicle.heading, self.options.bearing_offset_rad);

        let objects: Vec<GeoPose> = frame
            .distances_m
            .iter()
            .map(|&distance| vehicle.offset(distance, bearing))
            .collect();
        for object in &objects {
            self.detector.record(*object);
        }

        debug!(
            timestamp = frame.timestamp_s,
            latitude = vehicle.latitude,
            longitude = vehicle.longitude,
            objects = objects.len(),
            "Frame processed"
        );

        self.vehicle_track.push(vehicle);
        self.frames_processed += 1;
        Ok(FrameOutcome { vehicle, objects })
    }

    /// Like [`Session::process_frame`], but out-of-range frames are counted
    /// and skipped instead of failing
    pub fn process_frame_or_skip(&mut self, frame: &FrameInput) -> Result<Option<FrameOutcome>> {
        match self.process_frame(frame) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) if err.is_out_of_range() => {
                warn!("Skipping frame: {}", err);
                self.skipped_frames += 1;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Spot candidates over everything recorded so far
    pub fn spots(&self) -> Vec<GeoPose> {
        self.detector.compute_spots()
    }

    pub fn detector(&self) -> &GapDetector {
        &self.detector
    }

    pub fn finish(self) -> SessionReport {
        let spots = self.detector.compute_spots();
        info!(
            "Session done: {} frames, {} skipped, {} markers, {} spots",
            self.frames_processed,
            self.skipped_frames,
            self.detector.len(),
            spots.len()
        );
        SessionReport {
            vehicle_track: self.vehicle_track,
            object_markers: self.detector.candidates().to_vec(),
            spots,
            frames_processed: self.frames_processed,
            skipped_frames: self.skipped_frames,
        }
    }
}

/// Run every frame through a new session, skipping frames outside the track
pub fn run_session(
    track: &TrackIndex,
    frames: &[FrameInput],
    options: SessionOptions,
) -> Result<SessionReport> {
    let mut session = Session::new(track, options);
    for frame in frames {
        session.process_frame_or_skip(frame)?;
    }
    Ok(session.finish())
}
