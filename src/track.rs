//! Time-indexed GPS track with interpolated lookup
//!
//! The track is built once from samples in strictly ascending timestamp
//! order and is read-only afterwards.

use crate::error::{ParkScanError, Result};
use crate::types::GeoPose;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Ordered store of GPS samples keyed by timestamp
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    samples: Vec<GeoPose>,
}

impl TrackIndex {
    /// Build a track from samples sorted by timestamp
    ///
    /// Input must be strictly ascending. Duplicate, decreasing or NaN
    /// timestamps are rejected with [`ParkScanError::UnsortedTrack`].
    pub fn new(samples: Vec<GeoPose>) -> Result<Self> {
        for (index, pair) in samples.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            match current.partial_cmp(&previous) {
                Some(Ordering::Greater) => {}
                _ => {
                    return Err(ParkScanError::UnsortedTrack {
                        index: index + 1,
                        previous,
                        current,
                    })
                }
            }
        }

        if let Some(first) = samples.first() {
            debug!(
                first = first.timestamp,
                last = samples[samples.len() - 1].timestamp,
                "Track index built"
            );
        }
        info!("Got {} data points", samples.len());

        Ok(Self { samples })
    }

    /// Pose at `timestamp`, linearly interpolated between the bracketing samples
    ///
    /// Queries before the first sample return the first sample unchanged.
    /// Queries at or beyond the last sample, against an empty track, or with
    /// a non-finite timestamp fail with [`ParkScanError::OutOfRange`].
    pub fn lookup(&self, timestamp: f64) -> Result<GeoPose> {
        let out_of_range = || ParkScanError::OutOfRange {
            query: timestamp,
            last: self.last().map(|p| p.timestamp),
        };

        if !timestamp.is_finite() {
            return Err(out_of_range());
        }

        // first sample strictly after the query
        let next_index = self.samples.partition_point(|p| p.timestamp <= timestamp);
        let next = self.samples.get(next_index).ok_or_else(out_of_range)?;

        if next_index == 0 {
            // zero-width bracket: the scan starts with prev == first sample
            return Ok(*next);
        }

        let prev = &self.samples[next_index - 1];
        let dt = next.timestamp - prev.timestamp;
        if dt != 0.0 {
            Ok(prev.interpolate((timestamp - prev.timestamp) / dt, next))
        } else {
            Ok(*prev)
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPose> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&GeoPose> {
        self.samples.last()
    }

    /// (first, last) timestamps covered by the track
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((self.first()?.timestamp, self.last()?.timestamp))
    }

    pub fn samples(&self) -> &[GeoPose] {
        &self.samples
    }
}
