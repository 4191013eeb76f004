use std::fmt;

/// Error kinds surfaced by ingestion, track lookup and reporting
#[derive(Debug)]
pub enum ParkScanError {
    /// I/O errors
    Io(std::io::Error),
    /// Malformed GPS record or frame timestamp line (1-based line number)
    Parse { line: usize, message: String },
    /// Lookup outside the range covered by the track
    OutOfRange { query: f64, last: Option<f64> },
    /// Track samples not in strictly ascending timestamp order
    UnsortedTrack {
        index: usize,
        previous: f64,
        current: f64,
    },
    /// Detection table row that cannot be turned into a distance
    InvalidDetection(String),
    /// CSV codec errors
    #[cfg(feature = "csv")]
    Csv(csv::Error),
    /// JSON codec errors
    #[cfg(feature = "json")]
    Json(serde_json::Error),
}

impl fmt::Display for ParkScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkScanError::Io(err) => write!(f, "I/O error: {}", err),
            ParkScanError::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            ParkScanError::OutOfRange { query, last } => match last {
                Some(last) => write!(
                    f,
                    "Timestamp {:.6}s out of range (track ends at {:.6}s)",
                    query, last
                ),
                None => write!(f, "Timestamp {:.6}s out of range (track is empty)", query),
            },
            ParkScanError::UnsortedTrack {
                index,
                previous,
                current,
            } => write!(
                f,
                "Track sample {} has timestamp {:.6}s, not after previous {:.6}s",
                index, current, previous
            ),
            ParkScanError::InvalidDetection(msg) => write!(f, "Invalid detection: {}", msg),
            #[cfg(feature = "csv")]
            ParkScanError::Csv(err) => write!(f, "CSV error: {}", err),
            #[cfg(feature = "json")]
            ParkScanError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for ParkScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParkScanError::Io(err) => Some(err),
            #[cfg(feature = "csv")]
            ParkScanError::Csv(err) => Some(err),
            #[cfg(feature = "json")]
            ParkScanError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParkScanError {
    fn from(err: std::io::Error) -> Self {
        ParkScanError::Io(err)
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ParkScanError {
    fn from(err: csv::Error) -> Self {
        ParkScanError::Csv(err)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ParkScanError {
    fn from(err: serde_json::Error) -> Self {
        ParkScanError::Json(err)
    }
}

impl ParkScanError {
    /// True for the out-of-range lookup kind
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ParkScanError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, ParkScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = ParkScanError::OutOfRange {
            query: 12.5,
            last: Some(10.0),
        };
        assert!(err.is_out_of_range());
        assert_eq!(
            err.to_string(),
            "Timestamp 12.500000s out of range (track ends at 10.000000s)"
        );

        let empty = ParkScanError::OutOfRange {
            query: 1.0,
            last: None,
        };
        assert!(empty.to_string().contains("track is empty"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: ParkScanError = std::io::Error::new(std::io::ErrorKind::NotFound, "gps.txt").into();
        assert!(err.source().is_some());
        assert!(!err.is_out_of_range());
    }
}
