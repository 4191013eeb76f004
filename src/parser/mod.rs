#[cfg(feature = "csv")]
pub mod detections;
pub mod frame;
pub mod gps;

#[cfg(feature = "csv")]
pub use detections::*;
pub use frame::*;
pub use gps::*;
