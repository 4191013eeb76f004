pub mod detection;
pub mod pose;

pub use detection::*;
pub use pose::*;
