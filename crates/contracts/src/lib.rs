//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-crate data structures and
//! traits for the estimator front-end. All business crates can only depend on
//! this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Monotonic microseconds (`u64`) from an unspecified epoch, typically boot
//! - Intervals are seconds, single precision (`f32`)

mod collectors;
mod error;
mod messages;
mod params;
mod samples;
mod status;

pub use collectors::{GpsCollector, ImuCollector};
pub use error::EstimatorError;
pub use messages::{ExtVisionMessage, FlowMessage, GpsMessage};
pub use params::*;
pub use samples::*;
pub use status::{BufferUsage, ControlStatus, IngestStats, SensorKind};
