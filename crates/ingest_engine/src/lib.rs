//! # Ingest Engine
//!
//! Sensor ingestion and time-alignment front-end for a delayed-horizon EKF.
//!
//! Responsible for:
//! - Time-aligned multi-sensor ring buffering sized from delay parameters
//! - IMU down-sampling and vibration metrics
//! - Per-sensor rate limiting, delay back-dating and integration centering
//! - Optical-flow gyro compensation with nearest-IMU lookup
//! - Deferred, fail-once buffer allocation
//!
//! ## Usage
//!
//! ```ignore
//! use contracts::EstimatorParams;
//! use ingest_engine::IngestEngine;
//!
//! let mut engine = IngestEngine::new(EstimatorParams::default());
//!
//! // Push raw driver samples as they arrive; the first IMU sample
//! // initialises the buffers.
//! engine.set_imu_data(time_us, 4000, 4000, delta_ang, delta_vel);
//! engine.set_mag_data(time_us, mag);
//!
//! // The filter core pulls delay-aligned samples from the buffers.
//! if let Some(mag) = engine.mag_buffer().read_first_older_than(horizon_us) {
//!     // fuse it
//! }
//! ```

mod buffer;
mod downsample;
mod engine;
mod flow;
mod geo;
mod vibration;

pub use buffer::RingBuffer;
pub use downsample::{DragDownsampler, FilterRateCollector, PassthroughCollector};
pub use engine::IngestEngine;
pub use flow::condition_flow;
pub use geo::LocalTangentPlane;
pub use vibration::VibrationMonitor;

// Re-export contracts types
pub use contracts::{EstimatorError, EstimatorParams, GpsCollector, ImuCollector, IngestStats};
