//! Collector traits - seams toward the filter core.
//!
//! The intake facade is a concrete value the filter implementation owns, so
//! the two operations the facade needs *from* the filter side come in as
//! injected collaborators rather than virtual methods.

use crate::{GpsMessage, ImuSample};

/// Down-samples raw IMU data to the filter prediction rate.
pub trait ImuCollector: Send {
    /// Accumulate one raw sample.
    ///
    /// When enough has accumulated for one filter prediction step, writes
    /// the down-sampled sample into `imu` and returns true; the caller then
    /// pushes `imu` into the IMU buffer.
    fn collect(&mut self, imu: &mut ImuSample) -> bool;

    /// Discard any partial accumulation.
    fn reset(&mut self);
}

/// Tracks the WGS-84 origin and projects fixes onto the local NE plane.
pub trait GpsCollector: Send {
    /// Observe a gated GPS message. Returns true once the projection origin
    /// is known; until then projected positions are unusable.
    fn collect(&mut self, time_usec: u64, gps: &GpsMessage) -> bool;

    /// Project WGS-84 coordinates (degrees) onto the local NE plane (m).
    fn project(&self, lat_deg: f64, lon_deg: f64) -> (f32, f32);
}
