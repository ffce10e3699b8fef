//! Raw driver messages, copied by value at the intake boundary.

use nalgebra::{UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// GNSS receiver report as delivered by the driver.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GpsMessage {
    /// Receiver timestamp of the fix (µs)
    pub time_usec: u64,
    /// Latitude (1e-7 degrees)
    pub lat: i32,
    /// Longitude (1e-7 degrees)
    pub lon: i32,
    /// Altitude above mean sea level (mm)
    pub alt: i32,
    /// 0-1: none, 2: 2D fix, 3: 3D fix, 4+: differential/RTK
    pub fix_type: u8,
    /// Horizontal position accuracy (m)
    pub eph: f32,
    /// Vertical position accuracy (m)
    pub epv: f32,
    /// Speed accuracy (m/s)
    pub sacc: f32,
    /// Velocity (m/s, NED)
    pub vel_ned: Vector3<f32>,
    /// Whether the receiver's velocity solution is usable
    pub vel_ned_valid: bool,
}

/// Optical-flow sensor report over one integration window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlowMessage {
    /// Accumulated flow angles about the X and Y sensor axes (rad)
    pub flow_rad: Vector2<f32>,
    /// Accumulated gyro angles over the same window (rad); non-finite
    /// components signal that the sensor has no gyro of its own
    pub gyro_rad: Vector3<f32>,
    /// Integration window length (µs)
    pub dt_us: u32,
    /// Quality metric (0 worst, 255 best)
    pub quality: u8,
}

/// Pose report from an external vision system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtVisionMessage {
    /// Body-to-earth rotation
    pub quat: UnitQuaternion<f32>,
    /// Position (m, NED)
    pub pos_ned: Vector3<f32>,
    /// Angular error bound (rad)
    pub ang_err: f32,
    /// Positional error bound (m)
    pub pos_err: f32,
}
