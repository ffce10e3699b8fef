//! Timestamped sample records, one per sensor modality.
//!
//! These are the records the ring buffers hold. Every field the filter core
//! consumes is single precision; timestamps are monotonic microseconds.

use nalgebra::{UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Access to the embedded sample timestamp, used for ordered buffer lookup.
pub trait Timestamped {
    /// System time at which the measurement physically occurred (µs).
    fn time_us(&self) -> u64;
}

macro_rules! impl_timestamped {
    ($($sample:ty),+ $(,)?) => {$(
        impl Timestamped for $sample {
            #[inline]
            fn time_us(&self) -> u64 {
                self.time_us
            }
        }
    )+};
}

/// Angular and velocity increments integrated by the IMU driver over its
/// reporting interval.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImuSample {
    pub time_us: u64,
    /// Delta angle over the integration interval (rad)
    pub delta_ang: Vector3<f32>,
    /// Delta velocity over the integration interval (m/s)
    pub delta_vel: Vector3<f32>,
    /// Delta angle integration interval (s)
    pub delta_ang_dt: f32,
    /// Delta velocity integration interval (s)
    pub delta_vel_dt: f32,
}

/// Magnetometer field measurement (gauss, body frame).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MagSample {
    pub time_us: u64,
    pub mag: Vector3<f32>,
}

/// GPS measurement after projection onto the local NE plane.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GpsSample {
    pub time_us: u64,
    /// Projected horizontal position relative to the origin (m, NE)
    pub pos: Vector2<f32>,
    /// Height above mean sea level (m)
    pub hgt: f32,
    /// Velocity (m/s, NED)
    pub vel: Vector3<f32>,
    /// Speed accuracy (m/s)
    pub sacc: f32,
    /// Horizontal position accuracy (m)
    pub hacc: f32,
    /// Vertical position accuracy (m)
    pub vacc: f32,
}

/// Barometric height measurement (m).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BaroSample {
    pub time_us: u64,
    pub hgt: f32,
}

/// True airspeed measurement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AirspeedSample {
    pub time_us: u64,
    /// True airspeed (m/s)
    pub true_airspeed: f32,
    /// Equivalent-to-true airspeed scale factor
    pub eas2tas: f32,
}

/// Range finder measurement (m).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RangeSample {
    pub time_us: u64,
    pub rng: f32,
}

/// Conditioned optical-flow measurement.
///
/// `time_us` is the mid-point of the integration window. The sign convention
/// is the filter's: positive LOS rate is produced by a right-hand rotation of
/// the image about the sensor axis, the reverse of the sensor's own.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlowSample {
    pub time_us: u64,
    /// Quality metric reported by the sensor (0 worst, 255 best)
    pub quality: u8,
    /// Flow angular rate about the X and Y body axes (rad/s)
    pub flow_rad_xy: Vector2<f32>,
    /// Gyro rates used for compensation; X/Y are stored in increment form
    /// when the rates were recovered from the IMU buffer
    pub gyro_xyz: Vector3<f32>,
    /// Body-motion compensated LOS angles (rad)
    pub flow_rad_xy_comp: Vector2<f32>,
    /// Integration interval (s)
    pub dt: f32,
}

/// Pose measurement from an external vision system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtVisionSample {
    pub time_us: u64,
    /// Body-to-earth rotation
    pub quat: UnitQuaternion<f32>,
    /// Position (m, NED)
    pub pos_ned: Vector3<f32>,
    /// Angular error bound (rad)
    pub ang_err: f32,
    /// Positional error bound (m)
    pub pos_err: f32,
}

/// Auxiliary horizontal velocity measurement (e.g. landing target tracker).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AuxVelSample {
    pub time_us: u64,
    /// Velocity (m/s, NE)
    pub vel_ne: Vector2<f32>,
    /// Velocity variances ((m/s)²)
    pub vel_var_ne: Vector2<f32>,
}

/// Down-sampled horizontal specific force for body-drag fusion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DragSample {
    pub time_us: u64,
    /// Mean horizontal specific force over the accumulation window (m/s²)
    pub accel_xy: Vector2<f32>,
}

/// Output predictor state record, written by the filter core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutputSample {
    pub time_us: u64,
    pub quat_nominal: UnitQuaternion<f32>,
    pub vel: Vector3<f32>,
    pub pos: Vector3<f32>,
}

/// Vertical-channel output predictor record, written by the filter core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutputVertSample {
    pub time_us: u64,
    pub vert_vel: f32,
    pub vert_vel_integ: f32,
    pub dt: f32,
}

impl_timestamped!(
    ImuSample,
    MagSample,
    GpsSample,
    BaroSample,
    AirspeedSample,
    RangeSample,
    FlowSample,
    ExtVisionSample,
    AuxVelSample,
    DragSample,
    OutputSample,
    OutputVertSample,
);
