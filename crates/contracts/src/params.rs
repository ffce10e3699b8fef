//! Estimator tuning parameters shared across crates.
//!
//! The parameter record is read-only during runtime; an external tuning path
//! may replace it between intake calls but is assumed quiescent during them.

use serde::{Deserialize, Serialize};

/// Nominal filter prediction step (ms).
pub const FILTER_UPDATE_PERIOD_MS: u64 = 12;

/// Nominal filter prediction step (µs).
pub const FILTER_UPDATE_PERIOD_US: u64 = FILTER_UPDATE_PERIOD_MS * 1000;

/// Fuse GPS position and velocity.
pub const MASK_USE_GPS: u32 = 1 << 0;
/// Fuse optical-flow LOS rates.
pub const MASK_USE_OPT_FLOW: u32 = 1 << 1;
/// Inhibit accelerometer bias estimation.
pub const MASK_INHIBIT_ACC_BIAS: u32 = 1 << 2;
/// Fuse external-vision position.
pub const MASK_USE_EV_POS: u32 = 1 << 3;
/// Fuse external-vision yaw.
pub const MASK_USE_EV_YAW: u32 = 1 << 4;
/// Fuse body-drag specific force.
pub const MASK_USE_DRAG: u32 = 1 << 5;

/// All fusion-mode bits with a defined meaning.
pub const MASK_ALL: u32 = MASK_USE_GPS
    | MASK_USE_OPT_FLOW
    | MASK_INHIBIT_ACC_BIAS
    | MASK_USE_EV_POS
    | MASK_USE_EV_YAW
    | MASK_USE_DRAG;

/// Primary source of height measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalDistanceSensor {
    #[default]
    Baro,
    Gps,
    Range,
}

/// Per-sensor delays, rate limits and fusion gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Magnetometer propagation delay relative to the IMU (ms)
    pub mag_delay_ms: u16,
    /// GPS propagation delay (ms)
    pub gps_delay_ms: u16,
    /// Barometer propagation delay (ms)
    pub baro_delay_ms: u16,
    /// Range finder propagation delay (ms)
    pub range_delay_ms: u16,
    /// Airspeed sensor propagation delay (ms)
    pub airspeed_delay_ms: u16,
    /// Optical-flow propagation delay (ms), measured to the window mid-point
    pub flow_delay_ms: u16,
    /// External-vision propagation delay (ms)
    pub ev_delay_ms: u16,
    /// Auxiliary velocity propagation delay (ms)
    pub auxvel_delay_ms: u16,
    /// Floor applied to the maximum delay when sizing buffers (ms)
    pub min_delay_ms: u16,
    /// Minimum expected interval between observations (ms); sizes the
    /// observation buffers
    pub sensor_interval_min_ms: u16,
    /// Bitmask of `MASK_*` fusion gates
    pub fusion_mode: u32,
    /// Primary height source
    pub vdist_sensor_type: VerticalDistanceSensor,
    /// Maximum accepted optical-flow rate magnitude (rad/s)
    pub flow_rate_max: f32,
    /// Minimum accepted optical-flow quality
    pub flow_qual_min: u8,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            mag_delay_ms: 0,
            gps_delay_ms: 110,
            baro_delay_ms: 0,
            range_delay_ms: 5,
            airspeed_delay_ms: 100,
            flow_delay_ms: 5,
            ev_delay_ms: 175,
            auxvel_delay_ms: 0,
            min_delay_ms: 0,
            sensor_interval_min_ms: 20,
            fusion_mode: MASK_USE_GPS,
            vdist_sensor_type: VerticalDistanceSensor::Baro,
            flow_rate_max: 2.5,
            flow_qual_min: 1,
        }
    }
}

impl EstimatorParams {
    /// Largest propagation delay any buffer must be able to cover (ms).
    pub fn max_time_delay_ms(&self) -> u16 {
        [
            self.mag_delay_ms,
            self.range_delay_ms,
            self.gps_delay_ms,
            self.flow_delay_ms,
            self.ev_delay_ms,
            self.auxvel_delay_ms,
            self.min_delay_ms,
            self.airspeed_delay_ms,
            self.baro_delay_ms,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn gps_fusion_requested(&self) -> bool {
        self.fusion_mode & MASK_USE_GPS != 0
    }

    pub fn drag_fusion_enabled(&self) -> bool {
        self.fusion_mode & MASK_USE_DRAG != 0
    }
}
