//! Status views and diagnostic snapshots.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle state flags injected by the outer control-status machine.
///
/// Only the flags the intake path consults live here; the full status
/// machine belongs to the filter core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlStatus {
    /// Airborne according to the land detector; gates optical-flow quality
    /// enforcement
    pub in_air: bool,
}

/// Buffer identifiers, used as metric labels and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Imu,
    Mag,
    Gps,
    Baro,
    Airspeed,
    Range,
    Flow,
    ExtVision,
    AuxVel,
    Drag,
    Output,
    OutputVert,
}

impl SensorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Imu => "imu",
            SensorKind::Mag => "mag",
            SensorKind::Gps => "gps",
            SensorKind::Baro => "baro",
            SensorKind::Airspeed => "airspeed",
            SensorKind::Range => "range",
            SensorKind::Flow => "flow",
            SensorKind::ExtVision => "ext_vision",
            SensorKind::AuxVel => "aux_vel",
            SensorKind::Drag => "drag",
            SensorKind::Output => "output",
            SensorKind::OutputVert => "output_vert",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capacity and occupancy of one ring buffer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BufferUsage {
    /// Allocated length (samples)
    pub capacity: usize,
    /// Currently retained samples
    pub occupied: usize,
}

/// Snapshot of the intake state for diagnostics and metric export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Per-buffer usage; unallocated buffers report zero capacity
    pub buffers: HashMap<SensorKind, BufferUsage>,
    /// Smoothed raw IMU sampling interval (s)
    pub dt_imu_avg: f32,
    /// Minimum accepted interval between observations (µs)
    pub min_obs_interval_us: u64,
    /// Coning, gyro HF and accel HF vibration metrics
    pub vibe_metrics: [f32; 3],
}
