//! Exponentially-smoothed vibration metrics over raw IMU increments.

use contracts::ImuSample;
use nalgebra::Vector3;

const VIBE_ALPHA: f32 = 0.01;

/// Three EMA vibration metrics fed by every raw IMU sample, ahead of
/// down-sampling, so they reflect the full-rate sequence.
#[derive(Debug, Clone, Default)]
pub struct VibrationMonitor {
    delta_ang_prev: Vector3<f32>,
    delta_vel_prev: Vector3<f32>,
    metrics: [f32; 3],
}

impl VibrationMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw IMU sample into the metrics.
    pub fn update(&mut self, imu: &ImuSample) {
        // coning: rotation axis wander between consecutive increments
        let coning = imu.delta_ang.cross(&self.delta_ang_prev);
        self.metrics[0] = (1.0 - VIBE_ALPHA) * self.metrics[0] + VIBE_ALPHA * coning.norm();

        // high-frequency gyro content
        let ang_hf = imu.delta_ang - self.delta_ang_prev;
        self.delta_ang_prev = imu.delta_ang;
        self.metrics[1] = (1.0 - VIBE_ALPHA) * self.metrics[1] + VIBE_ALPHA * ang_hf.norm();

        // high-frequency accelerometer content
        let vel_hf = imu.delta_vel - self.delta_vel_prev;
        self.delta_vel_prev = imu.delta_vel;
        self.metrics[2] = (1.0 - VIBE_ALPHA) * self.metrics[2] + VIBE_ALPHA * vel_hf.norm();
    }

    /// Coning, gyro HF and accel HF metrics, in that order.
    pub fn metrics(&self) -> [f32; 3] {
        self.metrics
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
