//! IMU-rate accumulators: filter-rate down-sampling and drag specific force.

use contracts::{DragSample, ImuCollector, ImuSample, FILTER_UPDATE_PERIOD_US};
use nalgebra::Vector2;

/// Floor on the drag down-sample ratio.
pub const MIN_DRAG_SAMPLE_RATIO: u32 = 5;

/// Accumulates horizontal specific force at a rate suitable for body-drag
/// fusion.
///
/// Acceleration is accumulated as a delta velocity and converted to a mean
/// specific force on emission. The accumulator resets on construction and on
/// every emit.
#[derive(Debug, Clone, Default)]
pub struct DragDownsampler {
    accel_xy: Vector2<f32>,
    time_us_sum: u64,
    dt_sum: f32,
    count: u32,
    ratio: u32,
}

impl DragDownsampler {
    /// Derive the down-sample ratio from the buffer geometry.
    pub fn new(imu_buffer_length: usize, obs_buffer_length: usize) -> Self {
        let geometric =
            (imu_buffer_length as f32 / obs_buffer_length.max(1) as f32).ceil() as u32;
        Self {
            ratio: geometric.max(MIN_DRAG_SAMPLE_RATIO),
            ..Self::default()
        }
    }

    pub fn ratio(&self) -> u32 {
        self.ratio
    }

    /// Accumulate one IMU sample; emits the mean once `ratio` samples have
    /// been folded in.
    pub fn push(&mut self, imu: &ImuSample) -> Option<DragSample> {
        self.accel_xy.x += imu.delta_vel.x;
        self.accel_xy.y += imu.delta_vel.y;
        self.time_us_sum += imu.time_us;
        self.dt_sum += imu.delta_vel_dt;
        self.count += 1;

        if self.count < self.ratio {
            return None;
        }

        let sample = DragSample {
            time_us: self.time_us_sum / u64::from(self.count),
            accel_xy: self.accel_xy / self.dt_sum,
        };

        self.accel_xy = Vector2::zeros();
        self.time_us_sum = 0;
        self.dt_sum = 0.0;
        self.count = 0;

        Some(sample)
    }

    pub fn reset(&mut self) {
        *self = Self {
            ratio: self.ratio,
            ..Self::default()
        };
    }
}

/// Down-samples raw IMU data to the filter prediction rate by summing
/// increments until the accumulated integration time spans one prediction
/// step.
///
/// The threshold is centred by half a raw interval so jittered drivers do
/// not systematically overshoot the target period.
#[derive(Debug, Clone, Default)]
pub struct FilterRateCollector {
    accum: ImuSample,
}

impl FilterRateCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImuCollector for FilterRateCollector {
    fn collect(&mut self, imu: &mut ImuSample) -> bool {
        self.accum.delta_ang += imu.delta_ang;
        self.accum.delta_vel += imu.delta_vel;
        self.accum.delta_ang_dt += imu.delta_ang_dt;
        self.accum.delta_vel_dt += imu.delta_vel_dt;
        self.accum.time_us = imu.time_us;

        let target_dt = FILTER_UPDATE_PERIOD_US as f32 * 1e-6;
        if self.accum.delta_ang_dt >= target_dt - 0.5 * imu.delta_ang_dt {
            *imu = self.accum;
            self.accum = ImuSample::default();
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.accum = ImuSample::default();
    }
}

/// Forwards every raw sample unchanged.
///
/// For replay and bench paths where the driver already integrates at the
/// filter rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCollector;

impl ImuCollector for PassthroughCollector {
    fn collect(&mut self, _imu: &mut ImuSample) -> bool {
        true
    }

    fn reset(&mut self) {}
}
