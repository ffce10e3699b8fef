//! Intake metric collection.
//!
//! Records gauges and histograms from `IngestStats` snapshots and keeps a
//! small in-memory aggregation of the vibration metrics for summaries.

use contracts::IngestStats;
use metrics::{gauge, histogram};

/// Record metrics from an intake snapshot.
///
/// Call after each filter update, or at whatever cadence the host schedules
/// diagnostics.
pub fn record_ingest_stats(stats: &IngestStats) {
    for (kind, usage) in &stats.buffers {
        gauge!("ekf_ingest_buffer_capacity", "sensor" => kind.as_str())
            .set(usage.capacity as f64);
        gauge!("ekf_ingest_buffer_occupied", "sensor" => kind.as_str())
            .set(usage.occupied as f64);
    }

    gauge!("ekf_ingest_dt_imu_avg_s").set(f64::from(stats.dt_imu_avg));
    gauge!("ekf_ingest_min_obs_interval_us").set(stats.min_obs_interval_us as f64);

    record_vibration(&stats.vibe_metrics);
}

/// Record the three vibration metrics.
pub fn record_vibration(vibe: &[f32; 3]) {
    let [coning, gyro_hf, accel_hf] = *vibe;
    gauge!("ekf_ingest_vibe_coning").set(f64::from(coning));
    gauge!("ekf_ingest_vibe_gyro_hf").set(f64::from(gyro_hf));
    gauge!("ekf_ingest_vibe_accel_hf").set(f64::from(accel_hf));

    histogram!("ekf_ingest_vibe_coning_hist").record(f64::from(coning));
    histogram!("ekf_ingest_vibe_gyro_hf_hist").record(f64::from(gyro_hf));
    histogram!("ekf_ingest_vibe_accel_hf_hist").record(f64::from(accel_hf));
}

/// Record one buffer's usage.
pub fn record_buffer_usage(sensor: &'static str, capacity: usize, occupied: usize) {
    gauge!("ekf_ingest_buffer_capacity", "sensor" => sensor).set(capacity as f64);
    gauge!("ekf_ingest_buffer_occupied", "sensor" => sensor).set(occupied as f64);
}

/// Running min/mean/max over a stream of samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Point-in-time view of a [`RunningStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        if stats.count == 0 {
            return Self::default();
        }
        Self {
            min: stats.min,
            mean: stats.sum / stats.count as f64,
            max: stats.max,
        }
    }
}

/// Aggregates vibration metrics across snapshots for a session summary.
#[derive(Debug, Clone, Default)]
pub struct VibrationAggregator {
    coning: RunningStats,
    gyro_hf: RunningStats,
    accel_hf: RunningStats,
}

impl VibrationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, stats: &IngestStats) {
        let [coning, gyro_hf, accel_hf] = stats.vibe_metrics;
        self.coning.push(f64::from(coning));
        self.gyro_hf.push(f64::from(gyro_hf));
        self.accel_hf.push(f64::from(accel_hf));
    }

    pub fn summary(&self) -> VibrationSummary {
        VibrationSummary {
            snapshots: self.coning.count(),
            coning: StatsSummary::from(&self.coning),
            gyro_hf: StatsSummary::from(&self.gyro_hf),
            accel_hf: StatsSummary::from(&self.accel_hf),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Session-level vibration summary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VibrationSummary {
    pub snapshots: u64,
    pub coning: StatsSummary,
    pub gyro_hf: StatsSummary,
    pub accel_hf: StatsSummary,
}
