//! Sensor intake facade.
//!
//! One intake routine per sensor, all sharing the same prologue: discard
//! while uninitialised, honour the per-sensor allocation-failure latch,
//! lazily allocate the observation buffer, rate-limit arrivals, back-date
//! the timestamp by the sensor delay, push. The filter core pulls
//! delay-aligned samples from the buffers through the read-only accessors.

use std::collections::HashMap;

use nalgebra::{Vector2, Vector3};
use tracing::{error, info, instrument};

use contracts::{
    AirspeedSample, AuxVelSample, BaroSample, BufferUsage, ControlStatus, DragSample,
    EstimatorError, EstimatorParams, ExtVisionMessage, ExtVisionSample, FlowMessage, FlowSample,
    GpsCollector, GpsMessage, GpsSample, ImuCollector, ImuSample, IngestStats, MagSample,
    OutputSample, OutputVertSample, RangeSample, SensorKind, Timestamped,
    VerticalDistanceSensor, FILTER_UPDATE_PERIOD_MS, FILTER_UPDATE_PERIOD_US,
};

use crate::buffer::RingBuffer;
use crate::downsample::{DragDownsampler, FilterRateCollector};
use crate::flow::condition_flow;
use crate::geo::LocalTangentPlane;
use crate::vibration::VibrationMonitor;

/// Arrival times of the last accepted sample per sensor (µs).
#[derive(Debug, Clone, Copy, Default)]
struct TimeLast {
    imu: u64,
    mag: u64,
    gps: u64,
    baro: u64,
    airspeed: u64,
    range: u64,
    flow: u64,
    ext_vision: u64,
    aux_vel: u64,
}

/// Per-sensor allocation-failure latches. Once set, the sensor stays
/// disabled until reinitialisation.
#[derive(Debug, Clone, Copy, Default)]
struct BufferFaults {
    mag: bool,
    gps: bool,
    baro: bool,
    airspeed: bool,
    range: bool,
    flow: bool,
    ext_vision: bool,
    aux_vel: bool,
    drag: bool,
}

/// Multi-sensor intake facade in front of the filter core.
///
/// Owns every buffer exclusively; drivers pass samples by value and the
/// filter core observes the buffers through shared references. All intake
/// routines are total and bounded-time.
pub struct IngestEngine {
    params: EstimatorParams,
    initialised: bool,

    imu_buffer: RingBuffer<ImuSample>,
    output_buffer: RingBuffer<OutputSample>,
    output_vert_buffer: RingBuffer<OutputVertSample>,
    mag_buffer: RingBuffer<MagSample>,
    gps_buffer: RingBuffer<GpsSample>,
    baro_buffer: RingBuffer<BaroSample>,
    airspeed_buffer: RingBuffer<AirspeedSample>,
    range_buffer: RingBuffer<RangeSample>,
    flow_buffer: RingBuffer<FlowSample>,
    ext_vision_buffer: RingBuffer<ExtVisionSample>,
    aux_vel_buffer: RingBuffer<AuxVelSample>,
    drag_buffer: RingBuffer<DragSample>,

    faults: BufferFaults,
    time_last: TimeLast,

    imu_buffer_length: usize,
    obs_buffer_length: usize,
    /// Minimum interval between observations that guarantees no loss before
    /// a sample falls behind the fusion horizon (µs)
    min_obs_interval_us: u64,
    /// Smoothed raw IMU interval (s)
    dt_imu_avg: f32,
    /// Oldest buffered IMU sample, i.e. the reading at the fusion horizon
    imu_sample_delayed: ImuSample,
    /// Set when the last raw sample completed a down-sampled one
    imu_updated: bool,
    gps_speed_valid: bool,

    vibration: VibrationMonitor,
    drag_downsampler: DragDownsampler,
    imu_collector: Box<dyn ImuCollector>,
    gps_collector: Box<dyn GpsCollector>,
    control_status: ControlStatus,
}

impl IngestEngine {
    /// Create an engine with the default collectors: filter-rate IMU
    /// down-sampling and a first-fix tangent-plane origin.
    pub fn new(params: EstimatorParams) -> Self {
        Self::with_collectors(
            params,
            Box::new(FilterRateCollector::new()),
            Box::new(LocalTangentPlane::new()),
        )
    }

    /// Create an engine with injected collector seams.
    pub fn with_collectors(
        params: EstimatorParams,
        imu_collector: Box<dyn ImuCollector>,
        gps_collector: Box<dyn GpsCollector>,
    ) -> Self {
        Self {
            params,
            initialised: false,
            imu_buffer: RingBuffer::new(),
            output_buffer: RingBuffer::new(),
            output_vert_buffer: RingBuffer::new(),
            mag_buffer: RingBuffer::new(),
            gps_buffer: RingBuffer::new(),
            baro_buffer: RingBuffer::new(),
            airspeed_buffer: RingBuffer::new(),
            range_buffer: RingBuffer::new(),
            flow_buffer: RingBuffer::new(),
            ext_vision_buffer: RingBuffer::new(),
            aux_vel_buffer: RingBuffer::new(),
            drag_buffer: RingBuffer::new(),
            faults: BufferFaults::default(),
            time_last: TimeLast::default(),
            imu_buffer_length: 0,
            obs_buffer_length: 0,
            min_obs_interval_us: 0,
            dt_imu_avg: 0.0,
            imu_sample_delayed: ImuSample::default(),
            imu_updated: false,
            gps_speed_valid: false,
            vibration: VibrationMonitor::new(),
            drag_downsampler: DragDownsampler::default(),
            imu_collector,
            gps_collector,
            control_status: ControlStatus::default(),
        }
    }

    /// Size and allocate the IMU and output buffers from the delay
    /// parameters. Observation buffers are deferred to first use so unused
    /// sensors cost no memory.
    ///
    /// On failure every buffer is released and the error returned; the
    /// engine remains uninitialised.
    #[instrument(level = "debug", skip(self))]
    pub fn initialise(&mut self, timestamp: u64) -> Result<(), EstimatorError> {
        let max_time_delay_ms = u64::from(self.params.max_time_delay_ms());

        // the IMU buffer must cover the maximum delay with allowance for jitter
        self.imu_buffer_length = (max_time_delay_ms / FILTER_UPDATE_PERIOD_MS) as usize + 1;

        // worst case 50% extension of the fusion horizon due to timing jitter
        let ekf_delay_ms = max_time_delay_ms + (max_time_delay_ms as f32 * 0.5).ceil() as u64;
        let interval_min_ms = u64::from(self.params.sensor_interval_min_ms).max(1);
        self.obs_buffer_length = (ekf_delay_ms / interval_min_ms) as usize + 1;

        // no point buffering observations faster than the prediction rate
        self.obs_buffer_length = self.obs_buffer_length.min(self.imu_buffer_length);

        let length = self.imu_buffer_length;
        if !(self.imu_buffer.allocate(length)
            && self.output_buffer.allocate(length)
            && self.output_vert_buffer.allocate(length))
        {
            error!(length, "imu/output buffer allocation failed");
            self.unallocate_buffers();
            return Err(EstimatorError::buffer_allocation(SensorKind::Imu, length));
        }

        self.dt_imu_avg = 0.0;
        self.imu_sample_delayed = ImuSample {
            time_us: timestamp,
            ..ImuSample::default()
        };
        self.imu_updated = false;
        self.gps_speed_valid = false;
        self.min_obs_interval_us = 0;
        self.time_last = TimeLast::default();
        self.faults = BufferFaults::default();
        self.vibration.reset();
        self.drag_downsampler =
            DragDownsampler::new(self.imu_buffer_length, self.obs_buffer_length);
        self.imu_collector.reset();
        self.initialised = false;

        info!(
            imu_buffer_length = self.imu_buffer_length,
            obs_buffer_length = self.obs_buffer_length,
            max_time_delay_ms,
            "ingest buffers initialised"
        );
        Ok(())
    }

    /// Release every buffer; capacities become zero.
    pub fn unallocate_buffers(&mut self) {
        self.imu_buffer.unallocate();
        self.output_buffer.unallocate();
        self.output_vert_buffer.unallocate();
        self.mag_buffer.unallocate();
        self.gps_buffer.unallocate();
        self.baro_buffer.unallocate();
        self.airspeed_buffer.unallocate();
        self.range_buffer.unallocate();
        self.flow_buffer.unallocate();
        self.ext_vision_buffer.unallocate();
        self.aux_vel_buffer.unallocate();
        self.drag_buffer.unallocate();
    }

    /// Accumulate raw IMU data and store to the buffer at the filter rate.
    ///
    /// The first call initialises the engine; until then every other intake
    /// routine discards its input.
    pub fn set_imu_data(
        &mut self,
        time_usec: u64,
        delta_ang_dt_us: u64,
        delta_vel_dt_us: u64,
        delta_ang: Vector3<f32>,
        delta_vel: Vector3<f32>,
    ) {
        if !self.initialised {
            if self.initialise(time_usec).is_err() {
                return;
            }
            self.initialised = true;
        }

        let dt = (time_usec.saturating_sub(self.time_last.imu) as f32 / 1e6).clamp(1.0e-4, 0.02);
        if self.time_last.imu > 0 {
            self.dt_imu_avg = 0.8 * self.dt_imu_avg + 0.2 * dt;
        }
        self.time_last.imu = time_usec;

        let mut imu_sample_new = ImuSample {
            time_us: time_usec,
            delta_ang,
            delta_vel,
            delta_ang_dt: delta_ang_dt_us as f32 / 1e6,
            delta_vel_dt: delta_vel_dt_us as f32 / 1e6,
        };

        // vibration metrics track the raw sequence, ahead of down-sampling
        self.vibration.update(&imu_sample_new);

        if self.imu_collector.collect(&mut imu_sample_new) {
            self.imu_buffer.push(imu_sample_new);
            self.imu_updated = true;
            self.note_push(SensorKind::Imu);

            if let Some(oldest) = self.imu_buffer.oldest() {
                self.imu_sample_delayed = *oldest;
            }
            if let (Some(newest), Some(oldest)) =
                (self.imu_buffer.newest(), self.imu_buffer.oldest())
            {
                // an observation overwritten before its timestamp falls
                // behind the fusion horizon is lost; this interval rules
                // that out
                let span = newest.time_us - oldest.time_us;
                self.min_obs_interval_us = span / (self.obs_buffer_length as u64 - 1).max(1);
            }

            if self.params.drag_fusion_enabled() && !self.faults.drag {
                self.accumulate_drag(&imu_sample_new);
            }
        } else {
            self.imu_updated = false;
        }
    }

    pub fn set_mag_data(&mut self, time_usec: u64, mag: Vector3<f32>) {
        if !self.initialised || self.faults.mag {
            return;
        }
        if !ensure_allocated(
            &mut self.mag_buffer,
            &mut self.faults.mag,
            self.obs_buffer_length,
            SensorKind::Mag,
        ) {
            return;
        }

        // limit data rate to prevent data being lost
        if time_usec.saturating_sub(self.time_last.mag) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.mag = time_usec;

        let time_us = time_usec
            .saturating_sub(u64::from(self.params.mag_delay_ms) * 1000)
            .saturating_sub(FILTER_UPDATE_PERIOD_US / 2);

        self.mag_buffer.push(MagSample { time_us, mag });
        self.note_push(SensorKind::Mag);
    }

    /// GPS intake. Only consumes data when GPS fusion is requested or GPS
    /// is the height source, and the receiver reports a 3D fix.
    #[instrument(level = "trace", skip(self, gps), fields(fix_type = gps.fix_type))]
    pub fn set_gps_data(&mut self, time_usec: u64, gps: &GpsMessage) {
        if !self.initialised || self.faults.gps {
            return;
        }
        if !ensure_allocated(
            &mut self.gps_buffer,
            &mut self.faults.gps,
            self.obs_buffer_length,
            SensorKind::Gps,
        ) {
            return;
        }

        let need_gps = self.params.gps_fusion_requested()
            || self.params.vdist_sensor_type == VerticalDistanceSensor::Gps;

        if time_usec.saturating_sub(self.time_last.gps) <= self.min_obs_interval_us
            || !need_gps
            || gps.fix_type <= 2
        {
            return;
        }
        self.time_last.gps = time_usec;

        let mut time_us = gps
            .time_usec
            .saturating_sub(u64::from(self.params.gps_delay_ms) * 1000)
            .saturating_sub(FILTER_UPDATE_PERIOD_US / 2);
        time_us = time_us.max(self.imu_sample_delayed.time_us);

        self.gps_speed_valid = gps.vel_ned_valid;

        // only a known origin yields a usable relative position
        let pos = if self.gps_collector.collect(time_usec, gps) {
            let (north, east) = self
                .gps_collector
                .project(f64::from(gps.lat) * 1e-7, f64::from(gps.lon) * 1e-7);
            Vector2::new(north, east)
        } else {
            Vector2::zeros()
        };

        self.gps_buffer.push(GpsSample {
            time_us,
            pos,
            hgt: gps.alt as f32 * 1e-3,
            vel: gps.vel_ned,
            sacc: gps.sacc,
            hacc: gps.eph,
            vacc: gps.epv,
        });
        self.note_push(SensorKind::Gps);
    }

    pub fn set_baro_data(&mut self, time_usec: u64, hgt: f32) {
        if !self.initialised || self.faults.baro {
            return;
        }
        if !ensure_allocated(
            &mut self.baro_buffer,
            &mut self.faults.baro,
            self.obs_buffer_length,
            SensorKind::Baro,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.baro) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.baro = time_usec;

        let mut time_us = time_usec
            .saturating_sub(u64::from(self.params.baro_delay_ms) * 1000)
            .saturating_sub(FILTER_UPDATE_PERIOD_US / 2);
        time_us = time_us.max(self.imu_sample_delayed.time_us);

        self.baro_buffer.push(BaroSample { time_us, hgt });
        self.note_push(SensorKind::Baro);
    }

    pub fn set_airspeed_data(&mut self, time_usec: u64, true_airspeed: f32, eas2tas: f32) {
        if !self.initialised || self.faults.airspeed {
            return;
        }
        if !ensure_allocated(
            &mut self.airspeed_buffer,
            &mut self.faults.airspeed,
            self.obs_buffer_length,
            SensorKind::Airspeed,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.airspeed) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.airspeed = time_usec;

        let time_us = time_usec
            .saturating_sub(u64::from(self.params.airspeed_delay_ms) * 1000)
            .saturating_sub(FILTER_UPDATE_PERIOD_US / 2);

        self.airspeed_buffer.push(AirspeedSample {
            time_us,
            true_airspeed,
            eas2tas,
        });
        self.note_push(SensorKind::Airspeed);
    }

    /// Range intake. Back-dates by the sensor delay only; the range path
    /// carries no mid-integration correction.
    pub fn set_range_data(&mut self, time_usec: u64, rng: f32) {
        if !self.initialised || self.faults.range {
            return;
        }
        if !ensure_allocated(
            &mut self.range_buffer,
            &mut self.faults.range,
            self.obs_buffer_length,
            SensorKind::Range,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.range) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.range = time_usec;

        let time_us = time_usec.saturating_sub(u64::from(self.params.range_delay_ms) * 1000);

        self.range_buffer.push(RangeSample { time_us, rng });
        self.note_push(SensorKind::Range);
    }

    /// Optical-flow intake; see [`condition_flow`] for the acceptance gate
    /// and gyro compensation.
    pub fn set_optical_flow_data(&mut self, time_usec: u64, flow: &FlowMessage) {
        if !self.initialised || self.faults.flow {
            return;
        }
        if !ensure_allocated(
            &mut self.flow_buffer,
            &mut self.faults.flow,
            self.obs_buffer_length,
            SensorKind::Flow,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.flow) <= self.min_obs_interval_us {
            return;
        }

        if let Some(sample) = condition_flow(
            &self.params,
            self.min_obs_interval_us,
            self.control_status.in_air,
            &self.imu_buffer,
            time_usec,
            flow,
        ) {
            self.time_last.flow = time_usec;
            self.flow_buffer.push(sample);
            self.note_push(SensorKind::Flow);
        }
    }

    pub fn set_ext_vision_data(&mut self, time_usec: u64, ev: &ExtVisionMessage) {
        if !self.initialised || self.faults.ext_vision {
            return;
        }
        if !ensure_allocated(
            &mut self.ext_vision_buffer,
            &mut self.faults.ext_vision,
            self.obs_buffer_length,
            SensorKind::ExtVision,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.ext_vision) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.ext_vision = time_usec;

        let time_us = time_usec.saturating_sub(u64::from(self.params.ev_delay_ms) * 1000);

        self.ext_vision_buffer.push(ExtVisionSample {
            time_us,
            quat: ev.quat,
            pos_ned: ev.pos_ned,
            ang_err: ev.ang_err,
            pos_err: ev.pos_err,
        });
        self.note_push(SensorKind::ExtVision);
    }

    pub fn set_aux_vel_data(&mut self, time_usec: u64, vel_ne: Vector2<f32>, vel_var_ne: Vector2<f32>) {
        if !self.initialised || self.faults.aux_vel {
            return;
        }
        if !ensure_allocated(
            &mut self.aux_vel_buffer,
            &mut self.faults.aux_vel,
            self.obs_buffer_length,
            SensorKind::AuxVel,
        ) {
            return;
        }

        if time_usec.saturating_sub(self.time_last.aux_vel) <= self.min_obs_interval_us {
            return;
        }
        self.time_last.aux_vel = time_usec;

        let mut time_us = time_usec
            .saturating_sub(u64::from(self.params.auxvel_delay_ms) * 1000)
            .saturating_sub(FILTER_UPDATE_PERIOD_US / 2);
        time_us = time_us.max(self.imu_sample_delayed.time_us);

        self.aux_vel_buffer.push(AuxVelSample {
            time_us,
            vel_ne,
            vel_var_ne,
        });
        self.note_push(SensorKind::AuxVel);
    }

    fn accumulate_drag(&mut self, imu: &ImuSample) {
        if self.drag_buffer.capacity() < self.obs_buffer_length {
            if !self.drag_buffer.allocate(self.obs_buffer_length) {
                self.faults.drag = true;
                error!(
                    sensor = SensorKind::Drag.as_str(),
                    length = self.obs_buffer_length,
                    "observation buffer allocation failed"
                );
                metrics::counter!(
                    "ekf_ingest_alloc_failures_total",
                    "sensor" => SensorKind::Drag.as_str()
                )
                .increment(1);
                return;
            }
        }

        if let Some(sample) = self.drag_downsampler.push(imu) {
            self.drag_buffer.push(sample);
            self.note_push(SensorKind::Drag);
        }
    }

    fn note_push(&self, kind: SensorKind) {
        metrics::counter!("ekf_ingest_samples_total", "sensor" => kind.as_str()).increment(1);
    }

    /// Update the injected vehicle-status view.
    pub fn set_control_status(&mut self, status: ControlStatus) {
        self.control_status = status;
    }

    pub fn set_in_air(&mut self, in_air: bool) {
        self.control_status.in_air = in_air;
    }

    pub fn initialised(&self) -> bool {
        self.initialised
    }

    /// Whether the last raw IMU sample completed a down-sampled one.
    pub fn imu_updated(&self) -> bool {
        self.imu_updated
    }

    /// The IMU reading at the fusion horizon.
    pub fn imu_sample_delayed(&self) -> &ImuSample {
        &self.imu_sample_delayed
    }

    pub fn min_obs_interval_us(&self) -> u64 {
        self.min_obs_interval_us
    }

    pub fn dt_imu_avg(&self) -> f32 {
        self.dt_imu_avg
    }

    /// Coning, gyro HF and accel HF vibration metrics.
    pub fn vibe_metrics(&self) -> [f32; 3] {
        self.vibration.metrics()
    }

    /// Mirror of the receiver's velocity-validity flag.
    pub fn gps_speed_valid(&self) -> bool {
        self.gps_speed_valid
    }

    pub fn imu_buffer(&self) -> &RingBuffer<ImuSample> {
        &self.imu_buffer
    }

    pub fn mag_buffer(&self) -> &RingBuffer<MagSample> {
        &self.mag_buffer
    }

    pub fn gps_buffer(&self) -> &RingBuffer<GpsSample> {
        &self.gps_buffer
    }

    pub fn baro_buffer(&self) -> &RingBuffer<BaroSample> {
        &self.baro_buffer
    }

    pub fn airspeed_buffer(&self) -> &RingBuffer<AirspeedSample> {
        &self.airspeed_buffer
    }

    pub fn range_buffer(&self) -> &RingBuffer<RangeSample> {
        &self.range_buffer
    }

    pub fn flow_buffer(&self) -> &RingBuffer<FlowSample> {
        &self.flow_buffer
    }

    pub fn ext_vision_buffer(&self) -> &RingBuffer<ExtVisionSample> {
        &self.ext_vision_buffer
    }

    pub fn aux_vel_buffer(&self) -> &RingBuffer<AuxVelSample> {
        &self.aux_vel_buffer
    }

    pub fn drag_buffer(&self) -> &RingBuffer<DragSample> {
        &self.drag_buffer
    }

    pub fn output_buffer(&self) -> &RingBuffer<OutputSample> {
        &self.output_buffer
    }

    /// Output predictor buffer, written by the filter core.
    pub fn output_buffer_mut(&mut self) -> &mut RingBuffer<OutputSample> {
        &mut self.output_buffer
    }

    pub fn output_vert_buffer(&self) -> &RingBuffer<OutputVertSample> {
        &self.output_vert_buffer
    }

    /// Vertical-channel output predictor buffer, written by the filter core.
    pub fn output_vert_buffer_mut(&mut self) -> &mut RingBuffer<OutputVertSample> {
        &mut self.output_vert_buffer
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Snapshot of buffer usage and intake state for diagnostics.
    pub fn stats(&self) -> IngestStats {
        let mut buffers = HashMap::new();
        buffers.insert(SensorKind::Imu, usage(&self.imu_buffer));
        buffers.insert(SensorKind::Output, usage(&self.output_buffer));
        buffers.insert(SensorKind::OutputVert, usage(&self.output_vert_buffer));
        buffers.insert(SensorKind::Mag, usage(&self.mag_buffer));
        buffers.insert(SensorKind::Gps, usage(&self.gps_buffer));
        buffers.insert(SensorKind::Baro, usage(&self.baro_buffer));
        buffers.insert(SensorKind::Airspeed, usage(&self.airspeed_buffer));
        buffers.insert(SensorKind::Range, usage(&self.range_buffer));
        buffers.insert(SensorKind::Flow, usage(&self.flow_buffer));
        buffers.insert(SensorKind::ExtVision, usage(&self.ext_vision_buffer));
        buffers.insert(SensorKind::AuxVel, usage(&self.aux_vel_buffer));
        buffers.insert(SensorKind::Drag, usage(&self.drag_buffer));

        IngestStats {
            buffers,
            dt_imu_avg: self.dt_imu_avg,
            min_obs_interval_us: self.min_obs_interval_us,
            vibe_metrics: self.vibration.metrics(),
        }
    }

    /// Dump buffer usage to the log stream.
    pub fn log_status(&self) {
        info!(
            imu = self.imu_buffer.capacity(),
            output = self.output_buffer.capacity(),
            output_vert = self.output_vert_buffer.capacity(),
            mag = self.mag_buffer.capacity(),
            gps = self.gps_buffer.capacity(),
            baro = self.baro_buffer.capacity(),
            airspeed = self.airspeed_buffer.capacity(),
            range = self.range_buffer.capacity(),
            flow = self.flow_buffer.capacity(),
            ext_vision = self.ext_vision_buffer.capacity(),
            aux_vel = self.aux_vel_buffer.capacity(),
            drag = self.drag_buffer.capacity(),
            "buffer capacities"
        );
        info!(
            dt_imu_avg = self.dt_imu_avg,
            min_obs_interval_us = self.min_obs_interval_us,
            "intake timing"
        );
    }
}

/// Lazily allocate an observation buffer, latching `failed` permanently
/// when the backing store cannot be obtained.
fn ensure_allocated<T>(
    buffer: &mut RingBuffer<T>,
    failed: &mut bool,
    length: usize,
    kind: SensorKind,
) -> bool
where
    T: Timestamped + Clone + Default,
{
    if buffer.capacity() >= length {
        return true;
    }
    if buffer.allocate(length) {
        true
    } else {
        *failed = true;
        error!(
            sensor = kind.as_str(),
            length, "observation buffer allocation failed"
        );
        metrics::counter!("ekf_ingest_alloc_failures_total", "sensor" => kind.as_str())
            .increment(1);
        false
    }
}

fn usage<T: Timestamped + Clone + Default>(buffer: &RingBuffer<T>) -> BufferUsage {
    BufferUsage {
        capacity: buffer.capacity(),
        occupied: buffer.occupied(),
    }
}
