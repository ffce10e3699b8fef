//! Optical-flow validation and body-rate compensation.

use contracts::{EstimatorParams, FlowMessage, FlowSample, ImuSample};
use nalgebra::Vector2;

use crate::buffer::RingBuffer;

/// Validate and condition one optical-flow report.
///
/// Returns the buffered form of the sample, or `None` when it fails the
/// acceptance gate. On ground the gate is waived so handling and takeoff
/// with an unfocused sensor still produce (zero-LOS) samples.
///
/// When the report carries no usable gyro data, rates are recovered from
/// the IMU sample nearest-older than the flow window mid-point; if the IMU
/// buffer cannot provide one the sample is discarded.
pub fn condition_flow(
    params: &EstimatorParams,
    min_obs_interval_us: u64,
    in_air: bool,
    imu_buffer: &RingBuffer<ImuSample>,
    time_usec: u64,
    flow: &FlowMessage,
) -> Option<FlowSample> {
    // require at least 50% of the minimum arrival interval to have been
    // integrated, otherwise too much data is being lost
    let mut delta_time = flow.dt_us as f32 * 1e-6;
    let delta_time_min = 5e-7 * min_obs_interval_us as f32;
    let delta_time_good = delta_time >= delta_time_min;
    if !delta_time_good {
        // guard the divisions below against a tiny interval
        delta_time = delta_time_min;
    }

    let mut flow_magnitude_good = true;
    if delta_time_good {
        let flow_rate_magnitude = flow.flow_rad.norm() / delta_time;
        flow_magnitude_good = flow_rate_magnitude <= params.flow_rate_max;
    }

    let flow_quality_good = flow.quality >= params.flow_qual_min;

    if !((delta_time_good && flow_magnitude_good && flow_quality_good) || !in_air) {
        return None;
    }

    // system timestamp of the mid-point of the integration window
    let time_us = time_usec
        .saturating_sub(u64::from(params.flow_delay_ms) * 1000)
        .saturating_sub(u64::from(flow.dt_us) / 2);

    let no_gyro = flow.gyro_rad.iter().any(|v| !v.is_finite());

    // the filter uses the reverse sign convention to the sensor: positive
    // LOS rate comes from a right-hand rotation about the sensor axis
    let (gyro_xyz, matching_imu) = if no_gyro {
        let imu = imu_buffer
            .read_first_older_than(time_us)
            .filter(|imu| imu.delta_ang_dt > 0.0)?;
        (imu.delta_ang / imu.delta_ang_dt, Some(imu))
    } else {
        (-flow.gyro_rad, None)
    };

    let flow_rad_xy = if flow_quality_good {
        if no_gyro {
            flow.flow_rad / delta_time
        } else {
            -flow.flow_rad
        }
    } else if no_gyro {
        // poor quality on ground: assume zero ground-relative velocity
        Vector2::new(-gyro_xyz.x, -gyro_xyz.y)
    } else {
        // gyro_xyz already carries the negated driver rates
        Vector2::new(gyro_xyz.x, gyro_xyz.y)
    };

    // compensate for body motion to give a LOS rate
    let mut gyro_out = gyro_xyz;
    let flow_rad_xy_comp = if let Some(imu) = matching_imu {
        let comp = Vector2::new(
            (flow_rad_xy.x + gyro_out.x) * delta_time,
            (flow_rad_xy.y + gyro_out.y) * delta_time,
        );
        // store the recovered rates back in increment form
        gyro_out.x *= imu.delta_ang_dt;
        gyro_out.y *= imu.delta_ang_dt;
        comp
    } else {
        Vector2::new(flow_rad_xy.x - gyro_out.x, flow_rad_xy.y - gyro_out.y)
    };

    Some(FlowSample {
        time_us,
        quality: flow.quality,
        flow_rad_xy,
        gyro_xyz: gyro_out,
        flow_rad_xy_comp,
        dt: delta_time,
    })
}
