//! Parameter validation.
//!
//! Rules:
//! - sensor_interval_min_ms >= 1 (it sizes the observation buffers)
//! - delays within the range the buffer model can represent
//! - flow_rate_max positive and finite
//! - fusion_mode restricted to defined bits

use contracts::{EstimatorError, EstimatorParams, MASK_ALL};

/// Delays beyond this make the ring buffers absurdly long; treat them as a
/// configuration mistake rather than allocating.
const MAX_DELAY_MS: u16 = 1000;

/// Validate a parameter record.
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(params: &EstimatorParams) -> Result<(), EstimatorError> {
    validate_intervals(params)?;
    validate_delays(params)?;
    validate_flow_gates(params)?;
    validate_fusion_mode(params)?;
    Ok(())
}

fn validate_intervals(params: &EstimatorParams) -> Result<(), EstimatorError> {
    if params.sensor_interval_min_ms == 0 {
        return Err(EstimatorError::config_validation(
            "sensor_interval_min_ms",
            "must be >= 1, got 0",
        ));
    }
    Ok(())
}

fn validate_delays(params: &EstimatorParams) -> Result<(), EstimatorError> {
    let delays = [
        ("mag_delay_ms", params.mag_delay_ms),
        ("gps_delay_ms", params.gps_delay_ms),
        ("baro_delay_ms", params.baro_delay_ms),
        ("range_delay_ms", params.range_delay_ms),
        ("airspeed_delay_ms", params.airspeed_delay_ms),
        ("flow_delay_ms", params.flow_delay_ms),
        ("ev_delay_ms", params.ev_delay_ms),
        ("auxvel_delay_ms", params.auxvel_delay_ms),
        ("min_delay_ms", params.min_delay_ms),
    ];
    for (field, delay) in delays {
        if delay > MAX_DELAY_MS {
            return Err(EstimatorError::config_validation(
                field,
                format!("must be <= {MAX_DELAY_MS} ms, got {delay}"),
            ));
        }
    }
    Ok(())
}

fn validate_flow_gates(params: &EstimatorParams) -> Result<(), EstimatorError> {
    if !(params.flow_rate_max.is_finite() && params.flow_rate_max > 0.0) {
        return Err(EstimatorError::config_validation(
            "flow_rate_max",
            format!("must be a positive rate, got {}", params.flow_rate_max),
        ));
    }
    Ok(())
}

fn validate_fusion_mode(params: &EstimatorParams) -> Result<(), EstimatorError> {
    let unknown = params.fusion_mode & !MASK_ALL;
    if unknown != 0 {
        return Err(EstimatorError::config_validation(
            "fusion_mode",
            format!("unknown bits 0x{unknown:x}"),
        ));
    }
    Ok(())
}
