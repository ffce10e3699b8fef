//! Layered error definitions.
//!
//! Layered by origin: allocation / config / io.

use thiserror::Error;

use crate::SensorKind;

/// Unified error type for the estimator front-end.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Backing-store allocation failed; the named buffer stays disabled
    /// until reinitialisation
    #[error("{buffer} buffer allocation failed (requested {capacity} samples)")]
    BufferAllocation {
        buffer: SensorKind,
        capacity: usize,
    },

    /// Parameter file parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Parameter validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EstimatorError {
    pub fn buffer_allocation(buffer: SensorKind, capacity: usize) -> Self {
        Self::BufferAllocation { buffer, capacity }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}
