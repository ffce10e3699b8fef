//! # Config Loader
//!
//! Loads and validates estimator tuning parameters.
//!
//! Responsible for:
//! - Parsing TOML/JSON parameter files
//! - Validating tuning against the buffer model
//! - Producing an [`EstimatorParams`] record
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let params = config_loader::load_params(Path::new("estimator.toml")).unwrap();
//! println!("GPS delay: {} ms", params.gps_delay_ms);
//! ```

mod parser;
mod validator;

pub use contracts::EstimatorParams;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::EstimatorError;
use std::path::Path;

/// Load and validate parameters from a file. The format comes from the
/// file extension (.toml / .json).
///
/// # Errors
/// - unrecognised extension
/// - file read failure
/// - parse or validation failure
pub fn load_params(path: &Path) -> Result<EstimatorParams, EstimatorError> {
    let format = ConfigFormat::from_path(path)?;
    params_from_str(&std::fs::read_to_string(path)?, format)
}

/// Parse and validate parameters from an in-memory document.
pub fn params_from_str(
    content: &str,
    format: ConfigFormat,
) -> Result<EstimatorParams, EstimatorError> {
    let params = parser::parse(content, format)?;
    validator::validate(&params)?;
    Ok(params)
}

/// Render parameters as pretty TOML, the primary on-disk format.
pub fn to_toml(params: &EstimatorParams) -> Result<String, EstimatorError> {
    toml::to_string_pretty(params)
        .map_err(|e| EstimatorError::config_parse(format!("TOML serialize error: {e}")))
}

/// Render parameters as pretty JSON.
pub fn to_json(params: &EstimatorParams) -> Result<String, EstimatorError> {
    serde_json::to_string_pretty(params)
        .map_err(|e| EstimatorError::config_parse(format!("JSON serialize error: {e}")))
}
