//! Parameter file parsing.
//!
//! TOML is the primary format, JSON optional.

use std::path::Path;

use contracts::{EstimatorError, EstimatorParams};

/// Parameter file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, EstimatorError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(EstimatorError::config_parse(format!(
                "unsupported config format: .{ext}"
            ))),
            None => Err(EstimatorError::config_parse(
                "cannot determine config format from extension",
            )),
        }
    }
}

pub fn parse_toml(content: &str) -> Result<EstimatorParams, EstimatorError> {
    toml::from_str(content).map_err(|e| EstimatorError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<EstimatorParams, EstimatorError> {
    serde_json::from_str(content).map_err(|e| EstimatorError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<EstimatorParams, EstimatorError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
