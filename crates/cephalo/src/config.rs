//! Analysis configuration.
//!
//! Configuration JSON carries a schema tag (`cephalo.config.v1`). Every field
//! has a default, so a file only needs the values it overrides.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calibration::DEFAULT_RULER_LENGTH_MM;
use crate::reference::{default_normal_ranges, ReferenceTable};

const CONFIG_SCHEMA_V1: &str = "cephalo.config.v1";

/// Deviation from a range midpoint above which a warning is `severe`.
pub const DEFAULT_SEVERE_DEVIATION: f64 = 10.0;

/// Errors raised while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnsupportedSchema {
        found: String,
    },
    InvalidRulerLength(f64),
    InvalidSevereDeviation(f64),
    InvalidRange {
        name: String,
        low: f64,
        high: f64,
    },
    InvalidNorm {
        name: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {}", e),
            Self::Parse(e) => write!(f, "failed to parse config: {}", e),
            Self::UnsupportedSchema { found } => write!(
                f,
                "unsupported config schema '{}' (expected '{}')",
                found, CONFIG_SCHEMA_V1
            ),
            Self::InvalidRulerLength(v) => {
                write!(f, "ruler_length_mm must be finite and > 0, got {}", v)
            }
            Self::InvalidSevereDeviation(v) => {
                write!(f, "severe_deviation must be finite and >= 0, got {}", v)
            }
            Self::InvalidRange { name, low, high } => write!(
                f,
                "normal range for '{}' must be finite with low <= high, got [{}, {}]",
                name, low, high
            ),
            Self::InvalidNorm { name } => write!(
                f,
                "reference norm for '{}' must have a finite mean and sd > 0",
                name
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Tunable inputs of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub schema: String,
    /// Real-world length of the `Ruler Start`–`Ruler End` segment (mm).
    pub ruler_length_mm: f64,
    /// Distance from a range midpoint above which a warning is `severe`.
    pub severe_deviation: f64,
    /// Measurement/index name → `[low, high]` checked by validation.
    pub normal_ranges: BTreeMap<String, [f64; 2]>,
    /// Population norms used for classification.
    pub reference: ReferenceTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema: CONFIG_SCHEMA_V1.to_string(),
            ruler_length_mm: DEFAULT_RULER_LENGTH_MM,
            severe_deviation: DEFAULT_SEVERE_DEVIATION,
            normal_ranges: default_normal_ranges(),
            reference: ReferenceTable::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Parse and validate a configuration JSON document.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_ruler_length_mm(mut self, ruler_length_mm: f64) -> Self {
        self.ruler_length_mm = ruler_length_mm;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema != CONFIG_SCHEMA_V1 {
            return Err(ConfigError::UnsupportedSchema {
                found: self.schema.clone(),
            });
        }
        if !self.ruler_length_mm.is_finite() || self.ruler_length_mm <= 0.0 {
            return Err(ConfigError::InvalidRulerLength(self.ruler_length_mm));
        }
        if !self.severe_deviation.is_finite() || self.severe_deviation < 0.0 {
            return Err(ConfigError::InvalidSevereDeviation(self.severe_deviation));
        }
        for (name, &[low, high]) in &self.normal_ranges {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(ConfigError::InvalidRange {
                    name: name.clone(),
                    low,
                    high,
                });
            }
        }
        for (name, norm) in self.reference.iter() {
            if !norm.mean.is_finite() || !norm.sd.is_finite() || norm.sd <= 0.0 {
                return Err(ConfigError::InvalidNorm {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AnalysisConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.ruler_length_mm, 20.0);
        assert_eq!(cfg.severe_deviation, 10.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = AnalysisConfig::from_json_str(
            r#"{"schema": "cephalo.config.v1", "ruler_length_mm": 50.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.ruler_length_mm, 50.0);
        assert_eq!(cfg.normal_ranges, default_normal_ranges());
    }

    #[test]
    fn json_round_trip() {
        let cfg = AnalysisConfig::default().with_ruler_length_mm(25.0);
        let json = serde_json::to_string(&cfg).unwrap();
        let back = AnalysisConfig::from_json_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn rejects_unknown_schema() {
        let err = AnalysisConfig::from_json_str(r#"{"schema": "cephalo.config.v0"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedSchema { .. }));
    }

    #[test]
    fn rejects_bad_values() {
        let err = AnalysisConfig::default()
            .with_ruler_length_mm(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRulerLength(_)));

        let err = AnalysisConfig::from_json_str(
            r#"{"normal_ranges": {"SNA": [83.0, 79.0]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("SNA"));

        let err = AnalysisConfig::from_json_str(
            r#"{"reference": {"ANB": {"mean": 2.0, "sd": 0.0}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNorm { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::from_json_file(Path::new("/nonexistent/cephalo.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
