//! High-level analysis API.
//!
//! [`Analyzer`] is the primary entry point. It owns an [`AnalysisConfig`]
//! and runs the full pipeline on landmark sets.

use std::path::Path;

use crate::config::{AnalysisConfig, ConfigError};
use crate::landmarks::LandmarkSet;
use crate::pipeline::{self, CephalometricAnalysis};

/// Primary analysis interface.
///
/// Create once, analyze many landmark sets.
///
/// # Examples
///
/// ```
/// use cephalo::{Analyzer, LandmarkSet, Point};
///
/// let landmarks = LandmarkSet::from_points([
///     ("Sella", Point::new(0.0, 0.0)),
///     ("Nasion", Point::new(0.0, 10.0)),
///     ("A-Point", Point::new(10.0, 10.0)),
/// ])
/// .unwrap();
/// let analysis = Analyzer::new().analyze(&landmarks);
/// assert_eq!(analysis.measurements.get("SNA"), Some(90.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Load a configuration JSON file and create an analyzer in one step.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::with_config(AnalysisConfig::from_json_file(path)?))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    pub fn analyze(&self, landmarks: &LandmarkSet) -> CephalometricAnalysis {
        pipeline::analyze(landmarks, &self.config)
    }
}
