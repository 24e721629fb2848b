use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::angles::AngleResult;
use crate::calibration::Calibration;
use crate::diagnostics::AnalysisNote;
use crate::distances::DistanceResult;
use crate::indices::classify::ClinicalSummary;
use crate::indices::{DiagnosticIndexSet, ValidationWarning};
use crate::landmarks::LandmarkSet;
use crate::measurements::MeasurementMap;

/// Full analysis output for one landmark set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CephalometricAnalysis {
    /// Input landmarks extended with derived construction points.
    pub landmarks: LandmarkSet,
    pub calibration: Calibration,
    /// Angle details, including contributing landmarks.
    pub angles: BTreeMap<String, AngleResult>,
    /// Distance details, including raw lengths and units.
    pub distances: BTreeMap<String, DistanceResult>,
    /// Flat union of angle and distance values.
    pub measurements: MeasurementMap,
    pub indices: DiagnosticIndexSet,
    pub warnings: Vec<ValidationWarning>,
    pub summary: ClinicalSummary,
    /// Skipped measurements and degraded computations, in stage order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<AnalysisNote>,
}

impl CephalometricAnalysis {
    /// Value of a measurement, or of an index when no measurement has that name.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.measurements
            .get(name)
            .or_else(|| self.indices.get(name))
    }
}
